use serde::{Deserialize, Serialize};

use super::meta::{impl_api_status, null_as_default};

/// Parameters for deploying one or more cloud instances.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CreateCloudInstanceParams {
    /// Datacenter slug, e.g. `inbangalore`.
    pub dcslug: String,
    pub image: String,
    pub planid: String,
    pub billingcycle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enablebackup: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firewall: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backupid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshotid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sshkeys: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc: Option<String>,
    /// One entry per instance to deploy.
    pub cloud: Vec<CloudHostname>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CloudHostname {
    pub hostname: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CreateCloudInstanceResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cloudid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub password: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ipv4: String,
}

/// Envelope of both the list and the single-instance endpoints; the latter
/// returns a one-element `cloud` array.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CloudInstances {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cloud: Vec<CloudInstance>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CloudInstance {
    pub cloudid: String,
    pub hostname: String,
    pub csize: String,
    pub billingcycle: String,
    pub powerstatus: String,
    pub created_at: String,
    pub ip: String,
    pub cpu: String,
    pub ram: String,
    pub disksize: String,
    /// Lifecycle state of the instance (`Active`, `Pending`, ...).
    pub status: String,
    pub dclocation: Dclocation,
    pub image: Image,
    pub networks: Vec<IpV4>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Dclocation {
    pub location: String,
    pub country: String,
    pub dc: String,
    pub dccc: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Image {
    pub name: String,
    pub distribution: String,
    pub version: String,
    pub image: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct IpV4 {
    pub ip_address: String,
    pub netmask: String,
    pub gateway: String,
    #[serde(rename = "type")]
    pub ip_type: String,
    pub primary: String,
    pub rdns: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct OsImages {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<OsImage>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct OsImage {
    pub distro: String,
    pub distribution: String,
    pub version: String,
    pub image: String,
    pub cost: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ResizePlans {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub plans: Vec<Plan>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Plan {
    pub id: String,
    pub slug: String,
    pub disk: String,
    pub ram: String,
    pub cpu: String,
    pub bandwidth: String,
    pub price: String,
    pub monthly: String,
    pub plantype: String,
}

/// Body of a destroy call; `confirm` must carry the provider's exact
/// acknowledgement sentence.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DeleteCloudInstanceParams {
    pub confirm: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RebuildCloudInstanceParams {
    pub image: String,
    pub confirm: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ResizeCloudInstanceParams {
    /// What to resize, e.g. `ramcpu`.
    #[serde(rename = "type")]
    pub resize_type: String,
    pub plan: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ResetPasswordResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub password: String,
}

impl_api_status!(
    CreateCloudInstanceResponse,
    CloudInstances,
    OsImages,
    ResizePlans,
    ResetPasswordResponse,
);
