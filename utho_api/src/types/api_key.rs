use serde::{Deserialize, Serialize};

use super::meta::{impl_api_status, null_as_default};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ApiKeys {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub api: Vec<ApiKey>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ApiKey {
    pub id: String,
    pub name: String,
    /// `"1"` when the key may modify resources, `"0"` for read-only keys.
    pub write: String,
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CreateApiKeyParams {
    pub name: String,
    pub write: String,
}

/// Result of generating a key. `apikey` is the secret and is only ever
/// returned here.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CreateApiKeyResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub apikey: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

impl_api_status!(ApiKeys, CreateApiKeyResponse);
