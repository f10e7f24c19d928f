use serde::{Deserialize, Deserializer, Serialize};

/// Value of the embedded `status` field on a successful call.
pub const SUCCESS: &str = "success";

/// Response bodies that report their own outcome through a
/// `{"status": ..., "message": ...}` pair, independently of the HTTP status.
pub trait ApiStatus {
    /// The embedded `status` field; empty when the body did not carry one.
    fn status(&self) -> &str;

    /// The embedded `message` field; empty when absent.
    fn message(&self) -> &str;

    /// Only an explicit value other than `"success"` marks a failure.
    fn is_success(&self) -> bool {
        let status = self.status();
        status.is_empty() || status == SUCCESS
    }
}

/// Reads an explicit `null` as the type's default, the way a missing field is.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

macro_rules! impl_api_status {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::types::ApiStatus for $ty {
                fn status(&self) -> &str {
                    &self.status
                }

                fn message(&self) -> &str {
                    &self.message
                }
            }
        )+
    };
}
pub(crate) use impl_api_status;

/// Envelope of actions that return nothing but their outcome.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct BasicResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

/// Outcome of a create action that yields the new resource's ID.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CreateBasicResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DeleteResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

impl_api_status!(BasicResponse, CreateBasicResponse, DeleteResponse);
