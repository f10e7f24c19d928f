use serde::{Deserialize, Serialize};

use super::meta::{impl_api_status, null_as_default};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AccountInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: Account,
}

impl_api_status!(AccountInfo);

/// The authenticated account. The API reports most numeric values as strings.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Account {
    pub id: String,
    #[serde(rename = "type")]
    pub account_type: String,
    pub fullname: String,
    pub company: String,
    pub email: String,
    pub mobile: String,
    pub country: String,
    pub availablecredit: String,
    pub currencyprefix: String,
    pub currency: String,
    pub twofa: String,
    pub verify: String,
}
