//! Per-resource views over a shared [`crate::Client`].

mod account;
pub use self::account::AccountService;

mod api_key;
pub use self::api_key::ApiKeyService;

mod cloud_instance;
pub use self::cloud_instance::CloudInstanceService;
