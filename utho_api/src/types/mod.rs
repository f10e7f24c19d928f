mod meta;
pub(crate) use self::meta::null_as_default;
pub use self::meta::{ApiStatus, BasicResponse, CreateBasicResponse, DeleteResponse, SUCCESS};

mod account;
pub use self::account::{Account, AccountInfo};

mod api_key;
pub use self::api_key::{ApiKey, ApiKeys, CreateApiKeyParams, CreateApiKeyResponse};

mod cloud_instance;
pub use self::cloud_instance::{
    CloudHostname, CloudInstance, CloudInstances, CreateCloudInstanceParams,
    CreateCloudInstanceResponse, DeleteCloudInstanceParams, Dclocation, Image, IpV4, OsImage,
    OsImages, Plan, RebuildCloudInstanceParams, ResetPasswordResponse, ResizeCloudInstanceParams,
    ResizePlans,
};
