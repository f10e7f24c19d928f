//! Async client for the Utho cloud REST API.
//!
//! ```no_run
//! # async fn run() -> Result<(), utho_api::Error> {
//! let client = utho_api::Client::new("my-token")?;
//! for instance in client.cloud_instances().list().await? {
//!     println!("{} {}", instance.cloudid, instance.hostname);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod errors;
pub mod services;
pub mod types;
pub use self::client::{Client, RawResponse};
pub use self::config::{
    to_url_with_ending_slash, ClientOption, EnvConfig, API_KEY_VAR, BASE_URL, BASE_URL_VAR,
    DEFAULT_TIMEOUT, TIMEOUT_VAR,
};
pub use self::errors::{ApiError, Error};
pub use reqwest::Method;
