//! Client configuration: base URL normalization, construction options and
//! environment loading.

use std::time::Duration;

use reqwest::header::HeaderValue;
use url::Url;

use crate::Error;

/// Production endpoint of the Utho API.
pub const BASE_URL: &str = "https://api.utho.com/v2/";

/// Upper bound on a single request, including reading the body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Environment variable holding the API token.
pub const API_KEY_VAR: &str = "UTHO_API_KEY";
/// Environment variable overriding the base URL.
pub const BASE_URL_VAR: &str = "UTHO_BASE_URL";
/// Environment variable overriding the request timeout, in whole seconds.
pub const TIMEOUT_VAR: &str = "UTHO_TIMEOUT_SECS";

const DEFAULT_USER_AGENT: &str = concat!("utho-rs/", env!("CARGO_PKG_VERSION"));

/// Parses `raw` as a URL and makes sure its path ends with `/`, so that
/// relative resource paths resolve underneath it instead of replacing the
/// last segment.
pub fn to_url_with_ending_slash(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw).map_err(|e| {
        tracing::error!("Invalid base URL {:?}: {}", raw, e);
        Error::InvalidConfiguration(format!("invalid base URL {:?}: {}", raw, e))
    })?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidConfiguration(format!(
            "base URL {:?} cannot have relative paths resolved against it",
            raw
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Settings collected while a [`crate::Client`] is being built.
#[derive(Debug)]
pub(crate) struct ClientConfig {
    pub(crate) base_url: Url,
    pub(crate) http_client: Option<reqwest::Client>,
    pub(crate) timeout: Duration,
    pub(crate) user_agent: HeaderValue,
}

impl ClientConfig {
    pub(crate) fn new() -> Result<Self, Error> {
        Ok(Self {
            base_url: to_url_with_ending_slash(BASE_URL)?,
            http_client: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: HeaderValue::from_static(DEFAULT_USER_AGENT),
        })
    }
}

/// An override applied while constructing a [`crate::Client`].
///
/// Options are applied in the order given; the first one that fails aborts
/// construction with its error.
#[derive(Debug, Clone)]
pub enum ClientOption {
    /// Send requests to another endpoint, e.g. a mock server.
    BaseUrl(String),
    /// Use a preconfigured HTTP client (proxies, TLS roots, pool settings).
    HttpClient(reqwest::Client),
    /// Per-request timeout. Must be non-zero.
    Timeout(Duration),
    /// Replace the default `User-Agent` header.
    UserAgent(String),
}

impl ClientOption {
    pub(crate) fn apply(self, config: &mut ClientConfig) -> Result<(), Error> {
        match self {
            ClientOption::BaseUrl(raw) => {
                config.base_url = to_url_with_ending_slash(&raw)?;
            }
            ClientOption::HttpClient(client) => {
                config.http_client = Some(client);
            }
            ClientOption::Timeout(timeout) => {
                if timeout.is_zero() {
                    return Err(Error::InvalidConfiguration(
                        "timeout must be greater than zero".to_string(),
                    ));
                }
                config.timeout = timeout;
            }
            ClientOption::UserAgent(agent) => {
                config.user_agent = HeaderValue::from_str(&agent).map_err(|_| {
                    Error::InvalidConfiguration(format!("invalid user agent {:?}", agent))
                })?;
            }
        }
        Ok(())
    }
}

/// Token and options read from the process environment.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub token: String,
    pub options: Vec<ClientOption>,
}

impl EnvConfig {
    /// Loads `.env` from the working directory when present, then reads the
    /// `UTHO_*` variables.
    pub fn load() -> Result<Self, Error> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("Ignoring unreadable .env file: {}", e);
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(API_KEY_VAR)
            .filter(|token| !token.trim().is_empty())
            .ok_or(Error::MissingCredential)?;

        let mut options = Vec::new();
        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|v| !v.is_empty()) {
            options.push(ClientOption::BaseUrl(base_url));
        }
        if let Some(raw) = lookup(TIMEOUT_VAR).filter(|v| !v.is_empty()) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    Error::InvalidConfiguration(format!(
                        "{} must be a positive number of seconds, got {:?}",
                        TIMEOUT_VAR, raw
                    ))
                })?;
            options.push(ClientOption::Timeout(Duration::from_secs(secs)));
        }

        Ok(Self { token, options })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn appends_missing_slash() {
        let url = to_url_with_ending_slash("https://api.example.com/v2").unwrap();
        insta::assert_snapshot!(url.as_str(), @"https://api.example.com/v2/");
    }

    #[test]
    fn keeps_existing_slash() {
        let url = to_url_with_ending_slash("https://api.utho.com/v2/").unwrap();
        assert_eq!(url.as_str(), "https://api.utho.com/v2/");

        let url = to_url_with_ending_slash("http://localhost:8080").unwrap();
        assert_eq!(url.path(), "/");
    }

    #[test]
    fn rejects_malformed_base_url() {
        let err = to_url_with_ending_slash("not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));

        let err = to_url_with_ending_slash("mailto:ops@example.com").unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn options_apply_in_order() {
        let mut config = ClientConfig::new().unwrap();
        ClientOption::BaseUrl("https://one.example.com".to_string())
            .apply(&mut config)
            .unwrap();
        ClientOption::BaseUrl("https://two.example.com/api".to_string())
            .apply(&mut config)
            .unwrap();
        assert_eq!(config.base_url.as_str(), "https://two.example.com/api/");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = ClientConfig::new().unwrap();
        let err = ClientOption::Timeout(Duration::ZERO)
            .apply(&mut config)
            .unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn invalid_user_agent_is_rejected() {
        let mut config = ClientConfig::new().unwrap();
        let err = ClientOption::UserAgent("bad\nagent".to_string())
            .apply(&mut config)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn env_requires_token() {
        let err = EnvConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, Error::MissingCredential));

        let err = EnvConfig::from_lookup(lookup(&[(API_KEY_VAR, "  ")])).unwrap_err();
        assert!(matches!(err, Error::MissingCredential));
    }

    #[test]
    fn env_reads_overrides() {
        let env = EnvConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "secret"),
            (BASE_URL_VAR, "http://localhost:9000/v2"),
            (TIMEOUT_VAR, "45"),
        ]))
        .unwrap();
        assert_eq!(env.token, "secret");
        assert_eq!(env.options.len(), 2);
        assert!(matches!(&env.options[0], ClientOption::BaseUrl(url) if url == "http://localhost:9000/v2"));
        assert!(matches!(env.options[1], ClientOption::Timeout(t) if t == Duration::from_secs(45)));
    }

    #[test]
    fn env_config_can_build_several_clients() {
        let env = EnvConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "secret"),
            (BASE_URL_VAR, "http://localhost:9000/v2"),
        ]))
        .unwrap();
        let first = crate::Client::with_options(&env.token, env.options.clone()).unwrap();
        let second = crate::Client::with_options(&env.token, env.options).unwrap();
        assert_eq!(first.base_url(), second.base_url());
        assert_eq!(first.base_url().as_str(), "http://localhost:9000/v2/");
    }

    #[test]
    fn env_rejects_bad_timeout() {
        for raw in ["soon", "0", "-3"] {
            let err = EnvConfig::from_lookup(lookup(&[(API_KEY_VAR, "secret"), (TIMEOUT_VAR, raw)]))
                .unwrap_err();
            assert!(matches!(err, Error::InvalidConfiguration(_)), "{}", raw);
        }
    }
}
