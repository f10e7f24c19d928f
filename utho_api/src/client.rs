//! HTTP client for the Utho v2 API.

use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT_ENCODING, AUTHORIZATION, CONTENT_TYPE, USER_AGENT},
    Method, Request, StatusCode,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

use crate::{
    config::{ClientConfig, ClientOption, EnvConfig},
    services::{AccountService, ApiKeyService, CloudInstanceService},
    types::{null_as_default, ApiStatus},
    ApiError, Error,
};

/// HTTP client for the Utho v2 API.
///
/// Holds one pooled `reqwest::Client` and the bearer token. Cloning is cheap
/// and clones share the connection pool, so a single client can serve many
/// concurrent tasks. The resource accessors ([`Client::cloud_instances`] and
/// friends) borrow the client and carry no state of their own.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    bearer: HeaderValue,
    user_agent: HeaderValue,
    timeout: Duration,
}

impl Client {
    /// Creates a client for the production API with default settings.
    pub fn new(token: &str) -> Result<Self, Error> {
        Self::with_options(token, std::iter::empty())
    }

    /// Creates a client and applies `options` in order. The first option
    /// that fails aborts construction.
    pub fn with_options<I>(token: &str, options: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = ClientOption>,
    {
        if token.trim().is_empty() {
            tracing::error!("Refusing to build a client without an API token");
            return Err(Error::MissingCredential);
        }

        let mut config = ClientConfig::new()?;
        for option in options {
            option.apply(&mut config)?;
        }

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            Error::InvalidConfiguration(
                "API token contains characters not allowed in an HTTP header".to_string(),
            )
        })?;
        bearer.set_sensitive(true);

        let http = match config.http_client {
            Some(http) => http,
            None => reqwest::Client::builder().build().map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::InvalidConfiguration(format!("failed to build HTTP client: {}", e))
            })?,
        };

        Ok(Self {
            http,
            base_url: config.base_url,
            bearer,
            user_agent: config.user_agent,
            timeout: config.timeout,
        })
    }

    /// Creates a client from `UTHO_API_KEY`, `UTHO_BASE_URL` and
    /// `UTHO_TIMEOUT_SECS`, reading a `.env` file first when one exists.
    pub fn from_env() -> Result<Self, Error> {
        let env = EnvConfig::load()?;
        Self::with_options(&env.token, env.options)
    }

    /// Base URL every resource path is resolved against. Always ends with `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn account(&self) -> AccountService<'_> {
        AccountService::new(self)
    }

    pub fn api_keys(&self) -> ApiKeyService<'_> {
        ApiKeyService::new(self)
    }

    pub fn cloud_instances(&self) -> CloudInstanceService<'_> {
        CloudInstanceService::new(self)
    }

    /// Resolves a relative resource path against the base URL. Paths must not
    /// start with `/`, otherwise the base path would be discarded.
    pub fn resolve(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path).map_err(|e| {
            tracing::error!("Cannot resolve path {:?}: {}", path, e);
            Error::InvalidRequest(format!("cannot resolve path {:?}: {}", path, e))
        })
    }

    /// Builds a request for `path` with an optional JSON body.
    ///
    /// The `Authorization` header is not set here; [`Client::execute`] adds
    /// it right before the request goes out.
    pub fn new_request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Request, Error>
    where
        B: Serialize + ?Sized,
    {
        let url = self.resolve(path)?;
        let mut builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT_ENCODING, "application/json")
            .header(USER_AGENT, self.user_agent.clone())
            .timeout(self.timeout);

        if let Some(body) = body {
            // serde_json leaves <, > and & unescaped
            let encoded = serde_json::to_vec(body).map_err(|e| {
                tracing::error!("Failed to serialize body for {:?}: {}", path, e);
                Error::Serialization(e)
            })?;
            builder = builder.body(encoded);
        }

        builder.build().map_err(|e| {
            tracing::error!("Failed to build request for {:?}: {}", path, e);
            Error::InvalidRequest(e.to_string())
        })
    }

    /// Authenticates and sends `request`, buffering the whole body.
    ///
    /// Statuses outside `[200, 400)` come back as [`Error::Api`] with the
    /// decoded error envelope; the body of a successful response is left for
    /// the caller to decode.
    pub async fn execute(&self, mut request: Request) -> Result<RawResponse, Error> {
        request
            .headers_mut()
            .insert(AUTHORIZATION, self.bearer.clone());

        let method = request.method().clone();
        let url = request.url().clone();
        tracing::debug!("{} {}", method, url);

        let resp = self.http.execute(request).await.map_err(|e| {
            tracing::error!("Failed to send {} {}: {}", method, url, e);
            Error::Transport(e)
        })?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.bytes().await.map_err(|e| {
            tracing::error!("Failed to read response body of {} {}: {}", method, url, e);
            Error::Transport(e)
        })?;
        tracing::debug!("{} {} -> {}", method, url, status);

        check_for_errors(RawResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }

    /// Sends `request`, decodes the body into `T` and checks the embedded
    /// `status` field. Every resource method goes through here so that a
    /// `{"status": "failed"}` body is never mistaken for a result.
    pub async fn send<T>(&self, request: Request) -> Result<T, Error>
    where
        T: DeserializeOwned + Default + ApiStatus,
    {
        let response = self.execute(request).await?;
        let value = response.json::<T>()?;
        response.check_status(&value)?;
        Ok(value)
    }
}

/// A response whose status fell inside the success band, with its body
/// already read.
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl RawResponse {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Decodes the body as JSON. An empty body yields `T::default()`.
    pub fn json<T>(&self) -> Result<T, Error>
    where
        T: DeserializeOwned + Default,
    {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(T::default());
        }
        serde_json::from_slice(&self.body).map_err(|e| {
            let snippet = truncate_body(&self.body);
            // bodies can carry secrets (passwords, API keys)
            tracing::error!("Failed to parse response with status {}: {}", self.status, e);
            tracing::debug!("Unparseable body: {}", snippet);
            Error::Decode {
                source: e,
                body: snippet,
            }
        })
    }

    /// Fails with [`Error::Api`] when `value` reports an explicit
    /// non-success status, even though the HTTP exchange succeeded.
    pub fn check_status<T>(&self, value: &T) -> Result<(), Error>
    where
        T: ApiStatus + ?Sized,
    {
        if value.is_success() {
            return Ok(());
        }
        tracing::error!(
            "API reported status {:?} with HTTP {}: {}",
            value.status(),
            self.status,
            value.message()
        );
        Err(self.api_error(value.status(), value.message()))
    }

    /// An [`Error::Api`] tied to this response.
    pub fn api_error(&self, status: &str, message: &str) -> Error {
        Error::Api(ApiError {
            status_code: self.status,
            headers: self.headers.clone(),
            status: status.to_string(),
            message: message.to_string(),
        })
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ErrorEnvelope {
    #[serde(deserialize_with = "null_as_default")]
    status: String,
    #[serde(deserialize_with = "null_as_default")]
    message: String,
}

/// Structural success is the half-open band `[200, 400)`.
pub(crate) fn is_success_band(status: StatusCode) -> bool {
    (200..400).contains(&status.as_u16())
}

fn check_for_errors(response: RawResponse) -> Result<RawResponse, Error> {
    if is_success_band(response.status) {
        return Ok(response);
    }

    // not every error body is JSON
    let envelope: ErrorEnvelope = serde_json::from_slice(&response.body).unwrap_or_default();
    tracing::error!(
        "Request failed with status {}: {}",
        response.status,
        envelope.message
    );
    tracing::debug!("Error body: {}", truncate_body(&response.body));
    Err(Error::Api(ApiError {
        status_code: response.status,
        headers: response.headers,
        status: envelope.status,
        message: envelope.message,
    }))
}

fn truncate_body(body: &[u8]) -> String {
    const MAX: usize = 2000;
    let text = String::from_utf8_lossy(body);
    if text.chars().count() <= MAX {
        text.into_owned()
    } else {
        format!("{}...[truncated]", text.chars().take(MAX).collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> Client {
        Client::with_options(
            "tok",
            [ClientOption::BaseUrl("https://api.example.com/v2".to_string())],
        )
        .unwrap()
    }

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[derive(Deserialize, Default, Debug, PartialEq)]
    struct Widget {
        #[serde(default)]
        status: String,
        #[serde(default)]
        message: String,
        #[serde(default)]
        id: String,
        #[serde(default)]
        name: String,
    }

    impl ApiStatus for Widget {
        fn status(&self) -> &str {
            &self.status
        }

        fn message(&self) -> &str {
            &self.message
        }
    }

    #[test]
    fn empty_token_is_rejected() {
        for token in ["", "   "] {
            let err = Client::new(token).unwrap_err();
            assert!(matches!(err, Error::MissingCredential));
            assert!(err.is_configuration());
        }
    }

    #[test]
    fn token_must_fit_in_a_header() {
        let err = Client::new("tok\nen").unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn failing_option_aborts_construction() {
        let err = Client::with_options(
            "tok",
            [
                ClientOption::Timeout(Duration::from_secs(10)),
                ClientOption::BaseUrl("::not a url::".to_string()),
                ClientOption::Timeout(Duration::ZERO),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(msg) if msg.contains("base URL")));
    }

    #[test]
    fn default_base_url() {
        let client = Client::new("tok").unwrap();
        assert_eq!(client.base_url().as_str(), "https://api.utho.com/v2/");
    }

    #[test]
    fn resolves_relative_paths() {
        let client = client();
        insta::assert_snapshot!(client.resolve("widgets/123").unwrap().as_str(), @"https://api.example.com/v2/widgets/123");
        insta::assert_snapshot!(client.resolve("cloud/42/snapshot/7/restore").unwrap().as_str(), @"https://api.example.com/v2/cloud/42/snapshot/7/restore");
        // a leading slash escapes the versioned base path
        insta::assert_snapshot!(client.resolve("/widgets").unwrap().as_str(), @"https://api.example.com/widgets");
    }

    #[test]
    fn request_carries_fixed_headers_but_no_auth() {
        let req = client()
            .new_request::<()>(Method::GET, "widgets/123", None)
            .unwrap();
        assert_eq!(req.method(), Method::GET);
        assert_eq!(req.url().as_str(), "https://api.example.com/v2/widgets/123");
        assert_eq!(req.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(req.headers()[ACCEPT_ENCODING], "application/json");
        assert!(req.headers().get(USER_AGENT).is_some());
        assert!(req.headers().get(AUTHORIZATION).is_none());
        assert!(req.body().is_none());
        assert_eq!(req.timeout(), Some(&crate::config::DEFAULT_TIMEOUT));
    }

    #[test]
    fn body_keeps_html_characters_verbatim() {
        let payload = json!({"name": "<a href=\"x\">Tom & Jerry</a>", "write": "1"});
        let req = client()
            .new_request(Method::POST, "api/generate", Some(&payload))
            .unwrap();
        let body = req.body().and_then(|b| b.as_bytes()).unwrap();
        let text = std::str::from_utf8(body).unwrap();
        assert!(text.contains("<a href=\\\"x\\\">Tom & Jerry</a>"));
        assert!(!text.contains("\\u003c"));

        let decoded: serde_json::Value = serde_json::from_slice(body).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn unserializable_body_fails() {
        use std::collections::HashMap;

        // JSON object keys must be strings
        let mut payload = HashMap::new();
        payload.insert(vec![1u8], "x");
        let err = client()
            .new_request(Method::POST, "widgets", Some(&payload))
            .unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn success_band_boundaries() {
        let band = |code| is_success_band(StatusCode::from_u16(code).unwrap());
        assert!(!band(199));
        assert!(band(200));
        assert!(band(204));
        assert!(band(302));
        assert!(band(399));
        assert!(!band(400));
        assert!(!band(404));
        assert!(!band(500));
    }

    #[test]
    fn error_status_decodes_envelope() {
        let err = check_for_errors(raw(404, r#"{"status":"failed","message":"not found"}"#))
            .unwrap_err();
        match err {
            Error::Api(e) => {
                assert_eq!(e.status_code, StatusCode::NOT_FOUND);
                assert_eq!(e.status, "failed");
                assert_eq!(e.message, "not found");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn error_status_with_null_message_keeps_status() {
        let err = check_for_errors(raw(409, r#"{"status":"failed","message":null}"#))
            .unwrap_err();
        match err {
            Error::Api(e) => {
                assert_eq!(e.status_code, StatusCode::CONFLICT);
                assert_eq!(e.status, "failed");
                assert_eq!(e.message, "");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn error_status_with_unparseable_body() {
        for body in ["", "<html>Bad Gateway</html>", "[1,2,3]"] {
            let err = check_for_errors(raw(502, body)).unwrap_err();
            assert_eq!(err.status_code(), Some(StatusCode::BAD_GATEWAY));
            assert_eq!(err.message(), None);
        }
    }

    #[test]
    fn decodes_success_body() {
        let resp = check_for_errors(raw(
            200,
            r#"{"status":"success","id":"123","name":"foo"}"#,
        ))
        .unwrap();
        let widget: Widget = resp.json().unwrap();
        assert_eq!(widget.id, "123");
        assert_eq!(widget.name, "foo");
        assert!(resp.check_status(&widget).is_ok());
    }

    #[test]
    fn empty_success_body_yields_default() {
        let widget: Widget = raw(204, "").json().unwrap();
        assert_eq!(widget, Widget::default());
    }

    #[test]
    fn malformed_success_body_is_a_decode_error() {
        let err = raw(200, "{not valid json}").json::<Widget>().unwrap_err();
        assert!(matches!(err, Error::Decode { body, .. } if body == "{not valid json}"));
    }

    #[test]
    fn embedded_failure_is_an_api_error() {
        let resp = raw(200, r#"{"status":"failed","message":"quota exceeded"}"#);
        let widget: Widget = resp.json().unwrap();
        let err = resp.check_status(&widget).unwrap_err();
        assert_eq!(err.message(), Some("quota exceeded"));
        assert_eq!(err.status_code(), Some(StatusCode::OK));
    }

    #[test]
    fn truncates_long_bodies() {
        let body = "é".repeat(2500);
        let snippet = truncate_body(body.as_bytes());
        assert!(snippet.ends_with("...[truncated]"));
        assert_eq!(snippet.chars().count(), 2000 + "...[truncated]".len());
    }
}
