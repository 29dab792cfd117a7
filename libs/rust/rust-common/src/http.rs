//! HTTP client configuration and the credentialed transport seam.
//!
//! The transport owns the cookie jar. Callers hand it a URL and get back
//! a status plus raw body; they never see or mutate the stored session
//! credentials, which ride along on every request automatically.

use crate::error::PlatformError;
use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::{Client, ClientBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout (default: 30s)
    pub timeout: Duration,
    /// Connection timeout (default: 10s)
    pub connect_timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!("refresh-bootstrap/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpConfig {
    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Build a configured HTTP client backed by the given cookie jar.
///
/// # Errors
///
/// Returns an error if the client cannot be built (e.g., TLS initialization fails).
///
/// # Examples
///
/// ```
/// use rust_common::{HttpConfig, build_http_client};
/// use reqwest::cookie::Jar;
/// use std::sync::Arc;
///
/// let client = build_http_client(&HttpConfig::default(), Arc::new(Jar::default()))
///     .expect("Failed to build client");
/// ```
pub fn build_http_client(config: &HttpConfig, jar: Arc<Jar>) -> Result<Client, reqwest::Error> {
    ClientBuilder::new()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(&config.user_agent)
        .cookie_provider(jar)
        .use_rustls_tls()
        .build()
}

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Raw response body
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Create a response from its parts.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Serialization`] if the body is not valid JSON
    /// for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, PlatformError> {
        serde_json::from_slice(&self.body).map_err(PlatformError::from)
    }
}

/// A transport that sends requests with ambient credentials attached.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send an empty-bodied POST to `url`.
    ///
    /// A response with any status is `Ok`; only failures to obtain a
    /// response at all are `Err`.
    async fn post(&self, url: &Url) -> Result<TransportResponse, PlatformError>;
}

/// [`Transport`] backed by a reqwest client with a cookie store.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    jar: Arc<Jar>,
}

impl HttpTransport {
    /// Create a transport with an empty cookie jar.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be built.
    pub fn new(config: &HttpConfig) -> Result<Self, PlatformError> {
        Self::with_jar(config, Arc::new(Jar::default()))
    }

    /// Create a transport sharing an existing cookie jar.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be built.
    pub fn with_jar(config: &HttpConfig, jar: Arc<Jar>) -> Result<Self, PlatformError> {
        let client = build_http_client(config, Arc::clone(&jar))?;
        Ok(Self { client, jar })
    }

    /// Seed a `name=value` session cookie for `url` into the jar.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::InvalidInput`] if the cookie has no name.
    pub fn with_session_cookie(self, cookie: &str, url: &Url) -> Result<Self, PlatformError> {
        match cookie.split_once('=') {
            Some((name, _)) if !name.trim().is_empty() => {
                self.jar.add_cookie_str(cookie, url);
                Ok(self)
            }
            _ => Err(PlatformError::invalid_input(format!(
                "session cookie must be name=value, got {cookie:?}"
            ))),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, url), fields(url = %url))]
    async fn post(&self, url: &Url) -> Result<TransportResponse, PlatformError> {
        let response = self
            .client
            .post(url.clone())
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        let body = response.bytes().await.map_err(classify)?.to_vec();
        debug!(status = status.as_u16(), body_len = body.len(), "Received response");

        Ok(TransportResponse::new(status, body))
    }
}

fn classify(err: reqwest::Error) -> PlatformError {
    if err.is_timeout() {
        PlatformError::timeout(err.to_string())
    } else if err.is_connect() {
        PlatformError::unavailable(err.to_string())
    } else {
        PlatformError::Http(err)
    }
}
