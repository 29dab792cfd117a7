//! Centralized configuration for the refresh bootstrap.
//!
//! All configuration is loaded from environment variables (after reading
//! an optional `.env` file) and validated at startup.

use crate::error::BootstrapError;
use reqwest::Url;
use rust_common::{HttpConfig, TracingConfig};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Which refresh endpoint flavour to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndpointVariant {
    /// `POST /refresh`; a status payload is logged if present but not required
    #[default]
    Refresh,
    /// `POST /refresh-token`; a 2xx body must be non-null JSON
    RefreshToken,
}

impl EndpointVariant {
    /// Path the variant posts to unless overridden.
    #[must_use]
    pub const fn default_path(self) -> &'static str {
        match self {
            Self::Refresh => "/refresh",
            Self::RefreshToken => "/refresh-token",
        }
    }

    /// Whether a successful response must carry a JSON body.
    #[must_use]
    pub const fn requires_status_payload(self) -> bool {
        matches!(self, Self::RefreshToken)
    }

    /// Log message for a rejected refresh.
    #[must_use]
    pub const fn rejection_message(self) -> &'static str {
        match self {
            Self::Refresh => "Refresh token failed, user not logged in",
            Self::RefreshToken => "Refresh token failed, user needs to login",
        }
    }

    /// Variant name as used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Refresh => "refresh",
            Self::RefreshToken => "refresh-token",
        }
    }
}

impl FromStr for EndpointVariant {
    type Err = BootstrapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "refresh" => Ok(Self::Refresh),
            "refresh-token" | "refresh_token" => Ok(Self::RefreshToken),
            _ => Err(BootstrapError::config(format!("Invalid refresh endpoint: {s}"))),
        }
    }
}

impl fmt::Display for EndpointVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Refresh bootstrap configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Origin the endpoint path is resolved against
    pub base_url: Url,
    /// Endpoint flavour
    pub variant: EndpointVariant,
    /// Explicit endpoint path, overriding the variant default
    pub path: Option<String>,
    /// `name=value` cookie seeded into the transport's jar
    pub session_cookie: Option<String>,
    /// Transport settings
    pub http: HttpConfig,
    /// Log sink settings
    pub tracing: TracingConfig,
}

impl Config {
    /// Create a configuration for `base_url` with defaults elsewhere.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL.
    pub fn new(base_url: &str, variant: EndpointVariant) -> Result<Self, BootstrapError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            variant,
            path: None,
            session_cookie: None,
            http: HttpConfig::default(),
            tracing: TracingConfig::default(),
        })
    }

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but invalid.
    pub fn from_env() -> Result<Self, BootstrapError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BootstrapError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url =
            lookup("REFRESH_BASE_URL").unwrap_or_else(|| "http://localhost:8080".to_string());
        let variant = lookup("REFRESH_ENDPOINT")
            .map(|v| v.parse())
            .transpose()?
            .unwrap_or_default();

        let mut config = Self::new(&base_url, variant)?;

        if let Some(path) = lookup("REFRESH_PATH") {
            config = config.with_path(path)?;
        }
        if let Some(cookie) = lookup("REFRESH_SESSION_COOKIE") {
            config = config.with_session_cookie(cookie)?;
        }

        let timeout = parse_var(&lookup, "HTTP_TIMEOUT_SECS", 30u64)?;
        if timeout == 0 {
            return Err(BootstrapError::config("HTTP_TIMEOUT_SECS must be positive"));
        }
        config.http = config.http.with_timeout(Duration::from_secs(timeout));

        config.tracing = config
            .tracing
            .with_log_level(lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()))
            .with_json_output(parse_var(&lookup, "LOG_JSON", false)?);

        Ok(config)
    }

    /// Override the endpoint path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty.
    pub fn with_path(mut self, path: impl Into<String>) -> Result<Self, BootstrapError> {
        let path = path.into();
        if path.trim().is_empty() {
            return Err(BootstrapError::config("REFRESH_PATH must not be empty"));
        }
        self.path = Some(path);
        Ok(self)
    }

    /// Set the session cookie to seed.
    ///
    /// # Errors
    ///
    /// Returns an error if the cookie is not of the form `name=value`.
    pub fn with_session_cookie(
        mut self,
        cookie: impl Into<String>,
    ) -> Result<Self, BootstrapError> {
        let cookie = cookie.into();
        match cookie.split_once('=') {
            Some((name, _)) if !name.trim().is_empty() => {
                self.session_cookie = Some(cookie);
                Ok(self)
            }
            _ => Err(BootstrapError::config(
                "REFRESH_SESSION_COOKIE must be name=value",
            )),
        }
    }

    /// Set the transport settings.
    #[must_use]
    pub fn with_http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Full URL of the refresh endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be joined onto the base URL.
    pub fn endpoint_url(&self) -> Result<Url, BootstrapError> {
        let path = self
            .path
            .as_deref()
            .unwrap_or(self.variant.default_path());
        self.base_url
            .join(path)
            .map_err(|e| BootstrapError::config(format!("Invalid refresh path {path}: {e}")))
    }
}

fn parse_base_url(raw: &str) -> Result<Url, BootstrapError> {
    let url = Url::parse(raw)
        .map_err(|e| BootstrapError::config(format!("Invalid REFRESH_BASE_URL: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(BootstrapError::config(format!(
            "REFRESH_BASE_URL cannot be a base: {raw}"
        )));
    }
    Ok(url)
}

/// Parse a variable with a default value.
fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T, BootstrapError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(name) {
        Some(val) => val
            .trim()
            .parse()
            .map_err(|e| BootstrapError::config(format!("Invalid {name}: {e}"))),
        None => Ok(default),
    }
}
