//! Refresh bootstrap library.
//!
//! On application start, posts once to a token-refresh endpoint with the
//! stored session cookies and reports whether the access token was renewed.
//! Failures are logged and reduced to a `false` outcome; they never reach
//! the caller as errors.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod metrics;
pub mod refresh;

use rust_common::HttpTransport;

// Re-exports for convenience
pub use config::{Config, EndpointVariant};
pub use error::{BootstrapError, RefreshError};
pub use metrics::RefreshMetrics;
pub use refresh::{LoadHook, RefreshBootstrap, RefreshOutcome, RefreshReport, RefreshStatus};

/// Build the cookie-carrying transport described by `config`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the configured
/// session cookie is rejected.
pub fn build_transport(config: &Config) -> Result<HttpTransport, BootstrapError> {
    let transport = HttpTransport::new(&config.http)?;
    match &config.session_cookie {
        Some(cookie) => Ok(transport.with_session_cookie(cookie, &config.base_url)?),
        None => Ok(transport),
    }
}
