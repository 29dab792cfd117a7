//! Error types for the refresh bootstrap.
//!
//! [`RefreshError`] never escapes a refresh attempt; it is carried inside
//! a [`RefreshReport`](crate::refresh::RefreshReport) so callers can tell
//! the two failure kinds apart. [`BootstrapError`] covers host setup.

use reqwest::StatusCode;
use rust_common::PlatformError;
use thiserror::Error;

/// Why a refresh attempt did not succeed.
#[derive(Error, Debug)]
pub enum RefreshError {
    /// Endpoint was reachable but refused the session credentials
    #[error("Refresh rejected with status {status}")]
    Authentication {
        /// Status returned by the endpoint
        status: StatusCode,
    },

    /// No usable response: network failure, timeout or malformed body
    #[error("Refresh transport failed: {0}")]
    Transport(#[from] PlatformError),
}

impl RefreshError {
    /// Short label used in logs and metrics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Authentication { .. } => "authentication",
            Self::Transport(_) => "transport",
        }
    }

    /// Whether the caller needs to log in again.
    #[must_use]
    pub const fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }
}

/// Errors raised while setting up the bootstrap host.
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport could not be built
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

impl BootstrapError {
    /// Create a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
