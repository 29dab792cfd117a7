//! Shared plumbing for the refresh bootstrap.
//!
//! This crate provides:
//! - Transport error type
//! - HTTP client building with a cookie jar, and the [`Transport`] seam
//! - Tracing subscriber setup
//! - Prometheus-style counters

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod http;
pub mod metrics;
pub mod tracing_config;

pub use error::PlatformError;
pub use http::{HttpConfig, HttpTransport, Transport, TransportResponse, build_http_client};
pub use metrics::Counter;
pub use tracing_config::{TracingConfig, init_tracing};
