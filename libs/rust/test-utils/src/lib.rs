//! Shared test utilities for the refresh bootstrap.
//!
//! This crate provides:
//! - Proptest generators for status codes and transport failures
//! - A scriptable mock transport and an in-memory log sink
//! - Refresh endpoint payload fixtures

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod mocks;

pub use generators::*;
pub use mocks::{LogCapture, MockReply, MockTransport};
