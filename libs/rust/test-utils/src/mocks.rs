//! Mock implementations for testing.
//!
//! [`MockTransport`] stands in for the cookie-carrying HTTP client and
//! records every call; [`LogCapture`] collects formatted `tracing` output
//! so tests can assert on what was logged.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use rust_common::{PlatformError, Transport, TransportResponse};
use std::io;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

/// What a [`MockTransport`] answers with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    /// A response with the given status and body
    Response {
        /// HTTP status
        status: StatusCode,
        /// Raw body
        body: Vec<u8>,
    },
    /// Connection refused before any response
    ConnectionRefused,
    /// Request timed out
    Timeout,
}

impl MockReply {
    /// A response with the given status and body.
    #[must_use]
    pub fn response(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self::Response {
            status,
            body: body.into(),
        }
    }

    fn build(&self) -> Result<TransportResponse, PlatformError> {
        match self {
            Self::Response { status, body } => Ok(TransportResponse::new(*status, body.clone())),
            Self::ConnectionRefused => Err(PlatformError::unavailable(
                "error sending request: tcp connect error: Connection refused (os error 111)",
            )),
            Self::Timeout => Err(PlatformError::timeout("operation timed out")),
        }
    }
}

/// Mock transport for testing.
///
/// Clones share the same call log, so a test can keep one handle while
/// the bootstrap owns another.
#[derive(Debug, Clone)]
pub struct MockTransport {
    reply: MockReply,
    calls: Arc<RwLock<Vec<Url>>>,
}

impl MockTransport {
    /// Create a mock answering every call with `reply`.
    #[must_use]
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Mock answering with `status` and `body`.
    #[must_use]
    pub fn responding(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self::new(MockReply::response(status, body))
    }

    /// Mock whose every call is refused.
    #[must_use]
    pub fn refusing() -> Self {
        Self::new(MockReply::ConnectionRefused)
    }

    /// Get all URLs posted to.
    pub async fn calls(&self) -> Vec<Url> {
        self.calls.read().await.clone()
    }

    /// Get call count.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(&self, url: &Url) -> Result<TransportResponse, PlatformError> {
        self.calls.write().await.push(url.clone());
        self.reply.build()
    }
}

/// In-memory log sink.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Create an empty capture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Route this thread's `tracing` output into the capture until the
    /// guard is dropped.
    #[must_use]
    pub fn install(&self) -> DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Everything captured so far.
    #[must_use]
    pub fn contents(&self) -> String {
        let buf = self.buf.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Whether any captured line contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.contents().contains(needle)
    }

    /// Number of captured lines containing `needle`.
    #[must_use]
    pub fn count(&self, needle: &str) -> usize {
        self.contents().lines().filter(|l| l.contains(needle)).count()
    }
}

/// Writer handed out by [`LogCapture`].
#[derive(Debug)]
pub struct CaptureWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for CaptureWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            buf: Arc::clone(&self.buf),
        }
    }
}
