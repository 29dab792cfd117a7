//! One-shot startup hook.
//!
//! A [`LoadHook`] stands for one application load. The host calls
//! [`LoadHook::fire`] (or [`LoadHook::spawn`]) from its startup sequence;
//! the first call performs the refresh attempt and every later call is a
//! no-op.

use crate::refresh::bootstrap::RefreshBootstrap;
use crate::refresh::report::RefreshReport;
use rust_common::Transport;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::task::JoinHandle;
use tracing::debug;

/// Runs the refresh attempt exactly once per load.
pub struct LoadHook<T> {
    bootstrap: Arc<RefreshBootstrap<T>>,
    fired: AtomicBool,
}

impl<T: Transport + 'static> LoadHook<T> {
    /// Create a hook that owns its bootstrap.
    pub fn new(bootstrap: RefreshBootstrap<T>) -> Self {
        Self::shared(Arc::new(bootstrap))
    }

    /// Create a hook over a bootstrap shared with other loads.
    pub const fn shared(bootstrap: Arc<RefreshBootstrap<T>>) -> Self {
        Self {
            bootstrap,
            fired: AtomicBool::new(false),
        }
    }

    /// Whether the hook has already run.
    pub fn fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    /// Run the refresh attempt if this hook has not fired yet.
    ///
    /// Returns `None` when the hook already fired.
    pub async fn fire(&self) -> Option<RefreshReport> {
        if self.fired.swap(true, Ordering::AcqRel) {
            debug!(endpoint = %self.bootstrap.endpoint(), "Load hook already fired");
            return None;
        }
        Some(self.bootstrap.attempt_refresh_report().await)
    }

    /// Fire the hook on a background task.
    ///
    /// The handle may be dropped; the attempt still runs to completion.
    pub fn spawn(self) -> JoinHandle<Option<RefreshReport>> {
        tokio::spawn(async move { self.fire().await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EndpointVariant;
    use reqwest::{StatusCode, Url};
    use test_utils::MockTransport;

    fn shared_bootstrap() -> (MockTransport, Arc<RefreshBootstrap<MockTransport>>) {
        let transport = MockTransport::responding(StatusCode::OK, "");
        let url = Url::parse("http://localhost:8080/refresh").unwrap();
        let bootstrap = RefreshBootstrap::new(transport.clone(), url, EndpointVariant::Refresh);
        (transport, Arc::new(bootstrap))
    }

    #[tokio::test]
    async fn test_fires_once() {
        let (transport, bootstrap) = shared_bootstrap();
        let hook = LoadHook::shared(Arc::clone(&bootstrap));
        assert!(!hook.fired());

        assert!(hook.fire().await.is_some_and(|r| r.outcome()));
        assert!(hook.fired());
        assert!(hook.fire().await.is_none());

        assert_eq!(transport.call_count().await, 1);
        assert_eq!(bootstrap.metrics().attempts.get(), 1);
    }

    #[tokio::test]
    async fn test_each_load_gets_its_own_attempt() {
        let (transport, bootstrap) = shared_bootstrap();
        for _ in 0..3 {
            let hook = LoadHook::shared(Arc::clone(&bootstrap));
            hook.fire().await;
            hook.fire().await;
        }
        assert_eq!(transport.call_count().await, 3);
    }

    #[tokio::test]
    async fn test_spawn_runs_to_completion() {
        let (_, bootstrap) = shared_bootstrap();
        let report = LoadHook::shared(Arc::clone(&bootstrap))
            .spawn()
            .await
            .unwrap();
        assert!(report.is_some_and(|r| r.outcome()));
        assert_eq!(bootstrap.metrics().refreshed.get(), 1);
    }
}
