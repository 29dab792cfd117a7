//! The single refresh attempt.
//!
//! One POST to the refresh endpoint, cookies attached by the transport,
//! reduced to a [`RefreshReport`]. Every failure is logged and folded into
//! the report; nothing propagates to the caller.

use crate::config::{Config, EndpointVariant};
use crate::error::{BootstrapError, RefreshError};
use crate::metrics::RefreshMetrics;
use crate::refresh::report::{RefreshOutcome, RefreshReport, RefreshStatus};
use reqwest::Url;
use rust_common::{PlatformError, Transport, TransportResponse};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Issues the refresh request and interprets the response.
pub struct RefreshBootstrap<T> {
    transport: T,
    endpoint: Url,
    variant: EndpointVariant,
    metrics: Arc<RefreshMetrics>,
}

impl<T: Transport> RefreshBootstrap<T> {
    /// Create a bootstrap posting to `endpoint` through `transport`.
    pub fn new(transport: T, endpoint: Url, variant: EndpointVariant) -> Self {
        Self {
            transport,
            endpoint,
            variant,
            metrics: Arc::new(RefreshMetrics::default()),
        }
    }

    /// Create a bootstrap for the endpoint named by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL cannot be resolved.
    pub fn from_config(transport: T, config: &Config) -> Result<Self, BootstrapError> {
        Ok(Self::new(transport, config.endpoint_url()?, config.variant))
    }

    /// Share an existing metrics registry.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<RefreshMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Endpoint this bootstrap posts to.
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Handle to the attempt counters.
    pub fn metrics(&self) -> Arc<RefreshMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Attempt a refresh and return only whether it succeeded.
    pub async fn attempt_refresh(&self) -> RefreshOutcome {
        self.attempt_refresh_report().await.outcome()
    }

    /// Attempt a refresh and return the tagged result.
    #[instrument(skip(self), fields(endpoint = %self.endpoint, variant = %self.variant))]
    pub async fn attempt_refresh_report(&self) -> RefreshReport {
        self.metrics.attempts.inc();

        let report = match self.transport.post(&self.endpoint).await {
            Ok(response) => self.interpret(&response),
            Err(err) => RefreshReport::Failed(RefreshError::Transport(err)),
        };

        match &report {
            RefreshReport::Refreshed { status: Some(status) } => info!(
                status = status.status.as_deref().unwrap_or_default(),
                user = status.user.as_deref().unwrap_or_default(),
                "Access token refreshed"
            ),
            RefreshReport::Refreshed { status: None } => info!("Access token refreshed"),
            RefreshReport::Failed(RefreshError::Authentication { status }) => warn!(
                status = status.as_u16(),
                "{}",
                self.variant.rejection_message()
            ),
            RefreshReport::Failed(err @ RefreshError::Transport(_)) => {
                error!(error = %err, "Error refreshing token");
            }
        }

        self.metrics.record(&report);
        report
    }

    fn interpret(&self, response: &TransportResponse) -> RefreshReport {
        if !response.is_success() {
            return RefreshError::Authentication {
                status: response.status,
            }
            .into();
        }

        let payload = response.json::<Value>();
        if self.variant.requires_status_payload() {
            match payload {
                Ok(value) => match RefreshStatus::from_value(&value) {
                    Some(status) => RefreshReport::Refreshed {
                        status: Some(status),
                    },
                    None => RefreshError::Transport(PlatformError::invalid_input(
                        "refresh response body is null",
                    ))
                    .into(),
                },
                Err(err) => RefreshError::Transport(err).into(),
            }
        } else {
            // Body is informational here; an unreadable one is not a failure.
            RefreshReport::Refreshed {
                status: payload.ok().as_ref().and_then(RefreshStatus::from_value),
            }
        }
    }
}
