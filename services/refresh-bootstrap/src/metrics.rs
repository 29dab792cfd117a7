//! Refresh attempt counters.

use crate::error::RefreshError;
use crate::refresh::RefreshReport;
use rust_common::Counter;

/// Counters for every refresh attempt and how it ended.
#[derive(Debug)]
pub struct RefreshMetrics {
    /// Attempts started
    pub attempts: Counter,
    /// Attempts the endpoint accepted
    pub refreshed: Counter,
    /// Attempts rejected with a non-success status
    pub unauthenticated: Counter,
    /// Attempts that got no usable response
    pub transport_failures: Counter,
}

impl Default for RefreshMetrics {
    fn default() -> Self {
        Self::new("refresh_bootstrap")
    }
}

impl RefreshMetrics {
    /// Create metrics with the given name prefix.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            attempts: Counter::new(
                format!("{prefix}_attempts_total"),
                "Total number of refresh attempts",
            ),
            refreshed: Counter::new(
                format!("{prefix}_refreshed_total"),
                "Total number of successful refreshes",
            ),
            unauthenticated: Counter::new(
                format!("{prefix}_unauthenticated_total"),
                "Total number of refreshes rejected by the endpoint",
            ),
            transport_failures: Counter::new(
                format!("{prefix}_transport_failures_total"),
                "Total number of refreshes that failed in transport",
            ),
        }
    }

    /// Record how an attempt ended.
    pub fn record(&self, report: &RefreshReport) {
        match report {
            RefreshReport::Refreshed { .. } => self.refreshed.inc(),
            RefreshReport::Failed(RefreshError::Authentication { .. }) => {
                self.unauthenticated.inc();
            }
            RefreshReport::Failed(RefreshError::Transport(_)) => self.transport_failures.inc(),
        }
    }

    /// Format all metrics as Prometheus text.
    #[must_use]
    pub fn to_prometheus(&self) -> String {
        [
            &self.attempts,
            &self.refreshed,
            &self.unauthenticated,
            &self.transport_failures,
        ]
        .iter()
        .map(|c| c.to_prometheus())
        .collect()
    }
}
