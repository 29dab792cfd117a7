//! What a refresh attempt produced.

use crate::error::RefreshError;
use serde_json::Value;

/// `true` if the endpoint accepted the session credentials.
pub type RefreshOutcome = bool;

/// Status payload returned alongside a successful refresh.
///
/// Every field is optional: servers that echo the refreshed identity back
/// fill in the rest, and a field of the wrong type is read as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshStatus {
    /// Human-readable status, e.g. `"ok"`
    pub status: Option<String>,
    /// Username of the refreshed session
    pub user: Option<String>,
    /// Numeric user ID
    pub user_id: Option<i64>,
    /// Role level
    pub admin: Option<i64>,
}

impl RefreshStatus {
    /// Read the payload fields out of a decoded response body.
    ///
    /// Returns `None` for a JSON `null`, which carries no payload at all.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            return None;
        }
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_owned);
        let number = |key: &str| value.get(key).and_then(Value::as_i64);
        Some(Self {
            status: text("status"),
            user: text("user"),
            user_id: number("user_id"),
            admin: number("admin"),
        })
    }
}

/// Tagged result of a single refresh attempt.
#[derive(Debug)]
pub enum RefreshReport {
    /// Endpoint returned a success status
    Refreshed {
        /// Parsed status payload, when one was present
        status: Option<RefreshStatus>,
    },
    /// Attempt failed
    Failed(RefreshError),
}

impl RefreshReport {
    /// Reduce the report to its boolean outcome.
    #[must_use]
    pub const fn outcome(&self) -> RefreshOutcome {
        matches!(self, Self::Refreshed { .. })
    }

    /// The failure, if the attempt did not succeed.
    #[must_use]
    pub const fn error(&self) -> Option<&RefreshError> {
        match self {
            Self::Refreshed { .. } => None,
            Self::Failed(err) => Some(err),
        }
    }

    /// The status payload, if the attempt succeeded with one.
    #[must_use]
    pub const fn status(&self) -> Option<&RefreshStatus> {
        match self {
            Self::Refreshed { status } => status.as_ref(),
            Self::Failed(_) => None,
        }
    }
}

impl From<RefreshError> for RefreshReport {
    fn from(err: RefreshError) -> Self {
        Self::Failed(err)
    }
}
