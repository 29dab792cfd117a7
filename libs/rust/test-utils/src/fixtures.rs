//! Test fixtures with sample data.
//!
//! Bodies mirror what the server's `/api/refresh` handlers send.

use reqwest::StatusCode;
use serde_json::json;

/// Status the `/refresh-token` script expects, without the identity fields
/// the server adds (see [`refreshed_with_user_body`]).
pub const REFRESHED_BODY: &str = r#"{"status":"access token refreshed"}"#;

/// Body sent by the plain `/api/refresh` handler on success.
pub const OK_BODY: &str = r#"{"status":"ok"}"#;

/// Plain-text body sent when the refresh cookie is missing.
pub const MISSING_TOKEN_BODY: &str = "no refresh token\n";

/// Plain-text body sent when the refresh cookie does not verify.
pub const INVALID_TOKEN_BODY: &str = "invalid refresh token\n";

/// Session cookie as stored by the login endpoint.
pub const SESSION_COOKIE: &str = "refresh_token=eyJhbGciOiJIUzI1NiJ9.session";

/// Body sent by the `/api/refresh` handler that echoes the refreshed
/// identity back.
#[must_use]
pub fn refreshed_with_user_body(user: &str, user_id: i64, admin: i64) -> String {
    json!({
        "status": "access token refreshed",
        "user": user,
        "user_id": user_id,
        "admin": admin,
    })
    .to_string()
}

/// Statuses the refresh endpoints answer rejected credentials with.
#[must_use]
pub const fn rejection_statuses() -> [StatusCode; 3] {
    [
        StatusCode::UNAUTHORIZED,
        StatusCode::FORBIDDEN,
        StatusCode::INTERNAL_SERVER_ERROR,
    ]
}
