//! Shared proptest generators.

use crate::mocks::MockReply;
use proptest::prelude::*;
use reqwest::StatusCode;

/// Generate any status in the 2xx range.
pub fn success_status_strategy() -> impl Strategy<Value = StatusCode> {
    (200u16..300).prop_map(status)
}

/// Generate any valid status outside the 2xx range.
pub fn failure_status_strategy() -> impl Strategy<Value = StatusCode> {
    prop_oneof![
        (100u16..200).prop_map(status),
        (300u16..600).prop_map(status),
        Just(StatusCode::UNAUTHORIZED),
        Just(StatusCode::FORBIDDEN),
    ]
}

/// Generate a failure that prevents any response from arriving.
pub fn transport_failure_strategy() -> impl Strategy<Value = MockReply> {
    prop_oneof![Just(MockReply::ConnectionRefused), Just(MockReply::Timeout)]
}

/// Generate the human-readable `status` text of a refresh payload.
pub fn status_message_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("access token refreshed".to_string()),
        Just("ok".to_string()),
        "[a-zA-Z0-9 ]{1,40}",
    ]
}

/// Generate a response body that is not JSON.
pub fn non_json_body_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("<html><body>ok</body></html>".to_string()),
        Just(String::new()),
        "[a-zA-Z ]{1,40}".prop_filter("JSON keyword", |s| {
            !matches!(s.trim(), "true" | "false" | "null")
        }),
    ]
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}
