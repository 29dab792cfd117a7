//! End-to-end tests against a mock refresh endpoint over real HTTP.

use refresh_bootstrap::{
    Config, EndpointVariant, LoadHook, RefreshBootstrap, RefreshError, build_transport,
};
use rust_common::HttpConfig;
use std::time::Duration;
use test_utils::LogCapture;
use test_utils::fixtures::{
    INVALID_TOKEN_BODY, OK_BODY, REFRESHED_BODY, SESSION_COOKIE, refreshed_with_user_body,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, variant: EndpointVariant) -> Config {
    Config::new(&server.uri(), variant)
        .unwrap()
        .with_http(HttpConfig::default().with_timeout(Duration::from_secs(5)))
}

fn bootstrap_for(config: &Config) -> RefreshBootstrap<rust_common::HttpTransport> {
    RefreshBootstrap::from_config(build_transport(config).unwrap(), config).unwrap()
}

/// Address with nothing listening on it.
fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[tokio::test]
async fn refreshed_status_payload_yields_true() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/refresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(REFRESHED_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let logs = LogCapture::new();
    let _guard = logs.install();

    let config = config_for(&server, EndpointVariant::RefreshToken);
    let report = bootstrap_for(&config).attempt_refresh_report().await;

    assert!(report.outcome());
    assert_eq!(
        report.status().and_then(|s| s.status.as_deref()),
        Some("access token refreshed")
    );
    assert!(logs.contains("Access token refreshed"));
}

#[tokio::test]
async fn unauthorized_yields_false_without_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_string(INVALID_TOKEN_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let logs = LogCapture::new();
    let _guard = logs.install();

    let config = config_for(&server, EndpointVariant::Refresh);
    let bootstrap = bootstrap_for(&config);

    assert!(!bootstrap.attempt_refresh().await);
    assert!(logs.contains("Refresh token failed, user not logged in"));
    assert!(logs.contains("status=401"));
    assert_eq!(bootstrap.metrics().unauthenticated.get(), 1);
}

#[tokio::test]
async fn connection_refused_yields_false_and_is_logged() {
    let logs = LogCapture::new();
    let _guard = logs.install();

    let config = Config::new(&closed_port_url(), EndpointVariant::Refresh).unwrap();
    let report = bootstrap_for(&config).attempt_refresh_report().await;

    assert!(!report.outcome());
    assert!(matches!(report.error(), Some(RefreshError::Transport(e)) if e.is_connection_error()));
    assert!(logs.contains("Error refreshing token"));
    assert!(logs.contains("ERROR"));
}

#[tokio::test]
async fn session_cookie_is_sent_with_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/refresh"))
        .and(header("cookie", SESSION_COOKIE))
        .respond_with(ResponseTemplate::new(200).set_body_string(OK_BODY))
        .expect(1)
        .mount(&server)
        .await;
    // Anything without the cookie is rejected the way the endpoint does.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let config = config_for(&server, EndpointVariant::Refresh)
        .with_session_cookie(SESSION_COOKIE)
        .unwrap();

    assert!(bootstrap_for(&config).attempt_refresh().await);
}

#[tokio::test]
async fn missing_cookie_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/refresh"))
        .and(header("cookie", SESSION_COOKIE))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server, EndpointVariant::Refresh);
    assert!(!bootstrap_for(&config).attempt_refresh().await);
}

#[tokio::test]
async fn refresh_token_variant_rejects_non_json_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/refresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let logs = LogCapture::new();
    let _guard = logs.install();

    let config = config_for(&server, EndpointVariant::RefreshToken);
    let report = bootstrap_for(&config).attempt_refresh_report().await;

    assert!(!report.outcome());
    assert!(matches!(report.error(), Some(RefreshError::Transport(_))));
    assert!(logs.contains("Error refreshing token"));
}

#[tokio::test]
async fn refresh_token_variant_accepts_json_without_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/refresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status":1}"#))
        .mount(&server)
        .await;

    let logs = LogCapture::new();
    let _guard = logs.install();

    let config = config_for(&server, EndpointVariant::RefreshToken);
    let report = bootstrap_for(&config).attempt_refresh_report().await;

    assert!(report.outcome());
    assert!(report.status().is_some_and(|s| s.status.is_none()));
    assert!(logs.contains("Access token refreshed"));
}

#[tokio::test]
async fn refresh_variant_ignores_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/refresh"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let config = config_for(&server, EndpointVariant::Refresh);
    let report = bootstrap_for(&config).attempt_refresh_report().await;

    assert!(report.outcome());
    assert!(report.status().is_none());
}

#[tokio::test]
async fn identity_payload_is_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/refresh"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(refreshed_with_user_body("anna", 7, 1)),
        )
        .mount(&server)
        .await;

    let config = config_for(&server, EndpointVariant::RefreshToken)
        .with_path("/api/refresh")
        .unwrap();
    let report = bootstrap_for(&config).attempt_refresh_report().await;

    let status = report.status().unwrap();
    assert_eq!(status.user.as_deref(), Some("anna"));
    assert_eq!(status.user_id, Some(7));
    assert_eq!(status.admin, Some(1));
}

#[tokio::test]
async fn load_hook_triggers_exactly_one_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_string(OK_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server, EndpointVariant::Refresh);
    let hook = LoadHook::new(bootstrap_for(&config));

    assert!(hook.fire().await.is_some_and(|r| r.outcome()));
    assert!(hook.fire().await.is_none());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn spawned_hook_settles_even_when_endpoint_is_down() {
    let config = Config::new(&closed_port_url(), EndpointVariant::RefreshToken).unwrap();
    let handle = LoadHook::new(bootstrap_for(&config)).spawn();

    let report = tokio::time::timeout(Duration::from_secs(30), handle)
        .await
        .expect("hook did not settle")
        .unwrap()
        .unwrap();
    assert!(!report.outcome());
}
