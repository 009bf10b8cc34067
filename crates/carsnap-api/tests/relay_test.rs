#![allow(clippy::unwrap_used)]
// Integration tests for the credentialed relay using wiremock.

use secrecy::SecretString;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use carsnap_api::transport::seed_cookies;
use carsnap_api::{Relay, RelayResponse, TransportConfig};

#[tokio::test]
async fn test_relay_returns_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/thing"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let (handle, _task) = Relay::new(reqwest::Client::new()).spawn(cancel.clone());

    let response = handle.fetch(format!("{}/v1/thing", server.uri())).await;

    assert_eq!(response, RelayResponse::Data(json!({ "ok": true })));
    cancel.cancel();
}

#[tokio::test]
async fn test_relay_includes_jar_cookies() {
    let server = MockServer::start().await;
    let origin = Url::parse(&server.uri()).unwrap();

    let mut transport = TransportConfig::default();
    seed_cookies(
        &transport.jar(),
        &origin,
        &SecretString::from("sessionid=abc".to_string()),
    );
    let http = transport.build_client().unwrap();

    Mock::given(method("GET"))
        .and(header("cookie", "sessionid=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": "dealer" })))
        .expect(1)
        .mount(&server)
        .await;

    let relay = Relay::new(http);
    let response = relay.fetch_once(&format!("{}/me", server.uri())).await;

    assert_eq!(response, RelayResponse::Data(json!({ "user": "dealer" })));
}

#[tokio::test]
async fn test_relay_passes_error_status_bodies_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "detail": "denied" })))
        .mount(&server)
        .await;

    let relay = Relay::new(reqwest::Client::new());
    let response = relay.fetch_once(&server.uri()).await;

    assert_eq!(response, RelayResponse::Data(json!({ "detail": "denied" })));
}

#[tokio::test]
async fn test_relay_invalid_json_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let relay = Relay::new(reqwest::Client::new());
    let response = relay.fetch_once(&server.uri()).await;

    assert!(response.is_error(), "expected error, got: {response:?}");
}

#[tokio::test]
async fn test_relay_connection_failure_is_error() {
    let relay = Relay::new(reqwest::Client::new());
    // Port 9 (discard) is essentially never listening on loopback.
    let response = relay.fetch_once("http://127.0.0.1:9/").await;

    assert!(response.is_error(), "expected error, got: {response:?}");
}

#[tokio::test]
async fn test_relay_serves_concurrent_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2, 3])))
        .expect(3)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let (handle, _task) = Relay::new(reqwest::Client::new()).spawn(cancel.clone());

    let uri = server.uri();
    let (a, b, c) = tokio::join!(handle.fetch(&uri), handle.fetch(&uri), handle.fetch(&uri));

    for response in [a, b, c] {
        assert_eq!(response, RelayResponse::Data(json!([1, 2, 3])));
    }
    cancel.cancel();
}
