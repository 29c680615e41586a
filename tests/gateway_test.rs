//! HTTP gateway tests against a wiremock upstream.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use huginn::{GatewayError, HttpGateway, InferenceGateway};

const MODEL: &str = "gemini-1.5-flash";

fn gateway(server: &MockServer) -> HttpGateway {
    HttpGateway::with_base_url("test-key", MODEL, server.uri())
}

fn candidate_body(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn returns_candidate_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/models/{MODEL}:generateContent")))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("{\"score\": 7}")))
        .mount(&server)
        .await;

    let raw = gateway(&server)
        .complete("prompt", Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(raw, "{\"score\": 7}");
}

#[tokio::test]
async fn concatenates_multiple_parts() {
    let server = MockServer::start().await;
    let body = json!({
        "candidates": [{
            "content": { "parts": [{ "text": "{\"score\":" }, { "text": " 7}" }] }
        }]
    });
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let raw = gateway(&server)
        .complete("prompt", Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(raw, "{\"score\": 7}");
}

#[tokio::test]
async fn block_reason_is_a_refusal() {
    let server = MockServer::start().await;
    let body = json!({
        "candidates": [],
        "promptFeedback": { "blockReason": "SAFETY" }
    });
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let err = gateway(&server)
        .complete("prompt", Duration::from_secs(5))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Refused { reason } if reason == "SAFETY"));
}

#[tokio::test]
async fn safety_finish_reason_is_a_refusal() {
    let server = MockServer::start().await;
    let body = json!({
        "candidates": [{ "finishReason": "SAFETY" }]
    });
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let err = gateway(&server)
        .complete("prompt", Duration::from_secs(5))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Refused { .. }));
}

#[tokio::test]
async fn empty_candidate_list_is_a_refusal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let err = gateway(&server)
        .complete("prompt", Duration::from_secs(5))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Refused { .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn server_error_is_a_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let err = gateway(&server)
        .complete("prompt", Duration::from_secs(5))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn unparsable_body_is_a_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let err = gateway(&server)
        .complete("prompt", Duration::from_secs(5))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_)));
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(candidate_body("{}"))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let budget = Duration::from_millis(50);
    let err = gateway(&server)
        .complete("prompt", budget)
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Timeout { budget: b } if b == budget));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_failure() {
    // Nothing listens on this port.
    let gateway = HttpGateway::with_base_url("key", MODEL, "http://127.0.0.1:9");
    let err = gateway
        .complete("prompt", Duration::from_secs(5))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_)));
}
