//! OpenAiTransport against a local mock HTTP server.

use std::time::Duration;

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use supportbot::{ChatError, CompletionRequest, CompletionSettings, CompletionTransport, OpenAiTransport};

fn key() -> SecretString {
    SecretString::from("sk-test-123".to_string())
}

fn transport_for(server: &MockServer) -> OpenAiTransport {
    let settings = CompletionSettings::default().with_base_url(server.uri());
    OpenAiTransport::new(&settings).expect("Failed to build transport")
}

#[tokio::test]
async fn test_posts_bearer_auth_and_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test-123"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "model": "gpt-3.5-turbo",
            "messages": [{"role": "user", "content": "Can I change my address?"}],
            "temperature": 0.7
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "Sure."}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&server);
    let request = CompletionRequest::single_turn("gpt-3.5-turbo", "Can I change my address?", 0.7);

    let response = transport.post(&request, &key()).await.expect("request failed");

    assert_eq!(response.status, 200);
    assert!(response.body.contains("Sure."));
}

#[tokio::test]
async fn test_non_success_status_is_passed_through() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&server);
    let request = CompletionRequest::single_turn("gpt-3.5-turbo", "hi", 0.7);

    let response = transport.post(&request, &key()).await.expect("request failed");

    assert_eq!(response.status, 429);
    assert_eq!(response.body, "rate limited");
}

#[tokio::test]
async fn test_slow_endpoint_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{}")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let settings = CompletionSettings::default()
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(200));
    let transport = OpenAiTransport::new(&settings).expect("Failed to build transport");
    let request = CompletionRequest::single_turn("gpt-3.5-turbo", "hi", 0.7);

    let err = transport.post(&request, &key()).await.unwrap_err();

    match err {
        ChatError::Transport(detail) => assert!(detail.contains("timed out"), "{detail}"),
        other => panic!("expected a transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_endpoint_is_a_transport_error() {
    // Nothing listens on port 1.
    let settings = CompletionSettings::default()
        .with_base_url("http://127.0.0.1:1")
        .with_timeout(Duration::from_secs(2));
    let transport = OpenAiTransport::new(&settings).expect("Failed to build transport");
    let request = CompletionRequest::single_turn("gpt-3.5-turbo", "hi", 0.7);

    let err = transport.post(&request, &key()).await.unwrap_err();

    assert!(matches!(err, ChatError::Transport(_)));
    assert!(err.is_recoverable());
}
