mod helpers;

use ankiadd::application::ContentGenerator;
use ankiadd::domain::DomainError;
use ankiadd::infrastructure::GeminiClient;
use helpers::{one_shot, request_body};

#[test]
fn given_well_formed_envelope_when_generating_then_text_is_passed_through_verbatim() {
    // Arrange
    let body = r#"{
        "candidates": [{
            "content": {
                "parts": [{ "text": "<p>Def</p><i>Example</i>" }],
                "role": "model"
            },
            "finishReason": "STOP"
        }]
    }"#;
    let server = one_shot("200 OK", body);
    let mut client = GeminiClient::with_base_url("test-key", "gemini-2.5-flash", server.url());

    // Act
    let content = client.generate("ubiquitous").expect("generation should succeed");

    // Assert
    assert_eq!(content, "<p>Def</p><i>Example</i>");

    let raw = server.request();
    let request_line = raw.lines().next().expect("request line");
    assert!(request_line.starts_with("POST /models/gemini-2.5-flash:generateContent?key=test-key"));

    let payload = request_body(&raw);
    let prompt = payload["contents"][0]["parts"][0]["text"]
        .as_str()
        .expect("prompt text");
    assert!(prompt.contains("'ubiquitous'"));
    assert_eq!(
        payload["generationConfig"]["response_mime_type"],
        serde_json::json!("text/plain")
    );
}

#[test]
fn given_non_success_status_when_generating_then_returns_error_with_status() {
    let server = one_shot(
        "429 Too Many Requests",
        r#"{"error": {"message": "quota exceeded"}}"#,
    );
    let mut client = GeminiClient::with_base_url("test-key", "gemini-2.5-flash", server.url());

    let result = client.generate("term");

    match result {
        Err(DomainError::Generation(message)) => {
            assert!(message.contains("429"));
            assert!(message.contains("quota exceeded"));
        }
        other => panic!("Expected Generation error, got {other:?}"),
    }
}

#[test]
fn given_undecodable_body_when_generating_then_returns_error() {
    let server = one_shot("200 OK", "this is not json");
    let mut client = GeminiClient::with_base_url("test-key", "gemini-2.5-flash", server.url());

    let result = client.generate("term");

    assert!(matches!(result, Err(DomainError::Generation(_))));
}

#[test]
fn given_envelope_without_candidates_when_generating_then_returns_error() {
    let server = one_shot("200 OK", r#"{"candidates": []}"#);
    let mut client = GeminiClient::with_base_url("test-key", "gemini-2.5-flash", server.url());

    let result = client.generate("term");

    match result {
        Err(DomainError::Generation(message)) => {
            assert!(message.contains("no text content"));
        }
        other => panic!("Expected Generation error, got {other:?}"),
    }
}

#[test]
fn given_unreachable_endpoint_when_generating_then_returns_transport_error() {
    // Bind then drop so the port is closed.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let mut client =
        GeminiClient::with_base_url("test-key", "gemini-2.5-flash", format!("http://{addr}"));

    let result = client.generate("term");

    assert!(matches!(result, Err(DomainError::Generation(_))));
}
