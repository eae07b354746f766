// Gemini provider wire-level tests
//
// Runs the provider against a local mock of the generateContent endpoint and
// checks request shape, response parsing and error classification.

use helpdesk_router::classifier::{ClassifierAdapter, Department, Priority};
use helpdesk_router::errors::TriageError;
use helpdesk_router::language::Language;
use helpdesk_router::providers::gemini::GeminiProvider;
use helpdesk_router::providers::{LlmProvider, ProviderRequest};
use mockito::Matcher;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

const PATH: &str = "/v1beta/models/gemini-2.0-flash-exp:generateContent";

fn provider(base_url: String) -> GeminiProvider {
    GeminiProvider::new("test-key".to_string())
        .unwrap()
        .with_base_url(base_url)
}

fn candidate_body(text: &str) -> String {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "modelVersion": "gemini-2.0-flash-exp"
    })
    .to_string()
}

#[tokio::test]
async fn test_send_message_wire_format() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::PartialJson(json!({
            "contents": [{ "parts": [{ "text": "Сәлем" }] }],
            "generationConfig": {
                "maxOutputTokens": 500,
                "responseMimeType": "application/json"
            }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(candidate_body("{}"))
        .create_async()
        .await;

    let request = ProviderRequest::new("Сәлем")
        .with_max_tokens(500)
        .with_temperature(0.1)
        .with_json_output(true);
    let response = provider(server.url()).send_message(&request).await.unwrap();

    assert_eq!(response.text, "{}");
    assert_eq!(response.provider, "gemini");
    assert_eq!(response.stop_reason.as_deref(), Some("STOP"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_is_transient() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", PATH)
        .with_status(503)
        .with_body("overloaded")
        .create_async()
        .await;

    let err = provider(server.url())
        .send_message(&ProviderRequest::new("x"))
        .await
        .unwrap_err();

    assert!(matches!(err, TriageError::ClassifierUnavailable { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_bad_key_is_permanent() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", PATH)
        .with_status(403)
        .with_body(r#"{"error":{"message":"API key not valid"}}"#)
        .create_async()
        .await;

    let err = provider(server.url())
        .send_message(&ProviderRequest::new("x"))
        .await
        .unwrap_err();

    assert!(matches!(err, TriageError::ClassifierUnavailable { transient: false, .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_no_candidates_is_malformed() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates":[]}"#)
        .create_async()
        .await;

    let err = provider(server.url())
        .send_message(&ProviderRequest::new("x"))
        .await
        .unwrap_err();

    assert!(matches!(err, TriageError::MalformedClassifierOutput(_)));
}

#[tokio::test]
async fn test_classifier_over_gemini_strips_fences() {
    let mut server = mockito::Server::new_async().await;
    let answer = "```json\n{\"department\":\"SECURITY\",\"priority\":\"CRITICAL\",\"type\":\"INCIDENT\",\"category\":\"other\",\"language\":\"ru\",\"summary\":\"Фишинговое письмо\",\"is_auto_solvable\":false,\"confidence\":0.97}\n```";
    server
        .mock("POST", PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(candidate_body(answer))
        .create_async()
        .await;

    let adapter = ClassifierAdapter::new(Arc::new(provider(server.url())), Duration::from_secs(5));
    let classification = adapter
        .classify("Пришло подозрительное письмо со ссылкой", Language::Ru)
        .await
        .unwrap();

    assert_eq!(classification.department, Department::Security);
    assert_eq!(classification.priority, Priority::Critical);
    assert!(!classification.is_auto_solvable);
}
