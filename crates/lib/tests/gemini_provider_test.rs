//! # Gemini Provider Tests
//!
//! Exercises `GeminiProvider` against a `wiremock` server standing in for the
//! Gemini REST API.

mod common;

use crate::common::setup_tracing;
use frameforge::providers::ai::{AiProvider, AiProviderFactory, GeminiProviderFactory};
use frameforge::{ErrorKind, GenerationError, Usage};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-2.5-flash";

fn provider_for(server: &MockServer) -> Box<dyn AiProvider> {
    GeminiProviderFactory::new(server.uri())
        .create("test-key", MODEL)
        .unwrap()
}

#[tokio::test]
async fn test_generate_joins_parts_and_reads_usage() {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/models/{MODEL}:generateContent")))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{ "parts": [{ "text": "Write about tides." }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Tides " }, { "text": "turn." }] }
            }],
            "usageMetadata": {
                "promptTokenCount": 4,
                "candidatesTokenCount": 2,
                "totalTokenCount": 6
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let completion = provider_for(&server)
        .generate("Write about tides.")
        .await
        .unwrap();

    assert_eq!(completion.text, "Tides turn.");
    assert_eq!(
        completion.usage,
        Some(Usage {
            prompt_tokens: 4,
            total_tokens: 6
        })
    );
}

#[tokio::test]
async fn test_count_tokens_reads_total() {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/models/{MODEL}:countTokens")))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "totalTokens": 57 })))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = provider_for(&server).count_tokens("anything").await.unwrap();
    assert_eq!(tokens, 57);
}

#[tokio::test]
async fn test_api_error_body_is_surfaced() {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/models/{MODEL}:generateContent")))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let err = provider_for(&server).generate("prompt").await.unwrap_err();
    assert!(matches!(&err, GenerationError::AiApi(body) if body == "API key not valid"));
    assert_eq!(err.kind(), ErrorKind::ExternalCall);
}

#[tokio::test]
async fn test_missing_candidates_is_an_empty_completion() {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/models/{MODEL}:generateContent")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let err = provider_for(&server).generate("prompt").await.unwrap_err();
    assert!(matches!(err, GenerationError::EmptyCompletion));
}

#[test]
fn test_factory_rejects_blank_model() {
    let err = GeminiProviderFactory::default()
        .create("key", " ")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}
