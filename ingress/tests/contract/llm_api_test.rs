//! Contract Test: POST /llm

use crate::support::ingress::{
    create_test_app, create_test_app_with_engine, post_json, send, StubEngine,
};
use serde_json::json;

#[tokio::test]
async fn llm_prompt_completion() {
    let engine = StubEngine::replying("Java\nBali");
    let app = create_test_app_with_engine(engine.clone());

    let body = post_json(
        &app,
        "/llm",
        &json!({
            "prompt": "List two Indonesian islands separated by a newline.",
            "max_tokens": 64,
            "temperature": 0.6
        }),
    )
    .await;

    assert_eq!(
        body,
        json!({
            "prompt": "List two Indonesian islands separated by a newline.",
            "response": "Java\nBali",
            "service": "TinyLlamaService"
        })
    );

    let calls = engine.recorded();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1.max_tokens, 64);
    assert_eq!(calls[0].1.temperature, 0.6);
}

#[tokio::test]
async fn llm_chat_messages_are_flattened() {
    let engine = StubEngine::replying("Hi there!");
    let app = create_test_app_with_engine(engine.clone());

    let body = post_json(
        &app,
        "/llm",
        &json!({
            "messages": [
                {"role": "system", "content": "S"},
                {"role": "user", "content": "U"}
            ]
        }),
    )
    .await;

    assert_eq!(body["prompt"], "System: S\nUser: U");
    assert_eq!(body["response"], "Hi there!");
    assert_eq!(engine.recorded()[0].0, "System: S\nUser: U");
}

#[tokio::test]
async fn llm_default_generation_params() {
    let engine = StubEngine::replying("ok");
    let app = create_test_app_with_engine(engine.clone());

    post_json(&app, "/llm", &json!({"prompt": "Hi"})).await;

    let (_, params) = engine.recorded().remove(0);
    assert_eq!(params.max_tokens, 100);
    assert_eq!(params.temperature, 0.7);
}

#[tokio::test]
async fn llm_missing_prompt_is_error() {
    let engine = StubEngine::replying("unused");
    let app = create_test_app_with_engine(engine.clone());

    let body = post_json(&app, "/llm", &json!({"max_tokens": 10})).await;

    assert_eq!(
        body,
        json!({"error": "Missing 'prompt' or 'messages' field", "service": "TinyLlamaService"})
    );
    assert!(engine.recorded().is_empty());
}

#[tokio::test]
async fn llm_engine_failure_is_payload_error() {
    let app = create_test_app_with_engine(StubEngine::failing("CUDA out of memory"));

    let body = post_json(&app, "/llm", &json!({"prompt": "Hi"})).await;

    assert_eq!(body["service"], "TinyLlamaService");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("CUDA out of memory"));
    assert!(body.get("response").is_none());
}

#[tokio::test]
async fn llm_invalid_max_tokens_is_rejected_before_inference() {
    let engine = StubEngine::replying("unused");
    let app = create_test_app_with_engine(engine.clone());

    let body = post_json(&app, "/llm", &json!({"prompt": "Hi", "max_tokens": -1})).await;

    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid 'max_tokens' field"));
    assert!(engine.recorded().is_empty());
}

#[tokio::test]
async fn llm_unavailable_regardless_of_body() {
    let app = create_test_app();

    for body in [
        Some(r#"{"prompt": "Hi"}"#),
        Some(r#"{"messages": []}"#),
        Some("not json"),
        None,
    ] {
        let method = if body.is_some() { "POST" } else { "GET" };
        let response = send(&app, method, "/llm", body).await;
        assert_eq!(response, json!({"error": "LLM service not available"}));
    }
}
