//! Integration Test: 起動からリクエスト処理までのフロー
//!
//! `bootstrap::initialize` で組み立てたアプリを実ポートで起動し、
//! reqwestで各エンドポイントを呼び出す。

use crate::support::http::spawn_ingress;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use serve_ingress::{bootstrap, error::IngressError};
use serve_ingress_common::config::{EngineConfig, IngressConfig};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

async fn mock_inference_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": "tinyllama"}]})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"choices": [{"text": "Sumatra\nJava"}]})),
        )
        .mount(&server)
        .await;
    server
}

fn config_for(server: &MockServer) -> IngressConfig {
    IngressConfig {
        engine: EngineConfig {
            base_url: Some(server.uri()),
            served_model_name: Some("tinyllama".to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}

async fn post(client: &Client, url: String, payload: Value) -> Value {
    let response = client.post(url).json(&payload).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    response.json().await.unwrap()
}

#[tokio::test]
async fn full_flow_with_ready_llm() {
    let inference = mock_inference_server().await;
    let state = bootstrap::initialize(&config_for(&inference)).await.unwrap();
    assert!(state.ingress.llm_available());

    let server = spawn_ingress(state).await;
    let client = Client::new();

    let root: Value = client
        .get(server.url("/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(root["available_endpoints"]["/llm"].is_string());

    let echo = post(&client, server.url("/echo"), json!({"message": "hi"})).await;
    assert_eq!(echo, json!({"echo": "hi", "service": "EchoService"}));

    let calc = post(
        &client,
        server.url("/calc"),
        json!({"operation": "multiply", "a": 6, "b": 7}),
    )
    .await;
    assert_eq!(calc["result"].as_f64(), Some(42.0));

    let llm = post(
        &client,
        server.url("/llm"),
        json!({"prompt": "Name two islands.", "max_tokens": 16}),
    )
    .await;
    assert_eq!(
        llm,
        json!({"prompt": "Name two islands.", "response": "Sumatra\nJava", "service": "TinyLlamaService"})
    );

    server.stop().await;
}

#[tokio::test]
async fn disabled_llm_serves_other_routes() {
    let inference = mock_inference_server().await;
    let config = IngressConfig {
        llm_disabled: true,
        ..config_for(&inference)
    };
    let state = bootstrap::initialize(&config).await.unwrap();
    let server = spawn_ingress(state).await;
    let client = Client::new();

    let llm = post(&client, server.url("/llm"), json!({"prompt": "Hi"})).await;
    assert_eq!(llm, json!({"error": "LLM service not available"}));

    let echo = post(&client, server.url("/echo"), json!({"message": "still up"})).await;
    assert_eq!(echo["echo"], "still up");

    // 無効化時は推論サーバーへ一切接続しない
    assert!(inference.received_requests().await.unwrap().is_empty());

    server.stop().await;
}

#[tokio::test]
async fn unreachable_engine_aborts_startup() {
    // 何も待ち受けていないポートを確保してから解放する
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = IngressConfig {
        engine: EngineConfig {
            base_url: Some(format!("http://{}", addr)),
            ..Default::default()
        },
        ..Default::default()
    };

    let err = bootstrap::initialize(&config).await.unwrap_err();
    assert!(matches!(err, IngressError::EngineInit(_)), "{err:?}");
}

#[tokio::test]
async fn invalid_json_over_the_wire_is_empty_body() {
    let state = bootstrap::initialize(&IngressConfig::default()).await.unwrap();
    let server = spawn_ingress(state).await;

    let response = Client::new()
        .post(server.url("/calc"))
        .header("content-type", "application/json")
        .body("{\"operation\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "Unknown operation: None"}));

    server.stop().await;
}
