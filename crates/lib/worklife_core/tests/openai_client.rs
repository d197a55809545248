//! Integration test — run a fake chat-completions server, point the client at
//! it, and check the request it sends and the reply it extracts.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use worklife_core::llm::config::LlmConfig;
use worklife_core::llm::openai::OpenAiCompatibleClient;
use worklife_core::llm::{CompletionClient, LlmError};
use worklife_core::normalize::NormalizeMode;
use worklife_core::pipeline::Analyzer;
use worklife_core::prompt::{SYSTEM_PROMPT, build_conversation};

#[derive(Clone, Default)]
struct Captured {
    requests: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

/// Start a fake server answering with `status` and `body`; returns its base URL.
async fn spawn_fake(status: StatusCode, body: Value) -> (String, Captured) {
    let captured = Captured::default();

    let app = Router::new()
        .route(
            "/v1/chat/completions",
            post(
                move |State(captured): State<Captured>, headers: HeaderMap, Json(req): Json<Value>| {
                    let body = body.clone();
                    async move {
                        let auth = headers
                            .get("authorization")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string);
                        captured.requests.lock().unwrap().push((auth, req));
                        (status, Json(body))
                    }
                },
            ),
        )
        .with_state(captured.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake server");
    });

    (format!("http://{addr}/v1"), captured)
}

fn config_for(base_url: String, api_key: Option<&str>) -> LlmConfig {
    let mut config = LlmConfig::for_provider("ollama").expect("ollama provider");
    config.base_url = base_url;
    config.model = "test-model".into();
    config.api_key = api_key.map(str::to_string);
    config.timeout = Duration::from_secs(5);
    config
}

fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
        ]
    })
}

#[tokio::test]
async fn sends_two_turn_conversation_and_returns_content() {
    let (base_url, captured) = spawn_fake(StatusCode::OK, completion("raw reply text")).await;
    let client = OpenAiCompatibleClient::new(config_for(base_url, Some("sk-test"))).expect("client");

    let reply = client
        .complete(&build_conversation("I skip lunch every day"))
        .await
        .expect("completion");
    assert_eq!(reply, "raw reply text");

    let requests = captured.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let (auth, body) = &requests[0];
    assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
    assert_eq!(body["model"], "test-model");
    let temperature = body["temperature"].as_f64().expect("temperature");
    assert!((temperature - 0.2).abs() < 1e-6, "temperature was {temperature}");
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], SYSTEM_PROMPT);
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"], "I skip lunch every day");
}

#[tokio::test]
async fn omits_auth_header_without_key() {
    let (base_url, captured) = spawn_fake(StatusCode::OK, completion("{}")).await;
    let client = OpenAiCompatibleClient::new(config_for(base_url, None)).expect("client");

    client
        .complete(&build_conversation("hi"))
        .await
        .expect("completion");

    let requests = captured.requests.lock().unwrap();
    assert_eq!(requests[0].0, None);
}

#[tokio::test]
async fn error_status_is_reported() {
    let (base_url, _) = spawn_fake(
        StatusCode::TOO_MANY_REQUESTS,
        json!({"error": {"message": "rate limited"}}),
    )
    .await;
    let client = OpenAiCompatibleClient::new(config_for(base_url, None)).expect("client");

    let err = client.complete(&build_conversation("hi")).await.unwrap_err();
    match err {
        LlmError::Status { status, body } => {
            assert_eq!(status, 429);
            assert!(body.contains("rate limited"), "body: {body}");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_choices_is_a_response_error() {
    let (base_url, _) = spawn_fake(StatusCode::OK, json!({"choices": []})).await;
    let client = OpenAiCompatibleClient::new(config_for(base_url, None)).expect("client");

    let err = client.complete(&build_conversation("hi")).await.unwrap_err();
    assert!(matches!(err, LlmError::Response(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_server_is_a_request_error() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client =
        OpenAiCompatibleClient::new(config_for(format!("http://{addr}/v1"), None)).expect("client");
    let err = client.complete(&build_conversation("hi")).await.unwrap_err();
    assert!(matches!(err, LlmError::Request(_)), "got {err:?}");
}

#[tokio::test]
async fn analyzer_extracts_fenced_reply_end_to_end() {
    let reply = "Sure! ```json\n{\"balanced\": false, \"risk_level\": \"high\", \"summary\": \"overworked\", \"signals\": [\"long hours\"], \"recommendations\": []}\n```";
    let (base_url, _) = spawn_fake(StatusCode::OK, completion(reply)).await;
    let client = OpenAiCompatibleClient::new(config_for(base_url, None)).expect("client");
    let analyzer = Analyzer::new(Arc::new(client), NormalizeMode::PassThrough);

    let record = analyzer.analyze("I work 14 hours").await.expect("analysis");
    assert_eq!(record["risk_level"], "high");
    assert_eq!(record["signals"][0], "long hours");
}
