mod common;

use axum::http::StatusCode;
use common::{spawn_capturing_upstream, spawn_failing_upstream, spawn_upstream, TestClient};
use serde_json::json;
use std::sync::{Arc, Mutex};

fn completion(content: &str) -> serde_json::Value {
    json!({
        "choices": [
            {"message": {"role": "assistant", "content": content}}
        ]
    })
}

#[tokio::test]
async fn test_empty_request_is_rejected() {
    let upstream = spawn_upstream(completion("unused")).await;
    let client = TestClient::new(&upstream);

    let (status, body) = client.post_json("/chat", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("message or data"));
}

#[tokio::test]
async fn test_empty_message_without_data_is_rejected() {
    let upstream = spawn_upstream(completion("unused")).await;
    let client = TestClient::new(&upstream);

    let (status, body) = client.post_json("/chat", json!({"message": ""})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_question_round_trip() {
    let upstream = spawn_upstream(completion("本月支出共 200 元。")).await;
    let client = TestClient::new(&upstream);

    let (status, body) = client
        .post_json("/chat", json!({"message": "这个月我花了多少钱？"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["response"], "本月支出共 200 元。");
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn test_data_only_request_is_accepted() {
    let upstream = spawn_upstream(completion("分析完成")).await;
    let client = TestClient::new(&upstream);

    let (status, body) = client
        .post_json(
            "/chat",
            json!({"type": "analysis", "data": {"transactions": [], "budgets": []}}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_upstream_without_choices_is_a_500() {
    let upstream = spawn_upstream(json!({"object": "chat.completion"})).await;
    let client = TestClient::new(&upstream);

    let (status, body) = client
        .post_json(
            "/chat",
            json!({"type": "analysis", "data": {"transactions": [], "budgets": []}}),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("unexpected response format"));
}

#[tokio::test]
async fn test_upstream_http_failure_is_a_500() {
    let upstream = spawn_failing_upstream().await;
    let client = TestClient::new(&upstream);

    let (status, body) = client.post_json("/chat", json!({"message": "hi"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("AI service temporarily unavailable"));
}

#[tokio::test]
async fn test_unreachable_upstream_is_a_500() {
    // Nothing listens on this port.
    let client = TestClient::new("http://127.0.0.1:1/chat/completions");

    let (status, body) = client.post_json("/chat", json!({"message": "hi"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_outbound_request_shape() {
    let captured = Arc::new(Mutex::new(None));
    let upstream = spawn_capturing_upstream(completion("好的"), captured.clone()).await;
    let client = TestClient::new(&upstream);

    let (status, _) = client
        .post_json(
            "/chat",
            json!({
                "type": "analysis",
                "data": {
                    "transactions": [{"type": "expense", "category": "餐饮", "amount": 150}],
                    "budgets": [{"category": "餐饮", "amount": 500}]
                }
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let sent = captured.lock().unwrap().take().expect("upstream saw no request");
    assert_eq!(sent["model"], "deepseek-chat");
    assert_eq!(sent["temperature"], 0.3);
    assert_eq!(sent["max_tokens"], 2000);
    assert_eq!(sent["top_p"], 0.95);
    assert_eq!(sent["frequency_penalty"], 0.0);
    assert_eq!(sent["presence_penalty"], 0.0);

    let messages = sent["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[1]["role"], "user");

    let prompt = messages[1]["content"].as_str().unwrap();
    assert!(prompt.contains("消费趋势分析"));
    assert!(prompt.contains("餐饮"));
}

#[tokio::test]
async fn test_free_text_message_reaches_the_prompt() {
    let captured = Arc::new(Mutex::new(None));
    let upstream = spawn_capturing_upstream(completion("好的"), captured.clone()).await;
    let client = TestClient::new(&upstream);

    client
        .post_json("/chat", json!({"message": "我该怎么存钱？"}))
        .await;

    let sent = captured.lock().unwrap().take().expect("upstream saw no request");
    let prompt = sent["messages"][1]["content"].as_str().unwrap();
    assert!(prompt.contains("我该怎么存钱？"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let upstream = spawn_upstream(completion("unused")).await;
    let client = TestClient::new(&upstream);

    let (status, body) = client.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}
