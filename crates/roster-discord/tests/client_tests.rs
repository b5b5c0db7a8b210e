//! DiscordClient against an in-process mock of the message endpoints

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde_json::{json, Value};

use roster_common::DiscordConfig;
use roster_core::{ChannelId, ChatClient, DomainError, MessageId, MessageSend};
use roster_discord::DiscordClient;

async fn create(
    Path(channel): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bot test-token") {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(json!({
        "id": "900",
        "channel_id": channel,
        "content": body["content"],
        "embeds": body["embeds"],
        "components": body["components"],
    })))
}

async fn history(Path(channel): Path<String>) -> Json<Value> {
    // Discord returns newest first
    Json(json!([
        {
            "id": "102",
            "channel_id": channel,
            "content": "submitted",
            "referenced_message": {"id": "100", "channel_id": "parent", "content": "Mining Op(abc123)"}
        },
        {"id": "101", "channel_id": channel, "content": "<@m1>"}
    ]))
}

async fn edit(
    Path((channel, message)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if message == "gone" {
        return Err((
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Unknown Message", "code": 10008})),
        ));
    }
    Ok(Json(json!({"id": message, "channel_id": channel, "content": body["content"]})))
}

async fn remove(Path((_channel, message)): Path<(String, String)>) -> StatusCode {
    if message == "gone" {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn fetch_one(Path((channel, message)): Path<(String, String)>) -> Result<Json<Value>, StatusCode> {
    if message == "gone" {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({"id": message, "channel_id": channel, "content": "hello"})))
}

async fn spawn_mock() -> String {
    let app = Router::new()
        .route("/api/v10/channels/:channel/messages", get(history).post(create))
        .route(
            "/api/v10/channels/:channel/messages/:message",
            patch(edit).delete(remove).get(fetch_one),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api/v10/")
}

async fn client() -> DiscordClient {
    let config = DiscordConfig {
        bot_token: "test-token".to_string(),
        guild_id: None,
        attendance_channel_id: None,
        api_base_url: spawn_mock().await,
    };
    DiscordClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_send_message_authenticates_and_maps_response() {
    let client = client().await;
    let sent = client
        .send_message(&ChannelId::from("c1"), &MessageSend::text("hello"))
        .await
        .unwrap();

    assert_eq!(sent.id, MessageId::from("900"));
    assert_eq!(sent.channel_id, ChannelId::from("c1"));
    assert_eq!(sent.content, "hello");
}

#[tokio::test]
async fn test_fetch_messages_returns_oldest_first() {
    let client = client().await;
    let messages = client
        .fetch_messages(&ChannelId::from("t1"), 50)
        .await
        .unwrap();

    let ids: Vec<&str> = messages.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["101", "102"]);
    assert_eq!(
        messages[1].referenced_message.as_ref().unwrap().content,
        "Mining Op(abc123)"
    );
}

#[tokio::test]
async fn test_missing_message_maps_to_not_found() {
    let client = client().await;
    let channel = ChannelId::from("c1");
    let gone = MessageId::from("gone");

    let err = client
        .edit_message(&channel, &gone, &MessageSend::text("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::MessageNotFound(_)));

    let err = client.delete_message(&channel, &gone).await.unwrap_err();
    assert!(matches!(err, DomainError::MessageNotFound(_)));

    assert!(client.fetch_message(&channel, &gone).await.unwrap().is_none());
}

#[tokio::test]
async fn test_edit_and_delete_existing_message() {
    let client = client().await;
    let channel = ChannelId::from("c1");
    let id = MessageId::from("55");

    let edited = client
        .edit_message(&channel, &id, &MessageSend::text("updated"))
        .await
        .unwrap();
    assert_eq!(edited.content, "updated");

    client.delete_message(&channel, &id).await.unwrap();
    assert!(client.fetch_message(&channel, &id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_unreachable_host_is_chat_error() {
    let config = DiscordConfig {
        bot_token: "test-token".to_string(),
        guild_id: None,
        attendance_channel_id: None,
        api_base_url: "http://127.0.0.1:1".to_string(),
    };
    let client = DiscordClient::new(&config).unwrap();
    let err = client
        .send_message(&ChannelId::from("c1"), &MessageSend::text("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ChatError(_)));
}
