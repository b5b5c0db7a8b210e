//! Test helpers for integration tests
//!
//! Provides a test server backed by in-memory ports and assertion helpers
//! for its responses.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, Response, StatusCode};
use roster_api::{create_app, AppState};
use roster_common::AppConfig;
use roster_core::{ChannelId, Member};
use roster_service::testing::{
    InMemoryActiveEventRepository, InMemoryAttendanceRepository, InMemoryMemberDirectory,
    RecordingChatClient, TestHarness,
};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Running API server plus handles to the ports behind it
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub attendance: Arc<InMemoryAttendanceRepository>,
    pub members: Arc<InMemoryMemberDirectory>,
    pub events: Arc<InMemoryActiveEventRepository>,
    pub chat: Arc<RecordingChatClient>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server with no default attendance channel
    pub async fn start() -> Result<Self> {
        Self::start_with_default_channel(None).await
    }

    pub async fn start_with_default_channel(channel: Option<&str>) -> Result<Self> {
        let TestHarness {
            ctx,
            attendance,
            members,
            events,
            chat,
        } = TestHarness::with_default_channel(channel.map(ChannelId::from));

        let app = create_app(AppState::new(ctx, test_config()?));

        // Port 0 lets the OS pick a free port per test
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            attendance,
            members,
            events,
            chat,
            _handle: handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Register a member with no eligibility issues
    pub fn eligible(&self, id: &str, name: &str) -> Member {
        let member = roster_service::testing::eligible_member(id, name);
        self.members.insert(member.clone());
        member
    }

    /// Register a member the directory reports `reasons` for
    pub fn with_issues(&self, id: &str, name: &str, reasons: &[&str]) -> Member {
        let member = self.eligible(id, name);
        self.members.set_issues(id, reasons);
        member
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// POST without a body
    pub async fn post_empty(&self, path: &str) -> Result<Response> {
        Ok(self.client.post(self.url(path)).send().await?)
    }

    pub async fn put(&self, path: &str) -> Result<Response> {
        Ok(self.client.put(self.url(path)).send().await?)
    }

    pub async fn put_json<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.put(self.url(path)).json(body).send().await?)
    }

    pub async fn delete(&self, path: &str) -> Result<Response> {
        Ok(self.client.delete(self.url(path)).send().await?)
    }
}

/// Configuration with the values the in-memory server never dials
pub fn test_config() -> Result<AppConfig> {
    AppConfig::from_lookup(|key| match key {
        "API_PORT" => Some("0".to_string()),
        "DATABASE_URL" => Some("postgres://unused/roster_test".to_string()),
        "DISCORD_BOT_TOKEN" => Some("test-token".to_string()),
        _ => None,
    })
    .map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// Assert an error response and return its `error.code`
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: crate::fixtures::ErrorEnvelope = assert_json(response, expected_status).await?;
    Ok(body.error.code)
}
