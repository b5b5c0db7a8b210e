//! Discord REST chat client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use tracing::{debug, instrument};

use roster_common::DiscordConfig;
use roster_core::{ChannelId, ChatClient, DomainError, Message, MessageId, MessageSend, RepoResult};

use crate::error::DiscordError;
use crate::payloads::{MessageObject, MessagePayload};

/// Per-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Discord caps channel history reads at 100 messages per call
pub const MAX_FETCH_LIMIT: usize = 100;

const BOT_USER_AGENT: &str = concat!(
    "DiscordBot (",
    env!("CARGO_PKG_NAME"),
    ", ",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// [`ChatClient`] backed by the Discord HTTP API
#[derive(Debug, Clone)]
pub struct DiscordClient {
    http: reqwest::Client,
    base_url: String,
}

impl DiscordClient {
    /// Build a client authenticated with the bot token
    pub fn new(config: &DiscordConfig) -> Result<Self, DiscordError> {
        let mut headers = HeaderMap::new();
        let token = HeaderValue::from_str(&format!("Bot {}", config.bot_token))
            .map_err(|_| DiscordError::Config("bot token is not a valid header value".into()))?;
        headers.insert(AUTHORIZATION, token);
        headers.insert(USER_AGENT, HeaderValue::from_static(BOT_USER_AGENT));

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()
            .map_err(|e| DiscordError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self::with_http(http, &config.api_base_url))
    }

    /// Use a preconfigured HTTP client, e.g. against a local mock
    pub fn with_http(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{path}", self.base_url))
    }

    async fn send(endpoint: &str, request: RequestBuilder) -> Result<Response, DiscordError> {
        request.send().await.map_err(|e| DiscordError::Http {
            endpoint: endpoint.to_string(),
            source: e,
        })
    }

    async fn check(endpoint: &str, resp: Response) -> Result<Response, DiscordError> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        Err(DiscordError::Api {
            endpoint: endpoint.to_string(),
            status,
            body,
        })
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        endpoint: &str,
        resp: Response,
    ) -> Result<T, DiscordError> {
        resp.json().await.map_err(|e| DiscordError::Deserialization {
            endpoint: endpoint.to_string(),
            source: e,
        })
    }

    /// 404 on a message route means the message is gone
    fn message_error(err: DiscordError, message_id: &MessageId) -> DomainError {
        if err.status() == Some(StatusCode::NOT_FOUND.as_u16()) {
            DomainError::MessageNotFound(message_id.clone())
        } else {
            err.into()
        }
    }
}

#[async_trait]
impl ChatClient for DiscordClient {
    #[instrument(skip(self, message))]
    async fn send_message(
        &self,
        channel_id: &ChannelId,
        message: &MessageSend,
    ) -> RepoResult<Message> {
        let endpoint = format!("POST /channels/{channel_id}/messages");
        let request = self
            .request(Method::POST, &format!("/channels/{channel_id}/messages"))
            .json(&MessagePayload::from(message));

        let resp = Self::check(&endpoint, Self::send(&endpoint, request).await?).await?;
        let created: MessageObject = Self::decode(&endpoint, resp).await?;
        debug!(channel_id = %channel_id, message_id = %created.id, "Message sent");
        Ok(created.into())
    }

    #[instrument(skip(self, message))]
    async fn edit_message(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
        message: &MessageSend,
    ) -> RepoResult<Message> {
        let endpoint = format!("PATCH /channels/{channel_id}/messages/{message_id}");
        let request = self
            .request(
                Method::PATCH,
                &format!("/channels/{channel_id}/messages/{message_id}"),
            )
            .json(&MessagePayload::from(message));

        let resp = Self::send(&endpoint, request).await?;
        let resp = Self::check(&endpoint, resp)
            .await
            .map_err(|e| Self::message_error(e, message_id))?;
        let edited: MessageObject = Self::decode(&endpoint, resp).await?;
        Ok(edited.into())
    }

    #[instrument(skip(self))]
    async fn delete_message(&self, channel_id: &ChannelId, message_id: &MessageId) -> RepoResult<()> {
        let endpoint = format!("DELETE /channels/{channel_id}/messages/{message_id}");
        let request = self.request(
            Method::DELETE,
            &format!("/channels/{channel_id}/messages/{message_id}"),
        );

        let resp = Self::send(&endpoint, request).await?;
        Self::check(&endpoint, resp)
            .await
            .map_err(|e| Self::message_error(e, message_id))?;
        debug!(channel_id = %channel_id, message_id = %message_id, "Message deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn fetch_message(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
    ) -> RepoResult<Option<Message>> {
        let endpoint = format!("GET /channels/{channel_id}/messages/{message_id}");
        let request = self.request(
            Method::GET,
            &format!("/channels/{channel_id}/messages/{message_id}"),
        );

        let resp = Self::send(&endpoint, request).await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = Self::check(&endpoint, resp).await?;
        let message: MessageObject = Self::decode(&endpoint, resp).await?;
        Ok(Some(message.into()))
    }

    #[instrument(skip(self))]
    async fn fetch_messages(&self, channel_id: &ChannelId, limit: usize) -> RepoResult<Vec<Message>> {
        let limit = limit.clamp(1, MAX_FETCH_LIMIT);
        let endpoint = format!("GET /channels/{channel_id}/messages");
        let request = self
            .request(Method::GET, &format!("/channels/{channel_id}/messages"))
            .query(&[("limit", limit)]);

        let resp = Self::check(&endpoint, Self::send(&endpoint, request).await?).await?;
        let newest_first: Vec<MessageObject> = Self::decode(&endpoint, resp).await?;
        debug!(channel_id = %channel_id, count = newest_first.len(), "Messages fetched");

        Ok(newest_first.into_iter().rev().map(Message::from).collect())
    }
}
