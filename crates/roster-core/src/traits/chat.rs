//! Chat platform port

use async_trait::async_trait;

use crate::entities::{Message, MessageSend};
use crate::traits::RepoResult;
use crate::value_objects::{ChannelId, MessageId};

/// Minimal chat surface the roster workflows need
///
/// Failures surface as [`DomainError::ChatError`](crate::DomainError::ChatError);
/// a missing message on fetch is `Ok(None)`.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn send_message(&self, channel_id: &ChannelId, message: &MessageSend)
        -> RepoResult<Message>;

    async fn edit_message(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
        message: &MessageSend,
    ) -> RepoResult<Message>;

    async fn delete_message(&self, channel_id: &ChannelId, message_id: &MessageId)
        -> RepoResult<()>;

    async fn fetch_message(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
    ) -> RepoResult<Option<Message>>;

    /// Most recent `limit` messages of a channel, oldest first
    async fn fetch_messages(&self, channel_id: &ChannelId, limit: usize)
        -> RepoResult<Vec<Message>>;
}
