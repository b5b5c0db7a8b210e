//! Chat message model - the platform-neutral shape of a rendered message
//!
//! Only the parts the roster codec reads or writes are modelled: plain
//! content, rich embeds, rows of buttons and the message being replied to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{ChannelId, MemberId, MessageId};

/// Message as fetched from the chat platform
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    pub id: MessageId,
    pub channel_id: ChannelId,
    pub author_id: Option<MemberId>,
    pub content: String,
    pub embeds: Vec<Embed>,
    pub components: Vec<ActionRow>,
    /// Message this one replies to, when the platform resolved it
    pub referenced_message: Option<Box<Message>>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Message {
    pub fn new(id: impl Into<MessageId>, channel_id: impl Into<ChannelId>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            channel_id: channel_id.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    /// Mark this message as a reply to `parent`
    #[must_use]
    pub fn replying_to(mut self, parent: Message) -> Self {
        self.referenced_message = Some(Box::new(parent));
        self
    }

    #[must_use]
    pub fn with_embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    #[inline]
    pub fn first_embed(&self) -> Option<&Embed> {
        self.embeds.first()
    }
}

/// Outgoing message body for send and edit calls
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessageSend {
    pub content: String,
    pub embeds: Vec<Embed>,
    pub components: Vec<ActionRow>,
}

impl MessageSend {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Apply this body to an already fetched message
    pub fn into_message(self, id: MessageId, channel_id: ChannelId) -> Message {
        Message {
            id,
            channel_id,
            content: self.content,
            embeds: self.embeds,
            components: self.components,
            ..Message::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Embed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub timestamp: Option<String>,
    pub fields: Vec<EmbedField>,
    pub footer: Option<EmbedFooter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

impl EmbedField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// Horizontal row of buttons (at most five on most platforms)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionRow {
    pub components: Vec<Button>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    pub style: ButtonStyle,
    pub custom_id: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub emoji: Option<String>,
}

impl Button {
    pub fn new(label: impl Into<String>, style: ButtonStyle, custom_id: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            style,
            custom_id: custom_id.into(),
            disabled: false,
            emoji: None,
        }
    }

    #[must_use]
    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_chain() {
        let opening = Message::new("1", "t1", "Mining Op(abc123)");
        let reply = Message::new("2", "t1", "<@m1>").replying_to(opening.clone());
        assert_eq!(reply.referenced_message.as_deref(), Some(&opening));
    }

    #[test]
    fn test_message_deserializes_with_missing_fields() {
        let msg: Message = serde_json::from_str(r#"{"id":"5","content":"hello"}"#).unwrap();
        assert_eq!(msg.id, MessageId::from("5"));
        assert!(msg.embeds.is_empty());
        assert!(msg.referenced_message.is_none());
    }

    #[test]
    fn test_send_into_message() {
        let body = MessageSend::text("hi");
        let msg = body.into_message(MessageId::from("9"), ChannelId::from("c"));
        assert_eq!(msg.content, "hi");
        assert_eq!(msg.channel_id, ChannelId::from("c"));
    }
}
