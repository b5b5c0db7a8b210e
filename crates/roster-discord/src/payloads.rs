//! Discord REST payloads
//!
//! Wire shapes for the message endpoints and their mapping to the
//! platform-neutral message model. Unknown fields are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use roster_core::{
    ActionRow, Button, ButtonStyle, ChannelId, Embed, EmbedField, EmbedFooter, MemberId, Message,
    MessageId, MessageSend,
};

/// Component type: row of components
pub const COMPONENT_ACTION_ROW: u8 = 1;
/// Component type: button
pub const COMPONENT_BUTTON: u8 = 2;

pub fn style_code(style: ButtonStyle) -> u8 {
    match style {
        ButtonStyle::Primary => 1,
        ButtonStyle::Secondary => 2,
        ButtonStyle::Success => 3,
        ButtonStyle::Danger => 4,
    }
}

/// Link (5) and premium (6) buttons have no custom id and are not mapped
pub fn style_from_code(code: u8) -> Option<ButtonStyle> {
    match code {
        1 => Some(ButtonStyle::Primary),
        2 => Some(ButtonStyle::Secondary),
        3 => Some(ButtonStyle::Success),
        4 => Some(ButtonStyle::Danger),
        _ => None,
    }
}

// ============================================================================
// Outgoing
// ============================================================================

/// Body of create and edit message calls
#[derive(Debug, Clone, Serialize)]
pub struct MessagePayload {
    pub content: String,
    pub embeds: Vec<EmbedPayload>,
    pub components: Vec<ComponentPayload>,
}

impl From<&MessageSend> for MessagePayload {
    fn from(message: &MessageSend) -> Self {
        Self {
            content: message.content.clone(),
            embeds: message.embeds.iter().map(EmbedPayload::from).collect(),
            components: message.components.iter().map(ComponentPayload::from).collect(),
        }
    }
}

// ============================================================================
// Shared embed and component shapes
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbedPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedFieldPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooterPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedFieldPayload {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedFooterPayload {
    pub text: String,
}

impl From<&Embed> for EmbedPayload {
    fn from(embed: &Embed) -> Self {
        Self {
            title: embed.title.clone(),
            description: embed.description.clone(),
            timestamp: embed.timestamp.clone(),
            fields: embed
                .fields
                .iter()
                .map(|f| EmbedFieldPayload {
                    name: f.name.clone(),
                    value: f.value.clone(),
                    inline: f.inline,
                })
                .collect(),
            footer: embed.footer.as_ref().map(|f| EmbedFooterPayload {
                text: f.text.clone(),
            }),
        }
    }
}

impl From<EmbedPayload> for Embed {
    fn from(embed: EmbedPayload) -> Self {
        Self {
            title: embed.title,
            description: embed.description,
            timestamp: embed.timestamp,
            fields: embed
                .fields
                .into_iter()
                .map(|f| EmbedField {
                    name: f.name,
                    value: f.value,
                    inline: f.inline,
                })
                .collect(),
            footer: embed.footer.map(|f| EmbedFooter { text: f.text }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmojiPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Action row or button; other component types are read and ignored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentPayload {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ComponentPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<EmojiPayload>,
    #[serde(default)]
    pub disabled: bool,
}

impl From<&Button> for ComponentPayload {
    fn from(button: &Button) -> Self {
        Self {
            kind: COMPONENT_BUTTON,
            components: Vec::new(),
            style: Some(style_code(button.style)),
            label: Some(button.label.clone()),
            custom_id: Some(button.custom_id.clone()),
            emoji: button.emoji.as_ref().map(|name| EmojiPayload {
                id: None,
                name: Some(name.clone()),
            }),
            disabled: button.disabled,
        }
    }
}

impl From<&ActionRow> for ComponentPayload {
    fn from(row: &ActionRow) -> Self {
        Self {
            kind: COMPONENT_ACTION_ROW,
            components: row.components.iter().map(ComponentPayload::from).collect(),
            style: None,
            label: None,
            custom_id: None,
            emoji: None,
            disabled: false,
        }
    }
}

impl ComponentPayload {
    fn into_button(self) -> Option<Button> {
        if self.kind != COMPONENT_BUTTON {
            return None;
        }
        let style = self.style.and_then(style_from_code)?;
        Some(Button {
            label: self.label.unwrap_or_default(),
            style,
            custom_id: self.custom_id?,
            disabled: self.disabled,
            emoji: self.emoji.and_then(|e| e.name),
        })
    }

    fn into_action_row(self) -> Option<ActionRow> {
        if self.kind != COMPONENT_ACTION_ROW {
            return None;
        }
        Some(ActionRow {
            components: self
                .components
                .into_iter()
                .filter_map(ComponentPayload::into_button)
                .collect(),
        })
    }
}

// ============================================================================
// Incoming
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct UserPayload {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// Message object as returned by the message endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct MessageObject {
    pub id: String,
    pub channel_id: String,
    #[serde(default)]
    pub author: Option<UserPayload>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub embeds: Vec<EmbedPayload>,
    #[serde(default)]
    pub components: Vec<ComponentPayload>,
    /// Present (possibly null) on replies
    #[serde(default)]
    pub referenced_message: Option<Box<MessageObject>>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<MessageObject> for Message {
    fn from(message: MessageObject) -> Self {
        Self {
            id: MessageId::from(message.id),
            channel_id: ChannelId::from(message.channel_id),
            author_id: message.author.map(|author| MemberId::from(author.id)),
            content: message.content,
            embeds: message.embeds.into_iter().map(Embed::from).collect(),
            components: message
                .components
                .into_iter()
                .filter_map(ComponentPayload::into_action_row)
                .collect(),
            referenced_message: message
                .referenced_message
                .map(|parent| Box::new(Message::from(*parent))),
            timestamp: message.timestamp,
        }
    }
}
