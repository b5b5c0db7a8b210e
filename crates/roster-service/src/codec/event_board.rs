//! Voice event board and summary rendering

use chrono::{DateTime, Utc};

use roster_core::{ActionRow, ActiveEvent, Button, ButtonStyle, MessageSend};

use super::components::EventComponent;
use super::format::{
    EVENT_BOARD_CONTENT, EVENT_BUTTONS_PER_ROW, EVENT_SUBMIT_LABEL, EVENT_SUMMARY_DATE_FORMAT,
};

/// Toggle board: one button per attendee, submit on its own row
pub fn render_board(event: &ActiveEvent) -> MessageSend {
    let buttons: Vec<Button> = event
        .attendees
        .iter()
        .map(|attendee| {
            let style = if attendee.attended {
                ButtonStyle::Primary
            } else {
                ButtonStyle::Danger
            };
            let custom_id = EventComponent::Toggle(attendee.member_id.clone()).custom_id();
            Button::new(attendee.label.clone(), style, custom_id)
        })
        .collect();

    let mut components: Vec<ActionRow> = buttons
        .chunks(EVENT_BUTTONS_PER_ROW)
        .map(|row| ActionRow {
            components: row.to_vec(),
        })
        .collect();
    components.push(ActionRow {
        components: vec![Button::new(
            EVENT_SUBMIT_LABEL,
            ButtonStyle::Success,
            EventComponent::Submit.custom_id(),
        )],
    });

    MessageSend {
        content: EVENT_BOARD_CONTENT.to_string(),
        embeds: Vec::new(),
        components,
    }
}

/// Dated heading followed by one line per attendee still marked present
pub fn render_summary(event: &ActiveEvent, date: DateTime<Utc>) -> MessageSend {
    let mut lines = vec![date.format(EVENT_SUMMARY_DATE_FORMAT).to_string()];
    lines.extend(event.attended().map(|a| a.label.clone()));
    MessageSend::text(lines.join("\n"))
}
