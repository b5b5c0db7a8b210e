//! Attendance → chat message

use roster_core::{
    ActionRow, Attendance, Button, ButtonStyle, Embed, EmbedField, EmbedFooter, MessageSend,
};

use super::components::{RosterAction, RosterComponent};
use super::format::{
    self, ATTENDEES_FIELD, ISSUES_CONTINUED_FIELD, ISSUES_FIELD, LINES_PER_FIELD, NO_MEMBERS,
    SUBMITTED_BY_FIELD,
};

/// Render the roster as an embed with its control buttons
///
/// Pure; the same roster always renders the same message.
pub fn render(attendance: &Attendance) -> MessageSend {
    let mut fields = vec![EmbedField::new(
        SUBMITTED_BY_FIELD,
        attendance.submitted_by.mention(),
    )];

    let attendee_lines: Vec<String> = attendance.members.iter().map(|m| m.mention()).collect();
    if attendee_lines.is_empty() {
        fields.push(inline_field(ATTENDEES_FIELD, NO_MEMBERS.to_string()));
    } else {
        fields.extend(
            attendee_lines
                .chunks(LINES_PER_FIELD)
                .map(|chunk| inline_field(ATTENDEES_FIELD, chunk.join("\n"))),
        );
    }

    let issue_lines: Vec<String> = attendance
        .issues
        .iter()
        .map(|issue| format::mention_line(&issue.member.mention(), Some(&issue.reason)))
        .collect();
    fields.extend(
        issue_lines
            .chunks(LINES_PER_FIELD)
            .enumerate()
            .map(|(i, chunk)| {
                let name = if i == 0 { ISSUES_FIELD } else { ISSUES_CONTINUED_FIELD };
                inline_field(name, chunk.join("\n"))
            }),
    );

    let embed = Embed {
        title: Some(attendance.name.clone()),
        description: Some(attendance.id.to_string()),
        timestamp: Some(format::timestamp(attendance.date_created)),
        fields,
        footer: Some(EmbedFooter {
            text: format::footer_text(attendance.date_updated, &attendance.id),
        }),
    };

    MessageSend {
        content: String::new(),
        embeds: vec![embed],
        components: vec![controls(attendance)],
    }
}

fn inline_field(name: &str, value: String) -> EmbedField {
    EmbedField {
        name: name.to_string(),
        value,
        inline: true,
    }
}

fn controls(attendance: &Attendance) -> ActionRow {
    let button = |action: RosterAction, label: &str, style: ButtonStyle, emoji: &str| {
        let component = RosterComponent::new(action, attendance.id.clone());
        Button::new(label, style, component.custom_id())
            .with_emoji(emoji)
            .disabled(attendance.recorded)
    };

    ActionRow {
        components: vec![
            button(
                RosterAction::Record,
                format::RECORD_LABEL,
                ButtonStyle::Success,
                format::RECORD_EMOJI,
            ),
            button(
                RosterAction::Delete,
                format::DELETE_LABEL,
                ButtonStyle::Danger,
                format::DELETE_EMOJI,
            ),
            button(
                RosterAction::Recheck,
                format::RECHECK_LABEL,
                ButtonStyle::Primary,
                format::RECHECK_EMOJI,
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::{AttendanceId, AttendanceIssue, Member, MemberId};

    fn roster(members: usize, issues: usize) -> Attendance {
        let mut attendance =
            Attendance::new(AttendanceId::from("r1"), "Mining Op", MemberId::from("u1"));
        for i in 0..members {
            attendance.members.push(Member::new(format!("m{i}"), "x"));
        }
        for i in 0..issues {
            attendance.issues.push(AttendanceIssue {
                member: Member::new(format!("i{i}"), "x"),
                reason: "guest".to_string(),
            });
        }
        attendance
    }

    fn fields_named<'a>(msg: &'a MessageSend, name: &str) -> Vec<&'a EmbedField> {
        msg.embeds[0].fields.iter().filter(|f| f.name == name).collect()
    }

    #[test]
    fn test_embed_header_and_footer() {
        let attendance = roster(1, 0);
        let msg = render(&attendance);
        let embed = &msg.embeds[0];

        assert_eq!(embed.title.as_deref(), Some("Mining Op"));
        assert_eq!(embed.description.as_deref(), Some("r1"));
        assert_eq!(embed.fields[0].name, "Submitted By");
        assert_eq!(embed.fields[0].value, "<@u1>");
        assert!(!embed.fields[0].inline);

        let footer = &embed.footer.as_ref().unwrap().text;
        assert!(footer.starts_with("Last Updated "));
        assert!(footer.ends_with(" (r1)"));
    }

    #[test]
    fn test_empty_roster_renders_placeholder() {
        let msg = render(&roster(0, 0));
        let attendees = fields_named(&msg, ATTENDEES_FIELD);
        assert_eq!(attendees.len(), 1);
        assert_eq!(attendees[0].value, "No members");
        assert!(fields_named(&msg, ISSUES_FIELD).is_empty());
    }

    #[test]
    fn test_attendees_are_chunked_in_order() {
        for (n, expected_fields) in [(1, 1), (10, 1), (11, 2), (25, 3)] {
            let msg = render(&roster(n, 0));
            let attendees = fields_named(&msg, ATTENDEES_FIELD);
            assert_eq!(attendees.len(), expected_fields, "n = {n}");

            let lines: Vec<&str> = attendees.iter().flat_map(|f| f.value.lines()).collect();
            assert!(attendees.iter().all(|f| f.value.lines().count() <= 10));
            let expected: Vec<String> = (0..n).map(|i| format!("<@m{i}>")).collect();
            assert_eq!(lines, expected);
        }
    }

    #[test]
    fn test_issue_fields_continue() {
        let msg = render(&roster(0, 12));
        let first = fields_named(&msg, ISSUES_FIELD);
        let rest = fields_named(&msg, ISSUES_CONTINUED_FIELD);
        assert_eq!(first.len(), 1);
        assert_eq!(rest.len(), 1);
        assert_eq!(first[0].value.lines().next(), Some("<@i0> - guest"));
        assert_eq!(rest[0].value.lines().count(), 2);
    }

    #[test]
    fn test_controls_follow_recorded_flag() {
        let mut attendance = roster(0, 0);
        let msg = render(&attendance);
        let buttons = &msg.components[0].components;
        let ids: Vec<&str> = buttons.iter().map(|b| b.custom_id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["attendance:record:r1", "attendance:delete:r1", "attendance:recheck:r1"]
        );
        assert_eq!(buttons[0].style, ButtonStyle::Success);
        assert_eq!(buttons[1].style, ButtonStyle::Danger);
        assert_eq!(buttons[2].style, ButtonStyle::Primary);
        assert!(buttons.iter().all(|b| !b.disabled));

        attendance.record();
        let msg = render(&attendance);
        assert!(msg.components[0].components.iter().all(|b| b.disabled));
    }
}
