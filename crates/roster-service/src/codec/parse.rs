//! Chat message → roster data
//!
//! Parsing only extracts identifiers and member ids; resolving members and
//! loading the canonical roster is left to the service layer.

use roster_core::{AttendanceId, MemberId, Message};

use super::format::{self, FOOTER_PATTERN, MENTION_PATTERN, NO_MEMBERS, OPENING_PATTERN};
use super::CodecError;

/// Extract the roster id from a rendered roster message
///
/// The footer `Last Updated <date> (<id>)` is authoritative; footers
/// written without the id fall back to the embed description.
pub fn parse_attendance_id(message: &Message) -> Result<AttendanceId, CodecError> {
    let embed = message.first_embed().ok_or(CodecError::MissingEmbed)?;
    let footer_re = format::compile(FOOTER_PATTERN)?;

    let from_footer = embed
        .footer
        .as_ref()
        .and_then(|footer| footer_re.captures(&footer.text))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().trim())
        .filter(|id| !id.is_empty());

    let from_description = || {
        embed
            .description
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    };

    from_footer
        .or_else(from_description)
        .map(AttendanceId::from)
        .ok_or(CodecError::MissingId)
}

/// Roster skeleton recovered from a thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadRoster {
    pub id: AttendanceId,
    pub name: String,
    /// Author of the opening message, when the platform reported one
    pub submitted_by: Option<MemberId>,
    /// Mentioned member ids in order of appearance, duplicates included
    pub member_ids: Vec<MemberId>,
}

/// Recover a roster from an ordered list of thread messages
///
/// The last message must reply to the opening message `name(id)`; the
/// message before it carries the attendee list in its content and first
/// embed field.
pub fn parse_thread(messages: &[Message]) -> Result<ThreadRoster, CodecError> {
    let [.., body, last] = messages else {
        return Err(CodecError::ThreadTooShort(messages.len()));
    };

    let opening = last
        .referenced_message
        .as_deref()
        .ok_or(CodecError::MissingReference)?;
    let (name, id) = parse_opening(&opening.content)?;

    let mention_re = format::compile(MENTION_PATTERN)?;
    let field_lines = body
        .first_embed()
        .and_then(|embed| embed.fields.first())
        .map(|field| field.value.lines())
        .into_iter()
        .flatten();

    let member_ids = body
        .content
        .lines()
        .chain(field_lines)
        .map(str::trim)
        .filter(|line| !line.is_empty() && *line != NO_MEMBERS)
        .filter_map(|line| mention_re.captures(line))
        .filter_map(|captures| captures.get(1))
        .map(|m| MemberId::from(m.as_str()))
        .collect();

    Ok(ThreadRoster {
        id,
        name,
        submitted_by: opening.author_id.clone(),
        member_ids,
    })
}

fn parse_opening(content: &str) -> Result<(String, AttendanceId), CodecError> {
    let malformed = || CodecError::MalformedOpening(content.to_string());
    let opening_re = format::compile(OPENING_PATTERN)?;

    let captures = opening_re.captures(content.trim()).ok_or_else(malformed)?;
    let name = captures.get(1).map_or("", |m| m.as_str()).trim();
    let id = captures.get(2).map_or("", |m| m.as_str()).trim();

    if name.is_empty() || id.is_empty() {
        return Err(malformed());
    }
    Ok((name.to_string(), AttendanceId::from(id)))
}
