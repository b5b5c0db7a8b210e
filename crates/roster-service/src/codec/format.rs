//! Roster message grammar
//!
//! Every literal and pattern the renderer writes and the parser reads lives
//! here. Changing one side without the other breaks recovery of rosters
//! already posted in chat, so bump [`GRAMMAR_VERSION`] on any change.

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;

use roster_core::AttendanceId;

use super::CodecError;

pub const GRAMMAR_VERSION: u32 = 1;

pub const SUBMITTED_BY_FIELD: &str = "Submitted By";
pub const ATTENDEES_FIELD: &str = "Attendees";
pub const ISSUES_FIELD: &str = "Attendees with Issues";
pub const ISSUES_CONTINUED_FIELD: &str = "Attendees with Issues (continued)";

/// Placeholder value for an empty attendee field
pub const NO_MEMBERS: &str = "No members";

/// Lines per attendee or issue field
pub const LINES_PER_FIELD: usize = 10;

pub const FOOTER_PREFIX: &str = "Last Updated";

/// Captures the roster id from a footer; the timestamp is not parsed
pub const FOOTER_PATTERN: &str = r"Last Updated .*?\((.*?)\)";

/// Thread opening line: `name(id)`
pub const OPENING_PATTERN: &str = r"^(.*?)\((.*?)\)";

/// Leading mention token: `<@id>`, `<@!id>` or `<@id:extra>`
pub const MENTION_PATTERN: &str = r"^<@!?([^>:\s]+)(?::[^>]*)?>";

pub const RECORD_LABEL: &str = "Record";
pub const DELETE_LABEL: &str = "Delete";
pub const RECHECK_LABEL: &str = "Recheck Issues";
pub const RECORD_EMOJI: &str = "✅";
pub const DELETE_EMOJI: &str = "🗑️";
pub const RECHECK_EMOJI: &str = "🔁";

/// Namespace of roster button custom ids: `attendance:<action>:<id>`
pub const ROSTER_COMPONENT_PREFIX: &str = "attendance";

/// Namespace of voice event button custom ids
pub const EVENT_COMPONENT_PREFIX: &str = "event:attendance";
pub const EVENT_TOGGLE_PREFIX: &str = "event:attendance:toggle:";
pub const EVENT_SUBMIT_ID: &str = "event:attendance:submit";

pub const EVENT_BOARD_CONTENT: &str =
    "Click any member to toggle their attendance.\n:blue_square: attended    :red_square: not attended";
pub const EVENT_SUBMIT_LABEL: &str = "Submit";
pub const EVENT_BUTTONS_PER_ROW: usize = 5;
/// Four rows of attendees plus the submit row
pub const EVENT_MAX_PARTICIPANTS: usize = 20;
/// Summary heading, e.g. `**Jan 02**`
pub const EVENT_SUMMARY_DATE_FORMAT: &str = "**%b %d**";

pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn footer_text(updated: DateTime<Utc>, id: &AttendanceId) -> String {
    format!("{FOOTER_PREFIX} {} ({id})", timestamp(updated))
}

pub fn mention_line(mention: &str, reason: Option<&str>) -> String {
    match reason {
        Some(reason) => format!("{mention} - {reason}"),
        None => mention.to_string(),
    }
}

pub(crate) fn compile(pattern: &str) -> Result<Regex, CodecError> {
    Regex::new(pattern).map_err(|e| CodecError::Pattern(e.to_string()))
}
