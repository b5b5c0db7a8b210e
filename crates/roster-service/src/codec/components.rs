//! Button custom ids
//!
//! Roster controls use `attendance:<record|delete|recheck>:<id>`; the voice
//! event board uses `event:attendance:toggle:<member_id>` and
//! `event:attendance:submit`.

use std::fmt;
use std::str::FromStr;

use roster_core::{AttendanceId, MemberId};

use super::format::{EVENT_SUBMIT_ID, EVENT_TOGGLE_PREFIX, ROSTER_COMPONENT_PREFIX};
use super::CodecError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RosterAction {
    Record,
    Delete,
    Recheck,
}

impl RosterAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Record => "record",
            Self::Delete => "delete",
            Self::Recheck => "recheck",
        }
    }
}

impl fmt::Display for RosterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RosterAction {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "record" => Ok(Self::Record),
            "delete" => Ok(Self::Delete),
            "recheck" => Ok(Self::Recheck),
            other => Err(CodecError::UnknownComponent(other.to_string())),
        }
    }
}

/// A roster control button press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterComponent {
    pub action: RosterAction,
    pub attendance_id: AttendanceId,
}

impl RosterComponent {
    pub fn new(action: RosterAction, attendance_id: AttendanceId) -> Self {
        Self {
            action,
            attendance_id,
        }
    }

    pub fn custom_id(&self) -> String {
        format!("{ROSTER_COMPONENT_PREFIX}:{}:{}", self.action, self.attendance_id)
    }
}

impl FromStr for RosterComponent {
    type Err = CodecError;

    fn from_str(custom_id: &str) -> Result<Self, Self::Err> {
        let unknown = || CodecError::UnknownComponent(custom_id.to_string());

        let mut parts = custom_id.splitn(3, ':');
        if parts.next() != Some(ROSTER_COMPONENT_PREFIX) {
            return Err(unknown());
        }
        let action: RosterAction = parts.next().ok_or_else(unknown)?.parse().map_err(|_| unknown())?;
        let id = parts.next().filter(|id| !id.is_empty()).ok_or_else(unknown)?;

        Ok(Self::new(action, AttendanceId::from(id)))
    }
}

/// A voice event board button press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventComponent {
    Toggle(MemberId),
    Submit,
}

impl EventComponent {
    pub fn custom_id(&self) -> String {
        match self {
            Self::Toggle(member_id) => format!("{EVENT_TOGGLE_PREFIX}{member_id}"),
            Self::Submit => EVENT_SUBMIT_ID.to_string(),
        }
    }
}

impl FromStr for EventComponent {
    type Err = CodecError;

    fn from_str(custom_id: &str) -> Result<Self, Self::Err> {
        if custom_id == EVENT_SUBMIT_ID {
            return Ok(Self::Submit);
        }
        match custom_id.strip_prefix(EVENT_TOGGLE_PREFIX) {
            Some(id) if !id.is_empty() => Ok(Self::Toggle(MemberId::from(id))),
            _ => Err(CodecError::UnknownComponent(custom_id.to_string())),
        }
    }
}

/// Any button this service renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    Roster(RosterComponent),
    Event(EventComponent),
}

impl FromStr for Component {
    type Err = CodecError;

    fn from_str(custom_id: &str) -> Result<Self, Self::Err> {
        if custom_id.starts_with(super::format::EVENT_COMPONENT_PREFIX) {
            custom_id.parse().map(Self::Event)
        } else {
            custom_id.parse().map(Self::Roster)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_custom_id_round_trip() {
        for action in [RosterAction::Record, RosterAction::Delete, RosterAction::Recheck] {
            let component = RosterComponent::new(action, AttendanceId::from("1234"));
            let parsed: RosterComponent = component.custom_id().parse().unwrap();
            assert_eq!(parsed, component);
        }
    }

    #[test]
    fn test_roster_custom_id_rejects_unknown() {
        for bad in [
            "attendance:archive:1",
            "attendance:record",
            "attendance:record:",
            "roster:record:1",
            "",
        ] {
            assert!(
                matches!(bad.parse::<RosterComponent>(), Err(CodecError::UnknownComponent(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_event_custom_ids() {
        assert_eq!(
            "event:attendance:toggle:m1".parse::<EventComponent>().unwrap(),
            EventComponent::Toggle(MemberId::from("m1"))
        );
        assert_eq!(
            "event:attendance:submit".parse::<EventComponent>().unwrap(),
            EventComponent::Submit
        );
        assert!("event:attendance:toggle:".parse::<EventComponent>().is_err());
        assert_eq!(
            EventComponent::Toggle(MemberId::from("m9")).custom_id(),
            "event:attendance:toggle:m9"
        );
    }

    #[test]
    fn test_component_dispatch() {
        assert!(matches!(
            "attendance:record:r1".parse::<Component>(),
            Ok(Component::Roster(_))
        ));
        assert!(matches!(
            "event:attendance:submit".parse::<Component>(),
            Ok(Component::Event(EventComponent::Submit))
        ));
        assert!("bank:deposit:1".parse::<Component>().is_err());
    }
}
