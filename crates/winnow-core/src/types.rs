use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Enums
// =============================================================================

/// Who authored a conversation turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// UI-facing status of the assistant session.
///
/// Exactly one status is active at a time. Valid transitions:
/// - Idle -> Listening (mic on)
/// - Listening -> Idle (mic off, recognizer ended or failed)
/// - Idle -> Sending, Listening -> Sending (submission accepted)
/// - Sending -> Idle (reply received)
/// - Sending -> Error -> Idle (transport failure, error is transient)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Idle,
    Listening,
    Sending,
    Error,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Idle => write!(f, "Idle"),
            SessionStatus::Listening => write!(f, "Listening"),
            SessionStatus::Sending => write!(f, "Sending"),
            SessionStatus::Error => write!(f, "Error"),
        }
    }
}

impl SessionStatus {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &SessionStatus) -> bool {
        matches!(
            (self, target),
            (SessionStatus::Idle, SessionStatus::Listening)
                | (SessionStatus::Listening, SessionStatus::Idle)
                | (SessionStatus::Idle, SessionStatus::Sending)
                // Submitting ends live dictation
                | (SessionStatus::Listening, SessionStatus::Sending)
                | (SessionStatus::Sending, SessionStatus::Idle)
                | (SessionStatus::Sending, SessionStatus::Error)
                | (SessionStatus::Error, SessionStatus::Idle)
        )
    }
}

// =============================================================================
// Newtype Wrappers
// =============================================================================

/// Position of a turn in the conversation log, assigned in append order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TurnId(pub u64);

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "turn-{}", self.0)
    }
}

/// Unix timestamp in milliseconds since epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.0).unwrap_or_default()
    }
}

// =============================================================================
// Structs
// =============================================================================

/// One message in the conversation. Immutable once appended to the log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub id: TurnId,
    pub role: Role,
    pub text: String,
    pub created_at: Timestamp,
}

impl Turn {
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [SessionStatus; 4] = [
        SessionStatus::Idle,
        SessionStatus::Listening,
        SessionStatus::Sending,
        SessionStatus::Error,
    ];

    #[test]
    fn test_status_display() {
        assert_eq!(SessionStatus::Idle.to_string(), "Idle");
        assert_eq!(SessionStatus::Listening.to_string(), "Listening");
        assert_eq!(SessionStatus::Sending.to_string(), "Sending");
        assert_eq!(SessionStatus::Error.to_string(), "Error");
    }

    #[test]
    fn test_valid_transitions() {
        // Voice capture cycle
        assert!(SessionStatus::Idle.can_transition_to(&SessionStatus::Listening));
        assert!(SessionStatus::Listening.can_transition_to(&SessionStatus::Idle));

        // Submission cycle
        assert!(SessionStatus::Idle.can_transition_to(&SessionStatus::Sending));
        assert!(SessionStatus::Listening.can_transition_to(&SessionStatus::Sending));
        assert!(SessionStatus::Sending.can_transition_to(&SessionStatus::Idle));
        assert!(SessionStatus::Sending.can_transition_to(&SessionStatus::Error));
        assert!(SessionStatus::Error.can_transition_to(&SessionStatus::Idle));
    }

    #[test]
    fn test_invalid_transitions() {
        // Listening and Sending are mutually exclusive
        assert!(!SessionStatus::Sending.can_transition_to(&SessionStatus::Listening));

        // Error only leads back to Idle
        assert!(!SessionStatus::Error.can_transition_to(&SessionStatus::Listening));
        assert!(!SessionStatus::Error.can_transition_to(&SessionStatus::Sending));
        assert!(!SessionStatus::Idle.can_transition_to(&SessionStatus::Error));
        assert!(!SessionStatus::Listening.can_transition_to(&SessionStatus::Error));

        for status in ALL {
            assert!(!status.can_transition_to(&status), "{status} -> {status}");
        }
    }

    #[test]
    fn test_status_default_is_idle() {
        assert_eq!(SessionStatus::default(), SessionStatus::Idle);
    }

    #[test]
    fn test_status_serde_snake_case() {
        let json = serde_json::to_string(&SessionStatus::Listening).unwrap();
        assert_eq!(json, "\"listening\"");
        let role: Role = serde_json::from_str("\"assistant\"").unwrap();
        assert_eq!(role, Role::Assistant);
    }

    #[test]
    fn test_turn_id_ordering() {
        assert!(TurnId(1) < TurnId(2));
        assert_eq!(TurnId(7).to_string(), "turn-7");
    }

    #[test]
    fn test_timestamp_round_trip() {
        let ts = Timestamp::now();
        assert_eq!(ts.to_datetime().timestamp_millis(), ts.0);
    }
}
