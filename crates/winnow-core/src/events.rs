use serde::{Deserialize, Serialize};

use crate::types::{Role, SessionStatus, Timestamp, TurnId};

/// Severity of a transient user-facing notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Info,
    Error,
}

/// Events emitted by the assistant session controller.
///
/// Consumed by the UI layer to refresh the transcript, the status indicator,
/// the staging buffer and the toast area.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AssistantEvent {
    /// The session status changed.
    StatusChanged {
        from: SessionStatus,
        to: SessionStatus,
        timestamp: Timestamp,
    },

    /// A turn was appended to the conversation log.
    TurnAppended {
        turn_id: TurnId,
        role: Role,
        timestamp: Timestamp,
    },

    /// Live recognition replaced the staging buffer with a new best guess.
    TranscriptUpdated { text: String, timestamp: Timestamp },

    /// The active language changed.
    LanguageChanged { code: String, timestamp: Timestamp },

    /// Speech output was muted or unmuted.
    MuteChanged { muted: bool, timestamp: Timestamp },

    /// A transient notification for the user.
    Notification {
        level: NotificationLevel,
        message: String,
        timestamp: Timestamp,
    },
}

impl AssistantEvent {
    /// Short machine-readable name of the event.
    pub fn event_type(&self) -> &'static str {
        match self {
            AssistantEvent::StatusChanged { .. } => "status_changed",
            AssistantEvent::TurnAppended { .. } => "turn_appended",
            AssistantEvent::TranscriptUpdated { .. } => "transcript_updated",
            AssistantEvent::LanguageChanged { .. } => "language_changed",
            AssistantEvent::MuteChanged { .. } => "mute_changed",
            AssistantEvent::Notification { .. } => "notification",
        }
    }

    pub fn notification(level: NotificationLevel, message: impl Into<String>) -> Self {
        AssistantEvent::Notification {
            level,
            message: message.into(),
            timestamp: Timestamp::now(),
        }
    }
}
