use serde::{Deserialize, Serialize};

use winnow_core::types::TurnId;

/// Body of `POST /ai/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Display name of the selected language, e.g. "English".
    pub language: String,
}

/// Body returned by the chat endpoint, on success and on most errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ChatReplyBody {
    #[serde(default)]
    pub reply: Option<String>,
}

/// A successful chat reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub reply: String,
}

/// How an accepted submission settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeOutcome {
    Replied {
        user_turn: TurnId,
        assistant_turn: TurnId,
        reply: String,
        /// Whether the reply was handed to the speech platform.
        spoken: bool,
    },
    /// The failure was recorded as an assistant turn.
    Failed {
        user_turn: TurnId,
        assistant_turn: TurnId,
        diagnostic: String,
    },
}

impl ExchangeOutcome {
    pub fn assistant_turn(&self) -> TurnId {
        match self {
            ExchangeOutcome::Replied { assistant_turn, .. }
            | ExchangeOutcome::Failed { assistant_turn, .. } => *assistant_turn,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ExchangeOutcome::Failed { .. })
    }
}

/// Microphone state after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicState {
    On,
    Off,
}

/// Change applied to the controller by live speech recognition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechUpdate {
    /// The staging buffer now holds this transcript.
    Transcript(String),
    /// Recognition ended on its own; the staging buffer is kept for editing.
    Ended { transcript: String },
    /// Recognition failed; the mic is off.
    Failed { cause: String },
}
