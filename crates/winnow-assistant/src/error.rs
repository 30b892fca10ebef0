//! Error types returned synchronously to the assistant's callers.
//!
//! Failures after a submission was accepted never show up here: they are
//! written into the conversation log instead.

use winnow_core::error::WinnowError;
use winnow_core::types::SessionStatus;
use winnow_speech::SpeechError;

/// Errors from the assistant session controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssistantError {
    #[error("message cannot be empty")]
    EmptyInput,
    #[error("a chat request is already in flight")]
    AlreadyInFlight,
    #[error("unsupported capability: {0}")]
    UnsupportedCapability(String),
    #[error("unknown language: {0}")]
    UnknownLanguage(String),
    #[error("unknown quick prompt: {0}")]
    UnknownQuickPrompt(usize),
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: SessionStatus,
        to: SessionStatus,
    },
    #[error("speech error: {0}")]
    Speech(String),
    #[error("conversation error: {0}")]
    Conversation(String),
}

impl From<SpeechError> for AssistantError {
    fn from(err: SpeechError) -> Self {
        match err {
            SpeechError::UnsupportedCapability(what) => AssistantError::UnsupportedCapability(what),
            SpeechError::Platform(cause) => AssistantError::Speech(cause),
        }
    }
}

impl From<WinnowError> for AssistantError {
    fn from(err: WinnowError) -> Self {
        match err {
            WinnowError::Conversation(msg) => AssistantError::Conversation(msg),
            other => AssistantError::Conversation(other.to_string()),
        }
    }
}
