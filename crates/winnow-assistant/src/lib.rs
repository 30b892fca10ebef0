//! Conversational assistant client for the Winnow dashboard.
//!
//! Accepts typed or dictated submissions, forwards one request at a time to
//! the dashboard's chat endpoint, records the exchange in an append-only
//! conversation log and speaks replies, all in a user-selected language.

pub mod client;
pub mod controller;
pub mod error;
pub mod language;
pub mod log;
pub mod status;
pub mod types;

pub use client::{ChatBackend, HttpChatClient, TransportFailure};
pub use controller::{AssistantController, AssistantSettings};
pub use error::AssistantError;
pub use language::{Language, LanguageRegistry};
pub use log::ConversationLog;
pub use status::StatusTracker;
pub use types::{ChatReply, ChatRequest, ExchangeOutcome, MicState, SpeechUpdate};
