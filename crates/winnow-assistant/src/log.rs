//! Append-only conversation log.
//!
//! Insertion order is display order and causal order. Turns strictly
//! alternate starting with a user turn, and every assistant turn answers the
//! user turn immediately before it.

use std::sync::{Mutex, MutexGuard, PoisonError};

use winnow_core::error::{Result, WinnowError};
use winnow_core::types::{Role, Timestamp, Turn, TurnId};

#[derive(Debug, Default)]
pub struct ConversationLog {
    turns: Mutex<Vec<Turn>>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Turn>> {
        self.turns.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(turns: &mut Vec<Turn>, role: Role, text: &str) -> TurnId {
        let id = TurnId(turns.len() as u64);
        turns.push(Turn {
            id,
            role,
            text: text.to_string(),
            created_at: Timestamp::now(),
        });
        id
    }

    /// Append a user turn. Fails while the previous user turn is unanswered.
    pub fn append_user(&self, text: &str) -> Result<TurnId> {
        let mut turns = self.lock();
        if let Some(last) = turns.last().filter(|t| t.is_user()) {
            return Err(WinnowError::Conversation(format!(
                "{} is still awaiting a reply",
                last.id
            )));
        }
        Ok(Self::push(&mut turns, Role::User, text))
    }

    /// Append the assistant turn answering `answers`, which must be the
    /// latest turn in the log.
    pub fn append_assistant(&self, answers: TurnId, text: &str) -> Result<TurnId> {
        let mut turns = self.lock();
        match turns.last() {
            Some(last) if last.is_user() && last.id == answers => {
                Ok(Self::push(&mut turns, Role::Assistant, text))
            }
            _ => Err(WinnowError::Conversation(format!(
                "{} is not the pending user turn",
                answers
            ))),
        }
    }

    /// Copy of every turn appended so far.
    pub fn snapshot(&self) -> Vec<Turn> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
