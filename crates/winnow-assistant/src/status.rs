//! Session status tracker with validated transitions.
//!
//! Holds the single `SessionStatus` in a `tokio::sync::watch` channel so the
//! UI can observe it, and refuses transitions the status graph does not
//! allow (see [`SessionStatus::can_transition_to`]).

use tokio::sync::watch;

use winnow_core::types::SessionStatus;

use crate::error::AssistantError;

#[derive(Debug)]
pub struct StatusTracker {
    tx: watch::Sender<SessionStatus>,
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusTracker {
    /// Create a tracker initialized to `Idle`.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionStatus::Idle);
        Self { tx }
    }

    pub fn current(&self) -> SessionStatus {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.tx.subscribe()
    }

    /// Move to `target`, returning the status it replaced.
    pub fn transition(&self, target: SessionStatus) -> Result<SessionStatus, AssistantError> {
        let mut outcome = Err(AssistantError::InvalidTransition {
            from: self.current(),
            to: target,
        });
        self.tx.send_if_modified(|status| {
            if status.can_transition_to(&target) {
                tracing::debug!("Assistant status: {} -> {}", *status, target);
                outcome = Ok(*status);
                *status = target;
                true
            } else {
                outcome = Err(AssistantError::InvalidTransition {
                    from: *status,
                    to: target,
                });
                false
            }
        });
        outcome
    }
}
