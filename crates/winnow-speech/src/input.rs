//! Speech input session: one live microphone recognition at a time.
//!
//! A platform recognizer is started with a [`RecognizerSink`] and reports
//! through it the way browser-style recognizers fire `onresult`, `onend` and
//! `onerror` callbacks. The session turns those raw signals into a sequence of
//! [`TranscriptEvent`]s with these guarantees:
//! - every `Partial` carries the cumulative best guess for the utterance,
//!   replacing the previous one;
//! - every started recognition ends with exactly one terminal event
//!   (`Completed` or `Failed`), after which no further events are produced;
//! - signals from a recognition other than the current one are dropped.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::error::SpeechError;

// =============================================================================
// Platform boundary
// =============================================================================

#[derive(Debug, Clone)]
enum PlatformSignal {
    Results(Vec<String>),
    End,
    Error(String),
    /// Internal: unblocks a pending `next_event` after `stop()`.
    Wake,
}

#[derive(Debug)]
struct TaggedSignal {
    generation: u64,
    signal: PlatformSignal,
}

/// Callback handle a platform recognizer uses to report results.
///
/// Each sink is bound to the recognition it was handed to; once that
/// recognition has ended, anything sent through the sink is ignored.
#[derive(Debug, Clone)]
pub struct RecognizerSink {
    generation: u64,
    tx: mpsc::UnboundedSender<TaggedSignal>,
}

impl RecognizerSink {
    /// Report every result segment recognized so far for this utterance.
    ///
    /// Segments are concatenated into the cumulative transcript.
    pub fn results<I, S>(&self, segments: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments = segments.into_iter().map(Into::into).collect();
        self.send(PlatformSignal::Results(segments));
    }

    /// Report a single-segment transcript.
    pub fn interim(&self, transcript: impl Into<String>) {
        self.send(PlatformSignal::Results(vec![transcript.into()]));
    }

    /// The recognizer stopped on its own (silence detected).
    pub fn end(&self) {
        self.send(PlatformSignal::End);
    }

    /// The recognizer failed with a human-readable cause.
    pub fn error(&self, cause: impl Into<String>) {
        self.send(PlatformSignal::Error(cause.into()));
    }

    fn send(&self, signal: PlatformSignal) {
        // The receiver lives as long as the session; a send error means the
        // session is gone and nobody is listening anymore.
        let _ = self.tx.send(TaggedSignal {
            generation: self.generation,
            signal,
        });
    }
}

/// A running platform recognition that can be aborted.
pub trait ActiveRecognition: Send {
    /// Stop capturing. Must tolerate being called after the platform has
    /// already ended on its own.
    fn abort(&mut self);
}

/// A platform speech-recognition capability.
pub trait SpeechRecognizer: Send + Sync {
    /// Whether the platform can recognize speech at all.
    fn is_available(&self) -> bool {
        true
    }

    /// Begin capturing in `locale`, reporting through `sink`.
    fn begin(
        &self,
        locale: &str,
        sink: RecognizerSink,
    ) -> Result<Box<dyn ActiveRecognition>, SpeechError>;
}

// =============================================================================
// Session
// =============================================================================

/// Event produced by a speech input session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEvent {
    /// Cumulative best-guess transcript for the current utterance.
    Partial { session: Uuid, transcript: String },
    /// The recognition ended normally, by silence or by `stop()`.
    Completed { session: Uuid, transcript: String },
    /// The platform reported a recognition error.
    Failed { session: Uuid, cause: String },
}

impl TranscriptEvent {
    /// Id of the recognition this event belongs to.
    pub fn session(&self) -> Uuid {
        match self {
            TranscriptEvent::Partial { session, .. }
            | TranscriptEvent::Completed { session, .. }
            | TranscriptEvent::Failed { session, .. } => *session,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, TranscriptEvent::Partial { .. })
    }
}

/// Lifecycle phase of the speech input session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputPhase {
    /// Never started.
    Idle,
    Listening,
    /// The last recognition has terminated. `start` may be called again.
    Ended,
}

struct Capture {
    id: Uuid,
    locale: String,
    transcript: String,
    handle: Box<dyn ActiveRecognition>,
}

enum Termination {
    Completed,
    Failed(String),
}

struct InputState {
    phase: InputPhase,
    generation: u64,
    capture: Option<Capture>,
    terminals: VecDeque<TranscriptEvent>,
}

impl InputState {
    /// Move to `Ended` and queue the single terminal event of the capture.
    ///
    /// Only the latest undelivered terminal is kept, so a host that never
    /// reads events does not accumulate them across start/stop cycles.
    fn finish(&mut self, termination: Termination) {
        if self.phase != InputPhase::Listening {
            return;
        }
        self.phase = InputPhase::Ended;
        let Some(capture) = self.capture.as_ref() else {
            return;
        };
        let event = match termination {
            Termination::Completed => TranscriptEvent::Completed {
                session: capture.id,
                transcript: capture.transcript.clone(),
            },
            Termination::Failed(cause) => TranscriptEvent::Failed {
                session: capture.id,
                cause,
            },
        };
        self.terminals.clear();
        self.terminals.push_back(event);
    }
}

/// Counts a task blocked in `next_event` for as long as it is alive.
struct Waiting<'a>(&'a AtomicUsize);

impl<'a> Waiting<'a> {
    fn register(count: &'a AtomicUsize) -> Self {
        count.fetch_add(1, Ordering::SeqCst);
        Self(count)
    }
}

impl Drop for Waiting<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Wraps one platform recognizer and exposes a restartable transcript
/// sequence for the currently selected language.
pub struct SpeechInputSession {
    recognizer: Option<Arc<dyn SpeechRecognizer>>,
    state: Mutex<InputState>,
    signal_tx: mpsc::UnboundedSender<TaggedSignal>,
    signal_rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<TaggedSignal>>,
    waiting: AtomicUsize,
}

impl std::fmt::Debug for SpeechInputSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechInputSession")
            .field("has_recognizer", &self.recognizer.is_some())
            .field("phase", &self.phase())
            .field("session_id", &self.session_id())
            .finish()
    }
}

impl SpeechInputSession {
    pub fn new(recognizer: Option<Arc<dyn SpeechRecognizer>>) -> Self {
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();
        Self {
            recognizer,
            state: Mutex::new(InputState {
                phase: InputPhase::Idle,
                generation: 0,
                capture: None,
                terminals: VecDeque::new(),
            }),
            signal_tx,
            signal_rx: tokio::sync::Mutex::new(signal_rx),
            waiting: AtomicUsize::new(0),
        }
    }

    /// A session on a platform with no recognizer.
    pub fn unsupported() -> Self {
        Self::new(None)
    }

    /// Whether `start` can succeed on this platform.
    pub fn is_supported(&self) -> bool {
        self.recognizer.as_ref().is_some_and(|r| r.is_available())
    }

    fn lock(&self) -> MutexGuard<'_, InputState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn phase(&self) -> InputPhase {
        self.lock().phase
    }

    /// Id of the most recently started recognition.
    pub fn session_id(&self) -> Option<Uuid> {
        self.lock().capture.as_ref().map(|c| c.id)
    }

    /// Locale the most recent recognition was started with.
    pub fn locale(&self) -> Option<String> {
        self.lock().capture.as_ref().map(|c| c.locale.clone())
    }

    /// Latest cumulative transcript of the most recent recognition.
    pub fn transcript(&self) -> String {
        self.lock()
            .capture
            .as_ref()
            .map(|c| c.transcript.clone())
            .unwrap_or_default()
    }

    /// Begin listening in `locale` and return the new recognition id.
    ///
    /// Calling this while already listening leaves the running recognition
    /// untouched and returns its id.
    pub fn start(&self, locale: &str) -> Result<Uuid, SpeechError> {
        let recognizer = match &self.recognizer {
            Some(r) if r.is_available() => Arc::clone(r),
            _ => {
                return Err(SpeechError::UnsupportedCapability(
                    "no speech recognizer on this platform".to_string(),
                ))
            }
        };

        let mut state = self.lock();
        if state.phase == InputPhase::Listening {
            if let Some(capture) = &state.capture {
                tracing::debug!(session_id = %capture.id, "Speech input already listening");
                return Ok(capture.id);
            }
        }

        let generation = state.generation + 1;
        let sink = RecognizerSink {
            generation,
            tx: self.signal_tx.clone(),
        };
        let handle = recognizer.begin(locale, sink)?;

        let id = Uuid::new_v4();
        state.generation = generation;
        state.phase = InputPhase::Listening;
        state.capture = Some(Capture {
            id,
            locale: locale.to_string(),
            transcript: String::new(),
            handle,
        });
        tracing::info!(session_id = %id, locale, "Speech input session started");
        Ok(id)
    }

    /// Stop the current recognition. No-op unless listening.
    pub fn stop(&self) {
        let mut state = self.lock();
        if state.phase != InputPhase::Listening {
            return;
        }
        if let Some(capture) = state.capture.as_mut() {
            capture.handle.abort();
            tracing::info!(session_id = %capture.id, "Speech input session stopped");
        }
        state.finish(Termination::Completed);
        let generation = state.generation;
        drop(state);

        // A reader registers before checking the terminal queue, so either it
        // sees the terminal queued above or it is counted here.
        if self.waiting.load(Ordering::SeqCst) > 0 {
            let _ = self.signal_tx.send(TaggedSignal {
                generation,
                signal: PlatformSignal::Wake,
            });
        }
    }

    /// Wait for the next transcript event.
    ///
    /// Returns `None` once the current recognition has terminated and its
    /// terminal event was delivered, or when nothing was ever started.
    pub async fn next_event(&self) -> Option<TranscriptEvent> {
        loop {
            let waiting = Waiting::register(&self.waiting);
            {
                let mut state = self.lock();
                if let Some(terminal) = state.terminals.pop_front() {
                    return Some(terminal);
                }
                if state.phase != InputPhase::Listening {
                    return None;
                }
            }

            let tagged = self.signal_rx.lock().await.recv().await?;
            drop(waiting);

            let mut state = self.lock();
            if tagged.generation != state.generation || state.phase != InputPhase::Listening {
                tracing::trace!(generation = tagged.generation, "Dropping stale recognizer signal");
                continue;
            }
            match tagged.signal {
                PlatformSignal::Results(segments) => {
                    if let Some(capture) = state.capture.as_mut() {
                        capture.transcript = segments.concat();
                        return Some(TranscriptEvent::Partial {
                            session: capture.id,
                            transcript: capture.transcript.clone(),
                        });
                    }
                }
                PlatformSignal::End => state.finish(Termination::Completed),
                PlatformSignal::Error(cause) => {
                    tracing::warn!(cause = %cause, "Speech recognition failed");
                    state.finish(Termination::Failed(cause));
                }
                PlatformSignal::Wake => {}
            }
        }
    }
}

impl Drop for SpeechInputSession {
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        if state.phase == InputPhase::Listening {
            if let Some(capture) = state.capture.as_mut() {
                capture.handle.abort();
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
