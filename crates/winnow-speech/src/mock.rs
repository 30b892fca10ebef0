//! Mock speech platforms.
//!
//! Used for testing and development on hosts without recognition or
//! synthesis support. The recognizer hands its sink back to the caller so a
//! test can play the platform's part.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::SpeechError;
use crate::input::{ActiveRecognition, RecognizerSink, SpeechRecognizer};
use crate::output::{SpeechSynthesizer, Utterance};

// =============================================================================
// Recognizer
// =============================================================================

#[derive(Default)]
struct RecognizerState {
    sink: Option<RecognizerSink>,
    locales: Vec<String>,
}

/// Mock recognizer that records every `begin` and exposes the latest sink.
pub struct MockRecognizer {
    available: bool,
    fail_with: Option<SpeechError>,
    state: Mutex<RecognizerState>,
    aborts: Arc<AtomicUsize>,
}

impl Default for MockRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRecognizer {
    pub fn new() -> Self {
        Self {
            available: true,
            fail_with: None,
            state: Mutex::new(RecognizerState::default()),
            aborts: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A recognizer whose platform reports no capability.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// A recognizer whose `begin` always fails with `err`.
    pub fn failing(err: SpeechError) -> Self {
        Self {
            fail_with: Some(err),
            ..Self::new()
        }
    }

    fn lock(&self) -> MutexGuard<'_, RecognizerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sink of the most recently started recognition.
    pub fn sink(&self) -> Option<RecognizerSink> {
        self.lock().sink.clone()
    }

    /// Locales passed to `begin`, in call order.
    pub fn started_locales(&self) -> Vec<String> {
        self.lock().locales.clone()
    }

    /// Number of times a running recognition was aborted.
    pub fn abort_count(&self) -> usize {
        self.aborts.load(Ordering::SeqCst)
    }
}

struct MockRecognition {
    aborts: Arc<AtomicUsize>,
}

impl ActiveRecognition for MockRecognition {
    fn abort(&mut self) {
        self.aborts.fetch_add(1, Ordering::SeqCst);
    }
}

impl SpeechRecognizer for MockRecognizer {
    fn is_available(&self) -> bool {
        self.available
    }

    fn begin(
        &self,
        locale: &str,
        sink: RecognizerSink,
    ) -> Result<Box<dyn ActiveRecognition>, SpeechError> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        let mut state = self.lock();
        state.sink = Some(sink);
        state.locales.push(locale.to_string());
        Ok(Box::new(MockRecognition {
            aborts: Arc::clone(&self.aborts),
        }))
    }
}

// =============================================================================
// Synthesizer
// =============================================================================

/// Mock synthesizer that records utterances instead of playing them.
pub struct MockSynthesizer {
    available: bool,
    fail: bool,
    spoken: Mutex<Vec<Utterance>>,
    cancels: AtomicUsize,
}

impl Default for MockSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSynthesizer {
    pub fn new() -> Self {
        Self {
            available: true,
            fail: false,
            spoken: Mutex::new(Vec::new()),
            cancels: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// A synthesizer whose every `speak` fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Utterances handed to the platform, in order.
    pub fn spoken(&self) -> Vec<Utterance> {
        self.spoken
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn cancel_count(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }
}

impl SpeechSynthesizer for MockSynthesizer {
    fn is_available(&self) -> bool {
        self.available
    }

    fn cancel(&self) {
        self.cancels.fetch_add(1, Ordering::SeqCst);
    }

    fn speak(&self, utterance: Utterance) -> Result<(), SpeechError> {
        if self.fail {
            return Err(SpeechError::Platform("synthesis-failed".to_string()));
        }
        self.spoken
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(utterance);
        Ok(())
    }
}
