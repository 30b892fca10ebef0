//! Speech output channel: speaks one reply at a time, best effort.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use winnow_core::config::SpeechConfig;

use crate::error::SpeechError;

/// Voice parameters applied to every utterance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceParams {
    pub rate: f32,
    pub pitch: f32,
}

impl Default for VoiceParams {
    fn default() -> Self {
        Self {
            rate: 1.0,
            pitch: 1.0,
        }
    }
}

impl From<&SpeechConfig> for VoiceParams {
    fn from(config: &SpeechConfig) -> Self {
        Self {
            rate: config.rate,
            pitch: config.pitch,
        }
    }
}

/// A single synthesis request.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub locale: String,
    pub voice: VoiceParams,
}

/// A platform speech-synthesis capability.
pub trait SpeechSynthesizer: Send + Sync {
    fn is_available(&self) -> bool {
        true
    }

    /// Silence whatever is currently playing. No-op when nothing plays.
    fn cancel(&self);

    /// Start playing `utterance`.
    fn speak(&self, utterance: Utterance) -> Result<(), SpeechError>;
}

/// Last-write-wins speech output with a mute preference.
///
/// Speech is an enhancement on top of the text transcript: a missing
/// platform or a synthesis failure never surfaces as an error.
pub struct SpeechOutputChannel {
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    muted: AtomicBool,
    voice: VoiceParams,
}

impl std::fmt::Debug for SpeechOutputChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechOutputChannel")
            .field("has_synthesizer", &self.synthesizer.is_some())
            .field("muted", &self.is_muted())
            .field("voice", &self.voice)
            .finish()
    }
}

impl SpeechOutputChannel {
    pub fn new(synthesizer: Option<Arc<dyn SpeechSynthesizer>>, voice: VoiceParams) -> Self {
        Self {
            synthesizer,
            muted: AtomicBool::new(false),
            voice,
        }
    }

    /// A channel on a platform with no synthesizer.
    pub fn silent() -> Self {
        Self::new(None, VoiceParams::default())
    }

    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::SeqCst)
    }

    pub fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::SeqCst);
    }

    pub fn mute(&self) {
        self.set_muted(true);
    }

    pub fn unmute(&self) {
        self.set_muted(false);
    }

    /// Speak `text` in `locale`, cancelling any utterance still playing.
    ///
    /// Returns whether the utterance was handed to the platform.
    pub fn speak(&self, text: &str, locale: &str) -> bool {
        if self.is_muted() {
            return false;
        }
        let Some(synthesizer) = self.synthesizer.as_ref().filter(|s| s.is_available()) else {
            tracing::trace!("No speech synthesizer available, skipping");
            return false;
        };

        synthesizer.cancel();
        let utterance = Utterance {
            text: text.to_string(),
            locale: locale.to_string(),
            voice: self.voice,
        };
        match synthesizer.speak(utterance) {
            Ok(()) => {
                tracing::debug!(locale, chars = text.chars().count(), "Speaking reply");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Speech synthesis failed");
                false
            }
        }
    }
}
