//! Process-backed speech synthesizer.
//!
//! Runs an external text-to-speech program such as `espeak-ng` per utterance.
//! Placeholders `{locale}`, `{rate}` and `{pitch}` in the argument list are
//! substituted; the utterance text is appended as the final argument.

use std::process::{Child, Command, Stdio};
use std::sync::{Mutex, MutexGuard, PoisonError};

use winnow_core::config::SpeechConfig;

use crate::error::SpeechError;
use crate::output::{SpeechSynthesizer, Utterance};

pub struct CommandSynthesizer {
    program: String,
    args: Vec<String>,
    current: Mutex<Option<Child>>,
}

impl std::fmt::Debug for CommandSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSynthesizer")
            .field("program", &self.program)
            .field("args", &self.args)
            .finish()
    }
}

impl CommandSynthesizer {
    /// Build from an argv list. Returns `None` for an empty list.
    pub fn new(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        if program.trim().is_empty() {
            return None;
        }
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
            current: Mutex::new(None),
        })
    }

    pub fn from_config(config: &SpeechConfig) -> Option<Self> {
        config.synthesis_command.as_deref().and_then(Self::new)
    }

    fn lock(&self) -> MutexGuard<'_, Option<Child>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether the last spawned utterance is still playing.
    pub fn is_speaking(&self) -> bool {
        let mut current = self.lock();
        match current.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }

    fn render_args(&self, utterance: &Utterance) -> Vec<String> {
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|arg| {
                arg.replace("{locale}", &utterance.locale)
                    .replace("{rate}", &utterance.voice.rate.to_string())
                    .replace("{pitch}", &utterance.voice.pitch.to_string())
            })
            .collect();
        args.push(utterance.text.clone());
        args
    }
}

impl SpeechSynthesizer for CommandSynthesizer {
    fn cancel(&self) {
        if let Some(mut child) = self.lock().take() {
            if let Ok(None) = child.try_wait() {
                tracing::debug!(pid = child.id(), "Cancelling running utterance");
                let _ = child.kill();
            }
            let _ = child.wait();
        }
    }

    fn speak(&self, utterance: Utterance) -> Result<(), SpeechError> {
        let args = self.render_args(&utterance);
        let child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SpeechError::Platform(format!("{}: {}", self.program, e)))?;

        let mut current = self.lock();
        if let Some(mut previous) = current.replace(child) {
            let _ = previous.kill();
            let _ = previous.wait();
        }
        Ok(())
    }
}

impl Drop for CommandSynthesizer {
    fn drop(&mut self) {
        self.cancel();
    }
}
