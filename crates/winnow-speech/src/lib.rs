//! Winnow Speech crate - live speech input and synthesized speech output.
//!
//! Platform speech capabilities are host-provided services with callback-style
//! event delivery. They sit behind the `SpeechRecognizer` and
//! `SpeechSynthesizer` traits so the assistant controller only depends on the
//! `SpeechInputSession` and `SpeechOutputChannel` contracts. Mock platforms
//! for tests live in [`mock`].

pub mod command;
pub mod error;
pub mod input;
pub mod mock;
pub mod output;

pub use command::CommandSynthesizer;
pub use error::SpeechError;
pub use input::{
    ActiveRecognition, InputPhase, RecognizerSink, SpeechInputSession, SpeechRecognizer,
    TranscriptEvent,
};
pub use output::{SpeechOutputChannel, SpeechSynthesizer, Utterance, VoiceParams};
