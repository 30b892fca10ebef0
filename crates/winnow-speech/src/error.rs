//! Error types for the speech platforms.

/// Errors from speech recognition or synthesis platforms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeechError {
    #[error("unsupported capability: {0}")]
    UnsupportedCapability(String),
    #[error("speech platform error: {0}")]
    Platform(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speech_error_display() {
        let err = SpeechError::UnsupportedCapability("no recognizer".to_string());
        assert_eq!(err.to_string(), "unsupported capability: no recognizer");

        let err = SpeechError::Platform("audio-capture".to_string());
        assert_eq!(err.to_string(), "speech platform error: audio-capture");
    }
}
