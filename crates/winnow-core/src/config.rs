use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, WinnowError};

/// Top-level configuration for the Winnow assistant client.
///
/// Loaded from `~/.winnow/assistant.toml` by default. Everything the
/// assistant needs from its surroundings (backend address, auth token,
/// locale) arrives through this struct rather than ambient global state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WinnowConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
}

impl WinnowConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: WinnowConfig = toml::from_str(&content)?;
        config.validate()?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Reject values that would make the assistant unusable.
    pub fn validate(&self) -> Result<()> {
        if self.backend.timeout_secs == 0 {
            return Err(WinnowError::Config(
                "backend.timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| WinnowError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Chat backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the dashboard backend.
    pub base_url: String,
    /// Path of the chat endpoint, joined onto `base_url`.
    pub chat_path: String,
    /// Ceiling for one chat call, in seconds.
    pub timeout_secs: u64,
    /// Bearer token sent with every chat call when present.
    pub auth_token: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            chat_path: "/ai/chat".to_string(),
            timeout_secs: 20,
            auth_token: None,
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full URL of the chat endpoint.
    pub fn chat_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.chat_path.trim_start_matches('/')
        )
    }
}

/// Assistant behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Locale code selected at startup.
    pub default_language: String,
    /// Whether speech output starts muted.
    pub muted: bool,
    /// Introductory line shown above the conversation.
    pub greeting: String,
    /// Fixed shortcut prompts offered to the user.
    pub quick_prompts: Vec<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            default_language: "en-IN".to_string(),
            muted: false,
            greeting: "Hi 👋 I’m your AI Food Waste Assistant.\n\
                       I answer only using your dashboard billing + forecast data."
                .to_string(),
            quick_prompts: vec![
                "Tomorrow forecast: top 5 items by predicted quantity.".to_string(),
                "Waste risk: list items tagged OVERPRODUCTION_RISK.".to_string(),
                "Waste cost: show estimated loss and top risk items.".to_string(),
            ],
        }
    }
}

/// Speech synthesis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Speaking rate multiplier.
    pub rate: f32,
    /// Voice pitch multiplier.
    pub pitch: f32,
    /// Text-to-speech command, e.g. `["espeak-ng", "-v", "{locale}"]`.
    /// The utterance text is appended as the final argument.
    pub synthesis_command: Option<Vec<String>>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            rate: 1.0,
            pitch: 1.0,
            synthesis_command: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = WinnowConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.backend.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.backend.chat_path, "/ai/chat");
        assert_eq!(config.backend.timeout_secs, 20);
        assert!(config.backend.auth_token.is_none());
        assert_eq!(config.assistant.default_language, "en-IN");
        assert!(!config.assistant.muted);
        assert_eq!(config.assistant.quick_prompts.len(), 3);
        assert_eq!(config.speech.rate, 1.0);
        assert!(config.speech.synthesis_command.is_none());
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
[general]
log_level = "debug"

[backend]
base_url = "https://dash.example.com/"
chat_path = "ai/chat"
timeout_secs = 5
auth_token = "secret"

[assistant]
default_language = "ta-IN"
muted = true
quick_prompts = ["Sales today?"]

[speech]
rate = 1.2
synthesis_command = ["espeak-ng", "-v", "{locale}"]
"#;
        let file = create_temp_config(content);
        let config = WinnowConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.backend.auth_token.as_deref(), Some("secret"));
        assert_eq!(config.backend.timeout(), Duration::from_secs(5));
        assert_eq!(config.backend.chat_url(), "https://dash.example.com/ai/chat");
        assert_eq!(config.assistant.default_language, "ta-IN");
        assert!(config.assistant.muted);
        assert_eq!(config.assistant.quick_prompts, vec!["Sales today?"]);
        assert_eq!(config.speech.rate, 1.2);
        assert_eq!(config.speech.pitch, 1.0);
        assert_eq!(
            config.speech.synthesis_command,
            Some(vec!["espeak-ng".into(), "-v".into(), "{locale}".into()])
        );
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let content = r#"
[backend]
timeout_secs = 3
"#;
        let file = create_temp_config(content);
        let config = WinnowConfig::load(file.path()).unwrap();
        assert_eq!(config.backend.timeout_secs, 3);
        assert_eq!(config.backend.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.assistant.default_language, "en-IN");
    }

    #[test]
    fn test_load_invalid_toml_is_config_error() {
        let file = create_temp_config("backend = [[[");
        let err = WinnowConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, WinnowError::Config(_)));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let file = create_temp_config("[backend]\ntimeout_secs = 0\n");
        let err = WinnowConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, WinnowError::Config(ref m) if m.contains("timeout_secs")));

        // Falls back to the default ceiling instead of timing out instantly.
        let config = WinnowConfig::load_or_default(file.path());
        assert_eq!(config.backend.timeout(), Duration::from_secs(20));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = WinnowConfig::load_or_default(Path::new("/nonexistent/assistant.toml"));
        assert_eq!(config.backend.chat_path, "/ai/chat");
    }

    #[test]
    fn test_save_creates_parent_dirs_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("assistant.toml");

        let mut config = WinnowConfig::default();
        config.backend.auth_token = Some("tok".into());
        config.save(&path).unwrap();

        assert!(path.exists());
        let reloaded = WinnowConfig::load(&path).unwrap();
        assert_eq!(reloaded.backend.auth_token.as_deref(), Some("tok"));
        assert_eq!(reloaded.assistant.greeting, config.assistant.greeting);
    }

    #[test]
    fn test_chat_url_joins_slashes() {
        let mut backend = BackendConfig::default();
        assert_eq!(backend.chat_url(), "http://127.0.0.1:5000/ai/chat");
        backend.base_url = "http://host:1/".into();
        backend.chat_path = "/ai/chat".into();
        assert_eq!(backend.chat_url(), "http://host:1/ai/chat");
    }
}
