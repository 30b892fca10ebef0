//! CLI argument definitions for the `winnow` assistant.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

use winnow_core::config::WinnowConfig;

/// Winnow: voice and text assistant for the food waste dashboard.
#[derive(Parser, Debug)]
#[command(name = "winnow", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Base URL of the dashboard backend.
    #[arg(short = 'u', long = "base-url")]
    pub base_url: Option<String>,

    /// Bearer token sent with chat requests.
    #[arg(short = 't', long = "token")]
    pub token: Option<String>,

    /// Initial language code, e.g. ta-IN.
    #[arg(short = 'L', long = "language")]
    pub language: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Start with spoken replies muted.
    #[arg(long = "mute")]
    pub mute: bool,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > WINNOW_CONFIG env var > ~/.winnow/assistant.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("WINNOW_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Priority: --base-url flag > WINNOW_API_BASE_URL env var > config file value.
    pub fn resolve_base_url(&self, config_value: &str) -> String {
        pick(
            self.base_url.as_deref(),
            std::env::var("WINNOW_API_BASE_URL").ok(),
            Some(config_value),
        )
        .unwrap_or_default()
    }

    /// Priority: --token flag > WINNOW_API_TOKEN env var > config file value.
    pub fn resolve_token(&self, config_value: Option<&str>) -> Option<String> {
        pick(
            self.token.as_deref(),
            std::env::var("WINNOW_API_TOKEN").ok(),
            config_value,
        )
    }

    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_value: &str) -> String {
        pick(self.log_level.as_deref(), None, Some(config_value)).unwrap_or_default()
    }

    /// Apply every override to a loaded configuration.
    pub fn apply(&self, config: &mut WinnowConfig) {
        config.backend.base_url = self.resolve_base_url(&config.backend.base_url);
        config.backend.auth_token = self.resolve_token(config.backend.auth_token.as_deref());
        config.general.log_level = self.resolve_log_level(&config.general.log_level);
        if let Some(ref language) = self.language {
            config.assistant.default_language = language.clone();
        }
        if self.mute {
            config.assistant.muted = true;
        }
    }
}

/// First non-blank value in priority order.
fn pick(cli: Option<&str>, env: Option<String>, config: Option<&str>) -> Option<String> {
    cli.map(str::to_string)
        .into_iter()
        .chain(env)
        .chain(config.map(str::to_string))
        .find(|v| !v.trim().is_empty())
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".winnow").join("assistant.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".winnow").join("assistant.toml");
    }
    PathBuf::from("assistant.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_priority() {
        assert_eq!(
            pick(Some("cli"), Some("env".into()), Some("cfg")).as_deref(),
            Some("cli")
        );
        assert_eq!(
            pick(None, Some("env".into()), Some("cfg")).as_deref(),
            Some("env")
        );
        assert_eq!(pick(None, None, Some("cfg")).as_deref(), Some("cfg"));
        assert_eq!(pick(None, None, None), None);
    }

    #[test]
    fn test_pick_skips_blank_values() {
        assert_eq!(
            pick(Some(" "), Some(String::new()), Some("cfg")).as_deref(),
            Some("cfg")
        );
        assert_eq!(pick(None, None, Some("")), None);
    }

    #[test]
    fn test_flags_override_config() {
        let args = CliArgs::parse_from([
            "winnow",
            "--base-url",
            "http://dashboard.local:8080",
            "--token",
            "secret",
            "--language",
            "bn-IN",
            "--log-level",
            "debug",
            "--mute",
        ]);
        let mut config = WinnowConfig::default();
        args.apply(&mut config);

        assert_eq!(config.backend.base_url, "http://dashboard.local:8080");
        assert_eq!(config.backend.auth_token.as_deref(), Some("secret"));
        assert_eq!(config.assistant.default_language, "bn-IN");
        assert_eq!(config.general.log_level, "debug");
        assert!(config.assistant.muted);
    }

    #[test]
    fn test_config_path_flag() {
        let args = CliArgs::parse_from(["winnow", "-c", "/tmp/winnow.toml"]);
        assert_eq!(args.resolve_config_path(), PathBuf::from("/tmp/winnow.toml"));
    }

    #[test]
    fn test_no_flags_keep_config_values() {
        let args = CliArgs::parse_from(["winnow"]);
        let mut config = WinnowConfig::default();
        config.assistant.default_language = "te-IN".into();
        config.general.log_level = "warn".into();
        args.apply(&mut config);

        assert_eq!(config.assistant.default_language, "te-IN");
        assert_eq!(config.general.log_level, "warn");
        assert!(!config.assistant.muted);
    }
}
