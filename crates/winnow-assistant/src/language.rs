//! Supported assistant languages.

use serde::Serialize;

use crate::error::AssistantError;

/// A supported locale and the name sent to the chat backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub display_name: &'static str,
}

pub const DEFAULT_LANGUAGE: &str = "en-IN";

const LANGUAGES: [Language; 7] = [
    Language {
        code: "en-IN",
        display_name: "English",
    },
    Language {
        code: "ta-IN",
        display_name: "தமிழ் (Tamil)",
    },
    Language {
        code: "hi-IN",
        display_name: "हिन्दी (Hindi)",
    },
    Language {
        code: "bn-IN",
        display_name: "বাংলা (Bengali)",
    },
    Language {
        code: "mr-IN",
        display_name: "मराठी (Marathi)",
    },
    Language {
        code: "te-IN",
        display_name: "తెలుగు (Telugu)",
    },
    Language {
        code: "ml-IN",
        display_name: "മലയാളം (Malayalam)",
    },
];

/// Static lookup over the supported languages.
pub struct LanguageRegistry;

impl LanguageRegistry {
    /// All supported languages in menu order.
    pub fn list() -> &'static [Language] {
        &LANGUAGES
    }

    pub fn get(code: &str) -> Option<&'static Language> {
        LANGUAGES.iter().find(|l| l.code == code)
    }

    /// Display name for `code`.
    pub fn resolve(code: &str) -> Result<&'static str, AssistantError> {
        Self::get(code)
            .map(|l| l.display_name)
            .ok_or_else(|| AssistantError::UnknownLanguage(code.to_string()))
    }
}
