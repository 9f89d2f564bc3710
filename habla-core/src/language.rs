//! The two languages the pipeline can assign

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target language of a speech token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    /// Spanish, the default for lines the classifier cannot decide
    #[default]
    #[serde(rename = "es")]
    Spanish,
    /// English
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// Both supported languages, Spanish first
    pub const ALL: [Language; 2] = [Language::Spanish, Language::English];

    /// Create a Language from a language code or name
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "es" | "spa" | "spanish" | "español" => Some(Language::Spanish),
            "en" | "eng" | "english" => Some(Language::English),
            _ => None,
        }
    }

    /// Get the language code
    pub fn code(&self) -> &'static str {
        match self {
            Language::Spanish => "es",
            Language::English => "en",
        }
    }

    /// Get the full language name
    pub fn name(&self) -> &'static str {
        match self {
            Language::Spanish => "Spanish",
            Language::English => "English",
        }
    }

    /// The other supported language
    pub fn other(&self) -> Self {
        match self {
            Language::Spanish => Language::English,
            Language::English => Language::Spanish,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| Error::InvalidLanguage(s.to_string()))
    }
}
