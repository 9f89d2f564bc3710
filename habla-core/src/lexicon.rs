//! Spanish and English stopword sets
//!
//! The built-in sets are embedded TOML lists parsed once per process. A
//! [`Stopwords`] value is read-only after construction and shared freely
//! across threads.

use crate::error::{Error, Result};
use crate::language::Language;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::OnceLock;

static BUILTIN: OnceLock<std::result::Result<Stopwords, String>> = OnceLock::new();

const SPANISH_TOML: &str = include_str!("../configs/stopwords/spanish.toml");
const ENGLISH_TOML: &str = include_str!("../configs/stopwords/english.toml");

#[derive(Debug, Deserialize)]
struct StopwordFile {
    metadata: Metadata,
    lexicon: Lexicon,
}

#[derive(Debug, Deserialize)]
struct Metadata {
    code: String,
}

#[derive(Debug, Deserialize)]
struct Lexicon {
    words: Vec<String>,
}

/// Stopword sets for both supported languages
#[derive(Debug, Clone, Default)]
pub struct Stopwords {
    spanish: HashSet<String>,
    english: HashSet<String>,
}

impl Stopwords {
    /// Build from explicit word lists; words are lowercased
    pub fn new<S, E>(spanish: S, english: E) -> Self
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Self {
            spanish: spanish.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
            english: english.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }

    /// The embedded stopword lists
    pub fn builtin() -> Result<&'static Stopwords> {
        BUILTIN
            .get_or_init(|| Self::from_toml(SPANISH_TOML, ENGLISH_TOML).map_err(|e| e.to_string()))
            .as_ref()
            .map_err(|e| Error::Configuration(e.clone()))
    }

    /// Parse Spanish and English stopword files
    pub fn from_toml(spanish: &str, english: &str) -> Result<Self> {
        let spanish = parse_list(Language::Spanish, spanish)?;
        let english = parse_list(Language::English, english)?;
        Ok(Self::new(spanish, english))
    }

    /// Whether `word` is a stopword of `language`
    pub fn contains(&self, language: Language, word: &str) -> bool {
        let word = word.to_lowercase();
        match language {
            Language::Spanish => self.spanish.contains(&word),
            Language::English => self.english.contains(&word),
        }
    }

    /// Language whose stopword list holds `word`, Spanish checked first
    pub fn language_of(&self, word: &str) -> Option<Language> {
        Language::ALL
            .into_iter()
            .find(|language| self.contains(*language, word))
    }

    /// Number of stopwords for a language
    pub fn len(&self, language: Language) -> usize {
        match language {
            Language::Spanish => self.spanish.len(),
            Language::English => self.english.len(),
        }
    }

    /// Whether both sets are empty
    pub fn is_empty(&self) -> bool {
        self.spanish.is_empty() && self.english.is_empty()
    }
}

fn parse_list(language: Language, content: &str) -> Result<Vec<String>> {
    let file: StopwordFile = toml::from_str(content)?;
    if file.metadata.code != language.code() {
        return Err(Error::Configuration(format!(
            "stopword list code mismatch: expected {}, got {}",
            language.code(),
            file.metadata.code
        )));
    }
    Ok(file.lexicon.words)
}
