//! Pipeline configuration
//!
//! Every cutoff the resolvers use is a named value here, loadable from TOML.
//! Missing keys fall back to [`defaults`].

use crate::error::{Error, Result};
use crate::language::Language;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

/// Default configuration constants
pub mod defaults {
    /// Lines below this confidence are treated as ambiguous
    pub const AMBIGUOUS_LINE_CONFIDENCE: f64 = 0.6;

    /// Maximum number of leading tokens examined for a prefix run
    pub const PREFIX_MAX_SCAN: usize = 4;

    /// Minimum length of a prefix run for it to be kept
    pub const PREFIX_MIN_RUN: usize = 3;

    /// Confidence each prefix token needs to extend the run
    pub const PREFIX_MIN_CONFIDENCE: f64 = 0.95;

    /// Confidence at which a word-level result is accepted as-is
    pub const WORD_ACCEPT_CONFIDENCE: f64 = 0.95;

    /// English acceptance for protected words on high-confidence lines
    pub const PROTECTED_ENGLISH_HIGH_CONFIDENCE: f64 = 0.90;

    /// Synthetic confidence given to forced protected decisions
    pub const PROTECTED_FORCED_CONFIDENCE: f64 = 0.99;

    /// Confidence a protected phrase needs from the classifier
    pub const PHRASE_MIN_CONFIDENCE: f64 = 0.40;

    /// Lower bound of the `high` line-confidence bucket
    pub const BUCKET_HIGH: f64 = 0.9;

    /// Lower bound of the `medium` line-confidence bucket
    pub const BUCKET_MEDIUM: f64 = 0.6;

    /// Memo cache capacity, per cache
    pub const CACHE_CAPACITY: usize = 4096;

    /// Number of lines from which resolution runs in parallel
    pub const PARALLEL_THRESHOLD: usize = 64;

    /// Word endings that mark a protected word as Spanish
    pub const SPANISH_SUFFIXES: [&str; 18] = [
        "ción", "ciones", "es", "as", "os", "ante", "mente", "idad", "able", "ible", "ista", "aje",
        "anza", "ico", "ica", "ar", "ir", "er",
    ];

    /// Pause length in milliseconds per punctuation character
    pub const SILENCE_MS: [(&str, u32); 7] = [
        (".", 900),
        (",", 230),
        (";", 400),
        (":", 400),
        ("(", 400),
        (")", 400),
        ("\n", 800),
    ];
}

/// Confidence cutoffs and run lengths used during resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub ambiguous_line_confidence: f64,
    pub prefix_max_scan: usize,
    pub prefix_min_run: usize,
    pub prefix_min_confidence: f64,
    pub word_accept_confidence: f64,
    pub protected_english_high_confidence: f64,
    pub protected_forced_confidence: f64,
    pub phrase_min_confidence: f64,
    pub bucket_high: f64,
    pub bucket_medium: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            ambiguous_line_confidence: defaults::AMBIGUOUS_LINE_CONFIDENCE,
            prefix_max_scan: defaults::PREFIX_MAX_SCAN,
            prefix_min_run: defaults::PREFIX_MIN_RUN,
            prefix_min_confidence: defaults::PREFIX_MIN_CONFIDENCE,
            word_accept_confidence: defaults::WORD_ACCEPT_CONFIDENCE,
            protected_english_high_confidence: defaults::PROTECTED_ENGLISH_HIGH_CONFIDENCE,
            protected_forced_confidence: defaults::PROTECTED_FORCED_CONFIDENCE,
            phrase_min_confidence: defaults::PHRASE_MIN_CONFIDENCE,
            bucket_high: defaults::BUCKET_HIGH,
            bucket_medium: defaults::BUCKET_MEDIUM,
        }
    }
}

impl Thresholds {
    fn confidences(&self) -> [(&'static str, f64); 8] {
        [
            ("ambiguous_line_confidence", self.ambiguous_line_confidence),
            ("prefix_min_confidence", self.prefix_min_confidence),
            ("word_accept_confidence", self.word_accept_confidence),
            (
                "protected_english_high_confidence",
                self.protected_english_high_confidence,
            ),
            ("protected_forced_confidence", self.protected_forced_confidence),
            ("phrase_min_confidence", self.phrase_min_confidence),
            ("bucket_high", self.bucket_high),
            ("bucket_medium", self.bucket_medium),
        ]
    }
}

/// Processing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Language used when a line cannot be classified
    pub default_language: Language,
    pub thresholds: Thresholds,
    /// Endings that flip an English protected word to Spanish
    pub spanish_suffixes: Vec<String>,
    /// Pause length per punctuation character, in milliseconds.
    ///
    /// A `[silence]` table in TOML overrides individual entries; characters it
    /// leaves out keep their default durations.
    #[serde(deserialize_with = "merge_silence")]
    pub silence: BTreeMap<String, u32>,
    /// Word-character pattern a spoken token must match
    pub word_pattern: String,
    pub cache_capacity: usize,
    pub parallel_threshold: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_language: Language::default(),
            thresholds: Thresholds::default(),
            spanish_suffixes: defaults::SPANISH_SUFFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            silence: default_silence(),
            word_pattern: crate::text::DEFAULT_WORD_PATTERN.to_string(),
            cache_capacity: defaults::CACHE_CAPACITY,
            parallel_threshold: defaults::PARALLEL_THRESHOLD,
        }
    }
}

fn default_silence() -> BTreeMap<String, u32> {
    defaults::SILENCE_MS
        .iter()
        .map(|(mark, ms)| (mark.to_string(), *ms))
        .collect()
}

fn merge_silence<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let overrides = BTreeMap::<String, u32>::deserialize(deserializer)?;
    let mut silence = default_silence();
    silence.extend(overrides);
    Ok(silence)
}

impl Config {
    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Parse and validate a TOML configuration
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        log::debug!("loading configuration from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.thresholds.confidences() {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Configuration(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        let thresholds = &self.thresholds;
        if thresholds.prefix_min_run == 0 {
            return Err(Error::Configuration(
                "prefix_min_run must be greater than 0".into(),
            ));
        }
        if thresholds.prefix_min_run > thresholds.prefix_max_scan {
            return Err(Error::Configuration(format!(
                "prefix_min_run ({}) cannot exceed prefix_max_scan ({})",
                thresholds.prefix_min_run, thresholds.prefix_max_scan
            )));
        }
        if thresholds.bucket_medium > thresholds.bucket_high {
            return Err(Error::Configuration(
                "bucket_medium cannot exceed bucket_high".into(),
            ));
        }

        if self.cache_capacity == 0 {
            return Err(Error::Configuration(
                "cache_capacity must be greater than 0".into(),
            ));
        }

        if let Some(mark) = self.silence.keys().find(|mark| mark.chars().count() != 1) {
            return Err(Error::Configuration(format!(
                "silence keys must be single characters, got {mark:?}"
            )));
        }

        if self.spanish_suffixes.iter().any(|suffix| suffix.is_empty()) {
            return Err(Error::Configuration(
                "spanish_suffixes cannot contain empty entries".into(),
            ));
        }

        Ok(())
    }
}

/// Fluent builder for configuration
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    default_language: Option<String>,
    thresholds: Option<Thresholds>,
    spanish_suffixes: Option<Vec<String>>,
    silence: Vec<(char, u32)>,
    word_pattern: Option<String>,
    cache_capacity: Option<usize>,
    parallel_threshold: Option<usize>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback language by code
    pub fn default_language(mut self, code: impl Into<String>) -> Self {
        self.default_language = Some(code.into());
        self
    }

    /// Replace all thresholds
    pub fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    /// Replace the Spanish suffix list
    pub fn spanish_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spanish_suffixes = Some(suffixes.into_iter().map(Into::into).collect());
        self
    }

    /// Set the pause length for one punctuation character
    pub fn silence(mut self, mark: char, millis: u32) -> Self {
        self.silence.push((mark, millis));
        self
    }

    /// Set the word-character pattern
    pub fn word_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.word_pattern = Some(pattern.into());
        self
    }

    /// Set the memo cache capacity
    pub fn cache_capacity(mut self, entries: usize) -> Self {
        self.cache_capacity = Some(entries);
        self
    }

    /// Set the line count from which lines resolve in parallel
    pub fn parallel_threshold(mut self, lines: usize) -> Self {
        self.parallel_threshold = Some(lines);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        if let Some(code) = self.default_language {
            config.default_language = Language::from_str(&code)?;
        }
        if let Some(thresholds) = self.thresholds {
            config.thresholds = thresholds;
        }
        if let Some(suffixes) = self.spanish_suffixes {
            config.spanish_suffixes = suffixes;
        }
        for (mark, millis) in self.silence {
            config.silence.insert(mark.to_string(), millis);
        }
        if let Some(pattern) = self.word_pattern {
            config.word_pattern = pattern;
        }
        if let Some(capacity) = self.cache_capacity {
            config.cache_capacity = capacity;
        }
        if let Some(threshold) = self.parallel_threshold {
            config.parallel_threshold = threshold;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_language, Language::Spanish);
        assert_eq!(config.silence.get("."), Some(&900));
        assert_eq!(config.silence.get("\n"), Some(&800));
        assert_eq!(config.spanish_suffixes.len(), 18);
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::builder()
            .default_language("en")
            .silence('!', 700)
            .cache_capacity(16)
            .parallel_threshold(2)
            .build()
            .unwrap();

        assert_eq!(config.default_language, Language::English);
        assert_eq!(config.silence.get("!"), Some(&700));
        assert_eq!(config.cache_capacity, 16);
        assert_eq!(config.parallel_threshold, 2);
    }

    #[test]
    fn test_builder_rejects_unknown_language() {
        let result = Config::builder().default_language("fr").build();
        assert!(matches!(result, Err(Error::InvalidLanguage(_))));
    }

    #[test]
    fn test_validation_errors() {
        let mut config = Config::default();
        config.thresholds.word_accept_confidence = 1.5;
        assert!(matches!(config.validate(), Err(Error::Configuration(_))));

        let mut config = Config::default();
        config.thresholds.prefix_min_run = 5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.thresholds.bucket_medium = 0.95;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.cache_capacity = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.silence.insert("...".into(), 900);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            default_language = "en"
            cache_capacity = 128

            [thresholds]
            prefix_min_run = 2

            [silence]
            "," = 300
            "#,
        )
        .unwrap();

        assert_eq!(config.default_language, Language::English);
        assert_eq!(config.cache_capacity, 128);
        assert_eq!(config.thresholds.prefix_min_run, 2);
        assert_eq!(config.thresholds.prefix_max_scan, defaults::PREFIX_MAX_SCAN);
        assert_eq!(config.silence.get(","), Some(&300));
        assert_eq!(config.silence.get("."), Some(&900));
        assert_eq!(config.silence.len(), defaults::SILENCE_MS.len());
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            Config::from_toml_str("cache_capacity = \"lots\""),
            Err(Error::Toml(_))
        ));
    }
}
