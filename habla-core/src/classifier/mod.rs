//! Restricted two-language classification with confidence normalization
//!
//! A [`LanguageModel`] produces a raw log-odds margin for one of the two
//! languages. [`Classifier`] turns that into a normalized confidence through a
//! fixed staircase, applies the word-level acceptance rules, and memoizes
//! every decision.

mod cache;
mod lexicon;
#[cfg(feature = "lingua")]
mod ngram;

pub use cache::{CacheStats, MemoCache};
pub use lexicon::LexiconModel;
#[cfg(feature = "lingua")]
pub use ngram::LinguaModel;

use crate::config::Thresholds;
use crate::language::Language;
use crate::text::has_spanish_marker;
use std::fmt;
use std::sync::Arc;

/// Raw model output: winning language and its log-odds margin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawScore {
    pub language: Language,
    pub score: f64,
}

/// A statistical language identifier restricted to Spanish and English
pub trait LanguageModel: Send + Sync {
    /// Score `text`; `None` when the model has no answer
    fn score(&self, text: &str) -> Option<RawScore>;

    /// Short name used in log output
    fn name(&self) -> &str {
        "custom"
    }
}

/// Outcome of a classification
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classification {
    Accepted { language: Language, confidence: f64 },
    Abstained,
}

impl Classification {
    pub fn language(&self) -> Option<Language> {
        match self {
            Classification::Accepted { language, .. } => Some(*language),
            Classification::Abstained => None,
        }
    }

    /// Normalized confidence, 0.0 when abstained
    pub fn confidence(&self) -> f64 {
        match self {
            Classification::Accepted { confidence, .. } => *confidence,
            Classification::Abstained => 0.0,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Classification::Accepted { .. })
    }
}

/// Line-confidence bucket used to relax protected-word acceptance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfidenceBucket {
    High,
    Medium,
    Low,
}

impl ConfidenceBucket {
    pub fn from_confidence(confidence: f64, thresholds: &Thresholds) -> Self {
        if confidence >= thresholds.bucket_high {
            ConfidenceBucket::High
        } else if confidence >= thresholds.bucket_medium {
            ConfidenceBucket::Medium
        } else {
            ConfidenceBucket::Low
        }
    }
}

/// Map a raw log-odds margin onto a confidence in [0.5, 0.99]
pub fn normalize_confidence(raw: f64) -> f64 {
    if raw >= 3.0 {
        0.99
    } else if raw >= 1.0 {
        0.90
    } else if raw > 0.0 {
        0.80
    } else if raw > -1.5 {
        0.70
    } else if raw > -3.0 {
        0.60
    } else {
        0.50
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct WordKey {
    word: String,
    hint: Option<Language>,
    protected: bool,
    bucket: ConfidenceBucket,
}

/// Memoizing classifier shared by every stage of the pipeline
pub struct Classifier {
    model: Arc<dyn LanguageModel>,
    thresholds: Thresholds,
    detections: MemoCache<String, Classification>,
    words: MemoCache<WordKey, Classification>,
}

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classifier")
            .field("model", &self.model.name())
            .field("thresholds", &self.thresholds)
            .field("detections", &self.detections.stats())
            .field("words", &self.words.stats())
            .finish()
    }
}

impl Classifier {
    pub fn new(model: Arc<dyn LanguageModel>, thresholds: Thresholds, cache_capacity: usize) -> Self {
        Self {
            model,
            thresholds,
            detections: MemoCache::new(cache_capacity),
            words: MemoCache::new(cache_capacity),
        }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn bucket(&self, line_confidence: f64) -> ConfidenceBucket {
        ConfidenceBucket::from_confidence(line_confidence, &self.thresholds)
    }

    /// Classify free text with normalized confidence
    pub fn detect(&self, text: &str) -> Classification {
        let text = text.trim();
        if text.is_empty() {
            return Classification::Abstained;
        }

        self.detections.get_or_insert_with(text.to_string(), || {
            let result = match self.model.score(text) {
                Some(raw) => Classification::Accepted {
                    language: raw.language,
                    confidence: normalize_confidence(raw.score),
                },
                None => Classification::Abstained,
            };
            log::trace!("{} classified {text:?} as {result:?}", self.model.name());
            result
        })
    }

    /// Decide the language of a single word.
    ///
    /// Protected words never abstain once the model has an answer: weak
    /// results are forced to `hint` (or Spanish). Unprotected words abstain
    /// below the acceptance threshold.
    pub fn classify_word(
        &self,
        word: &str,
        hint: Option<Language>,
        protected: bool,
        bucket: ConfidenceBucket,
    ) -> Classification {
        let word = word.trim().to_lowercase();
        if !word.chars().any(char::is_alphanumeric) {
            return Classification::Abstained;
        }

        let key = WordKey {
            word,
            hint,
            protected,
            bucket,
        };
        let word = key.word.clone();
        self.words
            .get_or_insert_with(key, || self.decide_word(&word, hint, protected, bucket))
    }

    fn decide_word(
        &self,
        word: &str,
        hint: Option<Language>,
        protected: bool,
        bucket: ConfidenceBucket,
    ) -> Classification {
        if has_spanish_marker(word) {
            return Classification::Accepted {
                language: Language::Spanish,
                confidence: 1.0,
            };
        }

        let (language, confidence) = match self.detect(word) {
            Classification::Accepted {
                language,
                confidence,
            } => (language, confidence),
            Classification::Abstained => return Classification::Abstained,
        };

        let thresholds = &self.thresholds;
        if confidence >= thresholds.word_accept_confidence {
            return Classification::Accepted {
                language,
                confidence,
            };
        }

        if !protected {
            return Classification::Abstained;
        }

        if language == Language::English
            && bucket == ConfidenceBucket::High
            && confidence >= thresholds.protected_english_high_confidence
        {
            return Classification::Accepted {
                language,
                confidence,
            };
        }

        Classification::Accepted {
            language: hint.unwrap_or(Language::Spanish),
            confidence: thresholds.protected_forced_confidence,
        }
    }

    pub fn detection_stats(&self) -> CacheStats {
        self.detections.stats()
    }

    pub fn word_stats(&self) -> CacheStats {
        self.words.stats()
    }

    pub fn clear_cache(&self) {
        self.detections.clear();
        self.words.clear();
    }
}
