//! Line-level language decision

use crate::classifier::{Classification, Classifier};
use crate::language::Language;
use crate::text::has_spanish_marker;
use serde::Serialize;
use std::sync::Arc;

/// Confidence threshold used by the `is_*` conveniences
pub const DEFAULT_LANGUAGE_THRESHOLD: f64 = 0.7;

/// A sentence line with its dominant language
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineAnnotation {
    pub text: String,
    pub language: Language,
    /// Normalized confidence in [0, 1]; 0.0 when the language is a fallback
    pub confidence: f64,
}

/// Decides a line's dominant language.
///
/// Spanish diacritics or inverted marks settle the line at full confidence.
/// Otherwise the classifier decides; if it cannot, the hint (or the default
/// language) is used with zero confidence.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    classifier: Arc<Classifier>,
    default_language: Language,
}

impl LineClassifier {
    pub fn new(classifier: Arc<Classifier>, default_language: Language) -> Self {
        Self {
            classifier,
            default_language,
        }
    }

    pub fn classify(&self, line: &str) -> (Language, f64) {
        self.classify_with_hint(line, None)
    }

    pub fn classify_with_hint(&self, line: &str, hint: Option<Language>) -> (Language, f64) {
        if has_spanish_marker(line) {
            return (Language::Spanish, 1.0);
        }

        match self.classifier.detect(line) {
            Classification::Accepted {
                language,
                confidence,
            } => (language, confidence),
            Classification::Abstained => (hint.unwrap_or(self.default_language), 0.0),
        }
    }

    pub fn annotate(&self, line: &str) -> LineAnnotation {
        let (language, confidence) = self.classify(line);
        LineAnnotation {
            text: line.to_string(),
            language,
            confidence,
        }
    }

    /// Whether `text` is Spanish with at least `threshold` confidence
    pub fn is_spanish(&self, text: &str, threshold: f64) -> bool {
        self.is_language(text, Language::Spanish, threshold)
    }

    /// Whether `text` is English with at least `threshold` confidence
    pub fn is_english(&self, text: &str, threshold: f64) -> bool {
        self.is_language(text, Language::English, threshold)
    }

    fn is_language(&self, text: &str, language: Language, threshold: f64) -> bool {
        let (detected, confidence) = self.classify(text);
        detected == language && confidence >= threshold
    }
}
