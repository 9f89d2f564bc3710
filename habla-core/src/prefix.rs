//! Leading run of strong English words on an otherwise non-English line

use crate::classifier::{Classification, Classifier};
use crate::config::Thresholds;
use crate::language::Language;
use crate::line::LineAnnotation;
use crate::span::{Token, TokenKind};

/// Finds how many leading tokens must be forced to English
#[derive(Debug, Clone)]
pub struct PrefixRunDetector {
    thresholds: Thresholds,
}

impl PrefixRunDetector {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Length of the accepted prefix run, 0 if none.
    ///
    /// Only English or ambiguous lines are scanned. The scan stops at the
    /// first non-word token, the first word that is not strongly English, or
    /// after `prefix_max_scan` tokens. Runs shorter than `prefix_min_run`
    /// are discarded.
    pub fn detect(&self, tokens: &[Token], line: &LineAnnotation, classifier: &Classifier) -> usize {
        let thresholds = &self.thresholds;
        if line.language != Language::English && line.confidence >= thresholds.ambiguous_line_confidence {
            return 0;
        }

        let run = tokens
            .iter()
            .take(thresholds.prefix_max_scan)
            .take_while(|token| token.kind == TokenKind::Word)
            .take_while(|token| {
                matches!(
                    classifier.detect(&token.text),
                    Classification::Accepted { language: Language::English, confidence }
                        if confidence >= thresholds.prefix_min_confidence
                )
            })
            .count();

        if run >= thresholds.prefix_min_run {
            log::debug!("prefix run of {run} English tokens in {:?}", line.text);
            run
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{LanguageModel, RawScore};
    use std::sync::Arc;

    /// Strongly English for the listed words, nothing otherwise
    struct Strong(&'static [&'static str]);

    impl LanguageModel for Strong {
        fn score(&self, text: &str) -> Option<RawScore> {
            self.0.iter().any(|word| *word == text).then_some(RawScore {
                language: Language::English,
                score: 5.0,
            })
        }
    }

    fn words(texts: &[&str]) -> Vec<Token> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Token::new(TokenKind::Word, *t, i))
            .collect()
    }

    fn line(language: Language, confidence: f64) -> LineAnnotation {
        LineAnnotation {
            text: String::new(),
            language,
            confidence,
        }
    }

    fn run(tokens: &[Token], annotation: &LineAnnotation) -> usize {
        let classifier = Classifier::new(
            Arc::new(Strong(&["the", "weekend", "was", "great"])),
            Thresholds::default(),
            32,
        );
        PrefixRunDetector::new(Thresholds::default()).detect(tokens, annotation, &classifier)
    }

    #[test]
    fn test_three_strong_words_form_a_run() {
        let tokens = words(&["the", "weekend", "was", "fue", "genial"]);
        assert_eq!(run(&tokens, &line(Language::Spanish, 0.5)), 3);
    }

    #[test]
    fn test_run_is_capped() {
        let tokens = words(&["the", "weekend", "was", "great", "the"]);
        assert_eq!(run(&tokens, &line(Language::English, 0.99)), 4);
    }

    #[test]
    fn test_short_runs_are_discarded() {
        let tokens = words(&["the", "weekend", "fue", "genial"]);
        assert_eq!(run(&tokens, &line(Language::Spanish, 0.5)), 0);
    }

    #[test]
    fn test_confident_spanish_line_is_not_scanned() {
        let tokens = words(&["the", "weekend", "was", "great"]);
        assert_eq!(run(&tokens, &line(Language::Spanish, 0.6)), 0);
    }

    #[test]
    fn test_non_word_stops_scan() {
        let mut tokens = words(&["the", "weekend", "was", "great"]);
        tokens.insert(2, Token::new(TokenKind::Punctuation, ",", 2));
        assert_eq!(run(&tokens, &line(Language::English, 0.9)), 0);
    }
}
