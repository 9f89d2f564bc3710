//! Per-token language assignment
//!
//! Plain words follow the line's language. Protected words and phrases are
//! decided on their own, through diacritics, stopwords and the classifier,
//! in that order. Words in a prefix run are English regardless.

use crate::classifier::{Classification, Classifier};
use crate::config::Thresholds;
use crate::language::Language;
use crate::lexicon::Stopwords;
use crate::line::LineAnnotation;
use crate::output::ResolvedToken;
use crate::span::{Token, TokenKind};
use crate::text::has_spanish_marker;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct TokenResolver {
    classifier: Arc<Classifier>,
    stopwords: Arc<Stopwords>,
    spanish_suffixes: Vec<String>,
    thresholds: Thresholds,
}

impl TokenResolver {
    pub fn new(
        classifier: Arc<Classifier>,
        stopwords: Arc<Stopwords>,
        spanish_suffixes: Vec<String>,
    ) -> Self {
        let thresholds = classifier.thresholds().clone();
        Self {
            classifier,
            stopwords,
            spanish_suffixes,
            thresholds,
        }
    }

    /// Resolve a parsed line; pauses come out without durations
    pub fn resolve(&self, tokens: &[Token], line: &LineAnnotation, prefix_run: usize) -> Vec<ResolvedToken> {
        let mut resolved = Vec::with_capacity(tokens.len() + 1);

        for (index, token) in tokens.iter().enumerate() {
            if index < prefix_run {
                resolved.push(ResolvedToken::speech(&token.text, Language::English));
                continue;
            }

            match token.kind {
                TokenKind::Punctuation => resolved.push(ResolvedToken::pause(&token.text)),
                TokenKind::Word => resolved.push(ResolvedToken::speech(&token.text, line.language)),
                TokenKind::ProtectedWord => {
                    let language = self.resolve_protected_word(&token.text, line);
                    resolved.push(ResolvedToken::speech(&token.text, language));
                }
                TokenKind::ProtectedPhrase => {
                    let language = self.resolve_phrase(token, line);
                    resolved.extend(token.words().map(|word| ResolvedToken::speech(word, language)));
                }
            }
        }

        resolved
    }

    fn resolve_protected_word(&self, word: &str, line: &LineAnnotation) -> Language {
        if has_spanish_marker(word) {
            return Language::Spanish;
        }
        if let Some(language) = self.stopwords.language_of(word) {
            return language;
        }

        let bucket = self.classifier.bucket(line.confidence);
        let language = match self
            .classifier
            .classify_word(word, Some(line.language), true, bucket)
        {
            Classification::Accepted { language, .. } => language,
            Classification::Abstained => line.language,
        };

        if language == Language::English && self.has_spanish_suffix(word) {
            log::trace!("{word:?} has a Spanish suffix, overriding English");
            return Language::Spanish;
        }
        language
    }

    fn resolve_phrase(&self, phrase: &Token, line: &LineAnnotation) -> Language {
        if has_spanish_marker(&phrase.text) {
            return Language::Spanish;
        }

        if let Classification::Accepted {
            language,
            confidence,
        } = self.classifier.detect(&phrase.text)
        {
            if confidence >= self.thresholds.phrase_min_confidence {
                return language;
            }
        }

        Language::ALL
            .into_iter()
            .find(|language| phrase.words().any(|word| self.stopwords.contains(*language, word)))
            .unwrap_or(line.language)
    }

    fn has_spanish_suffix(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        self.spanish_suffixes
            .iter()
            .any(|suffix| word.ends_with(suffix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{LanguageModel, RawScore};
    use crate::config::Config;
    use std::collections::HashMap;

    struct TableModel(HashMap<&'static str, RawScore>);

    impl LanguageModel for TableModel {
        fn score(&self, text: &str) -> Option<RawScore> {
            self.0.get(text.to_lowercase().as_str()).copied()
        }
    }

    fn en(score: f64) -> RawScore {
        RawScore {
            language: Language::English,
            score,
        }
    }

    fn resolver() -> TokenResolver {
        let table = [
            ("laptop", en(4.0)),
            ("printer", en(4.0)),
            ("bank", en(1.2)),
            ("machine learning", en(2.0)),
            ("deep work", en(-4.0)),
        ];
        let config = Config::default();
        let classifier = Classifier::new(
            Arc::new(TableModel(table.into_iter().collect())),
            config.thresholds.clone(),
            64,
        );
        TokenResolver::new(
            Arc::new(classifier),
            Arc::new(Stopwords::new(["el", "la", "de"], ["the", "of"])),
            config.spanish_suffixes,
        )
    }

    fn spanish_line(confidence: f64) -> LineAnnotation {
        LineAnnotation {
            text: String::new(),
            language: Language::Spanish,
            confidence,
        }
    }

    fn resolve_one(kind: TokenKind, text: &str, line: &LineAnnotation) -> Vec<ResolvedToken> {
        resolver().resolve(&[Token::new(kind, text, 0)], line, 0)
    }

    fn languages(tokens: &[ResolvedToken]) -> Vec<Option<Language>> {
        tokens.iter().map(|t| t.language).collect()
    }

    #[test]
    fn test_words_follow_line_language() {
        let tokens = resolve_one(TokenKind::Word, "laptop", &spanish_line(0.9));
        assert_eq!(languages(&tokens), vec![Some(Language::Spanish)]);
    }

    #[test]
    fn test_punctuation_is_a_pause() {
        let tokens = resolve_one(TokenKind::Punctuation, ",", &spanish_line(0.9));
        assert_eq!(tokens, vec![ResolvedToken::pause(",")]);
    }

    #[test]
    fn test_protected_word_rules() {
        let line = spanish_line(0.9);
        let language = |word: &str| resolve_one(TokenKind::ProtectedWord, word, &line)[0].language;

        assert_eq!(language("Laptop"), Some(Language::English));
        assert_eq!(language("canción"), Some(Language::Spanish));
        assert_eq!(language("The"), Some(Language::English));
        assert_eq!(language("de"), Some(Language::Spanish));
        // weak English on a high-confidence line is accepted
        assert_eq!(language("bank"), Some(Language::English));
        // abstention falls back to the line
        assert_eq!(language("xyzzy"), Some(Language::Spanish));
    }

    #[test]
    fn test_protected_word_keeps_case() {
        let tokens = resolve_one(TokenKind::ProtectedWord, "Laptop", &spanish_line(0.9));
        assert_eq!(tokens[0].text, "Laptop");
    }

    #[test]
    fn test_spanish_suffix_overrides_english() {
        let line = LineAnnotation {
            language: Language::English,
            ..spanish_line(0.3)
        };
        let tokens = resolve_one(TokenKind::ProtectedWord, "printer", &line);
        assert_eq!(tokens[0].language, Some(Language::Spanish));
    }

    #[test]
    fn test_phrase_resolves_once() {
        let tokens = resolve_one(TokenKind::ProtectedPhrase, "machine learning", &spanish_line(0.9));
        assert_eq!(tokens.len(), 2);
        assert_eq!(languages(&tokens), vec![Some(Language::English); 2]);
        assert_eq!(tokens[1].text, "learning");
    }

    #[test]
    fn test_phrase_fallbacks() {
        let line = spanish_line(0.9);

        let tokens = resolve_one(TokenKind::ProtectedPhrase, "deep work", &line);
        assert_eq!(tokens[0].language, Some(Language::English));

        let tokens = resolve_one(TokenKind::ProtectedPhrase, "quantum leap", &line);
        assert_eq!(tokens[0].language, Some(Language::Spanish));

        let tokens = resolve_one(TokenKind::ProtectedPhrase, "state of art", &line);
        assert_eq!(tokens[0].language, Some(Language::English));

        let tokens = resolve_one(TokenKind::ProtectedPhrase, "pingüino feliz", &line);
        assert_eq!(tokens[0].language, Some(Language::Spanish));
    }

    #[test]
    fn test_prefix_run_forces_english() {
        let tokens = vec![
            Token::new(TokenKind::Word, "the", 0),
            Token::new(TokenKind::Word, "weekend", 1),
            Token::new(TokenKind::Word, "fue", 2),
        ];
        let resolved = resolver().resolve(&tokens, &spanish_line(0.5), 2);
        assert_eq!(
            languages(&resolved),
            vec![Some(Language::English), Some(Language::English), Some(Language::Spanish)]
        );
    }
}
