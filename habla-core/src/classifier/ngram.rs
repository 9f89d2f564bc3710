//! Statistical n-gram model backed by `lingua`

use super::{LanguageModel, RawScore};
use crate::language::Language;
use lingua::{LanguageDetector, LanguageDetectorBuilder};

/// Margin reported when the losing language has zero probability
pub const MAX_MARGIN: f64 = 10.0;

/// Spanish/English detector with preloaded models
pub struct LinguaModel {
    detector: LanguageDetector,
}

impl LinguaModel {
    /// Build the detector; loading the models takes a moment, so share the result
    pub fn new() -> Self {
        let detector = LanguageDetectorBuilder::from_languages(&[
            lingua::Language::Spanish,
            lingua::Language::English,
        ])
        .with_preloaded_language_models()
        .build();

        Self { detector }
    }
}

impl Default for LinguaModel {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LinguaModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinguaModel").finish_non_exhaustive()
    }
}

impl LanguageModel for LinguaModel {
    fn score(&self, text: &str) -> Option<RawScore> {
        let values = self.detector.compute_language_confidence_values(text);
        let (winner, probability) = values.first()?;
        if *probability <= 0.0 {
            return None;
        }

        let language = to_language(winner)?;
        let other = values
            .iter()
            .find(|(candidate, _)| candidate != winner)
            .map_or(0.0, |(_, p)| *p);

        Some(RawScore {
            language,
            score: log_odds(*probability, other),
        })
    }

    fn name(&self) -> &str {
        "lingua"
    }
}

#[allow(unreachable_patterns)]
fn to_language(language: &lingua::Language) -> Option<Language> {
    match language {
        lingua::Language::Spanish => Some(Language::Spanish),
        lingua::Language::English => Some(Language::English),
        _ => None,
    }
}

/// ln(p_winner / p_other), capped at [`MAX_MARGIN`]
pub fn log_odds(winner: f64, other: f64) -> f64 {
    if other <= 0.0 {
        MAX_MARGIN
    } else {
        (winner / other).ln().min(MAX_MARGIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_odds() {
        assert_eq!(log_odds(1.0, 0.0), MAX_MARGIN);
        assert!(log_odds(0.5, 0.5).abs() < 1e-12);
        assert!((log_odds(0.9, 0.1) - 9.0f64.ln()).abs() < 1e-12);
        assert_eq!(log_odds(1.0, 1e-9), MAX_MARGIN);
    }

    #[test]
    fn test_clear_sentences() {
        let model = LinguaModel::new();

        let english = model
            .score("The weather is lovely today and we are going for a walk")
            .unwrap();
        assert_eq!(english.language, Language::English);
        assert!(english.score > 0.0);

        let spanish = model
            .score("Mañana vamos a comer con nuestros amigos en la playa")
            .unwrap();
        assert_eq!(spanish.language, Language::Spanish);
    }
}
