//! Deterministic stopword-count model

use super::{LanguageModel, RawScore};
use crate::language::Language;
use crate::lexicon::Stopwords;
use crate::text::has_spanish_marker;
use std::sync::Arc;

/// Raw score contributed by each net stopword hit
pub const SCORE_PER_HIT: f64 = 1.5;

/// Scores text by how many Spanish versus English stopwords it contains.
///
/// Words carrying a Spanish diacritic count as Spanish hits. A tie (including
/// no hits at all) yields no result.
#[derive(Debug, Clone)]
pub struct LexiconModel {
    stopwords: Arc<Stopwords>,
}

impl LexiconModel {
    pub fn new(stopwords: Arc<Stopwords>) -> Self {
        Self { stopwords }
    }
}

impl LanguageModel for LexiconModel {
    fn score(&self, text: &str) -> Option<RawScore> {
        let mut net: i64 = 0;
        for word in text
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|w| !w.is_empty())
        {
            if self.stopwords.contains(Language::Spanish, word) || has_spanish_marker(word) {
                net += 1;
            }
            if self.stopwords.contains(Language::English, word) {
                net -= 1;
            }
        }

        let language = match net {
            0 => return None,
            n if n > 0 => Language::Spanish,
            _ => Language::English,
        };

        Some(RawScore {
            language,
            score: SCORE_PER_HIT * net.unsigned_abs() as f64,
        })
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}
