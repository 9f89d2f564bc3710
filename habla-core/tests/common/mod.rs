#![allow(dead_code)]

use habla_core::{Config, Language, LanguageModel, Pipeline, RawScore, Stopwords};
use std::collections::HashMap;
use std::sync::Arc;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Model answering from a fixed table keyed by lowercase text
#[derive(Debug, Default)]
pub struct TableModel {
    scores: HashMap<String, RawScore>,
    fallback: Option<RawScore>,
}

impl TableModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn english(self, text: &str, score: f64) -> Self {
        self.with(text, Language::English, score)
    }

    pub fn spanish(self, text: &str, score: f64) -> Self {
        self.with(text, Language::Spanish, score)
    }

    /// Answer for any text not in the table
    pub fn otherwise(mut self, language: Language, score: f64) -> Self {
        self.fallback = Some(RawScore { language, score });
        self
    }

    fn with(mut self, text: &str, language: Language, score: f64) -> Self {
        self.scores
            .insert(text.to_lowercase(), RawScore { language, score });
        self
    }
}

impl LanguageModel for TableModel {
    fn score(&self, text: &str) -> Option<RawScore> {
        self.scores
            .get(&text.to_lowercase())
            .copied()
            .or(self.fallback)
    }

    fn name(&self) -> &str {
        "table"
    }
}

pub fn pipeline_with(model: impl LanguageModel + 'static) -> Pipeline {
    init_logging();
    Pipeline::builder()
        .config(Config::default())
        .model(Arc::new(model))
        .stopwords(Arc::new(Stopwords::builtin().unwrap().clone()))
        .build()
        .unwrap()
}

/// `(text, language code, silence)` triples for compact assertions
pub fn summarize(line: &habla_core::Line) -> Vec<(String, Option<&'static str>, Option<u32>)> {
    line.tokens
        .iter()
        .map(|t| (t.text.clone(), t.language.map(|l| l.code()), t.silence_ms))
        .collect()
}
