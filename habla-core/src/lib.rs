//! Language and pause tagging for mixed Spanish/English text
//!
//! `habla-core` turns raw prose into sentence lines whose tokens each carry a
//! language (Spanish, English) or mark a pause, ready for a multi-voice speech
//! synthesizer. Quoted and parenthesized regions are resolved on their own,
//! leading runs of strong English words are forced to English, and
//! punctuation becomes silence of a configurable length.
//!
//! # Example
//!
//! ```rust
//! use habla_core::{lexicon_pipeline, Config, Language};
//!
//! let pipeline = lexicon_pipeline(Config::default()).unwrap();
//! let document = pipeline.process("Hola, ¿qué tal tu día?");
//!
//! let line = &document.lines[0];
//! assert_eq!(line.language, Language::Spanish);
//! assert_eq!(line.spoken_text(), "Hola qué tal tu día");
//! assert_eq!(line.tokens[1].silence_ms, Some(230));
//! assert_eq!(line.tokens.last().unwrap().silence_ms, Some(900));
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod language;
pub mod lexicon;
pub mod line;
pub mod output;
pub mod pipeline;
pub mod prefix;
pub mod resolver;
pub mod silence;
pub mod span;
pub mod text;

pub use classifier::{
    normalize_confidence, CacheStats, Classification, Classifier, ConfidenceBucket,
    LanguageModel, LexiconModel, RawScore,
};
#[cfg(feature = "lingua")]
pub use classifier::LinguaModel;
pub use config::{Config, ConfigBuilder, Thresholds};
pub use error::{Error, Result};
pub use language::Language;
pub use lexicon::Stopwords;
pub use line::{LineAnnotation, LineClassifier};
pub use output::{Document, Line, ResolvedToken, Utterance};
pub use pipeline::{lexicon_pipeline, Pipeline, PipelineBuilder};
pub use prefix::PrefixRunDetector;
pub use resolver::TokenResolver;
pub use silence::SilenceMapper;
pub use span::{SpanParser, Token, TokenKind};

pub use habla_segment::{SentenceSegmenter, WordTokenizer};
