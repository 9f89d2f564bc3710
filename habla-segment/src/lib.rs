//! Sentence segmentation and word tokenization for bilingual text
//!
//! This crate is the first stage of the habla pipeline. It turns a block of
//! raw Spanish/English prose into sentence lines and each line into raw word
//! tokens, leaving language decisions to `habla-core`.
//!
//! Segmentation rules (terminators, enclosure pairs, abbreviations) are
//! embedded TOML files, one per language, parsed once per process.
//!
//! # Example
//!
//! ```rust
//! use habla_segment::{SentenceSegmenter, WordTokenizer};
//!
//! let segmenter = SentenceSegmenter::new().unwrap();
//! let lines = segmenter.split("Hola, Sr. Pérez. How are you?");
//! assert_eq!(lines, vec!["Hola, Sr. Pérez.", "How are you?"]);
//!
//! let tokens = WordTokenizer::new().tokenize(&lines[1]);
//! assert_eq!(tokens, vec!["How", "are", "you", "?"]);
//! ```

pub mod abbreviation;
pub mod config;
pub mod error;
pub mod segmenter;
pub mod tokenizer;

pub use abbreviation::AbbreviationTrie;
pub use error::{Result, SegmentError};
pub use segmenter::SentenceSegmenter;
pub use tokenizer::WordTokenizer;
