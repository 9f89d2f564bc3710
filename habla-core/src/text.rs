//! Character classes shared by the span parser and the resolvers

use crate::error::{Error, Result};
use regex::Regex;

/// Characters that mark a line or word as Spanish outright
pub const SPANISH_MARKERS: &str = "ñáéíóúüÁÉÍÓÚÜ¿¡";

/// Default pattern a token must match to be spoken
pub const DEFAULT_WORD_PATTERN: &str = r"^[A-Za-z0-9ÁÉÍÓÚÜÑáéíóúüñ_+#'\-]+$";

/// Characters that make up punctuation-only tokens
pub const PUNCTUATION: &str = ".,;:()[]{}'\"“”‘’«»";

/// Quote and bracket characters stripped from word edges
pub const DELIMITERS: &str = "\"'()[]{}“”‘’«»";

/// Inverted marks that may lead a word inside a span (`"¿Qué`)
pub const INVERTED_MARKS: &str = "¿¡";

/// Punctuation that may trail a word and becomes its own pause token
pub const TRAILING_PUNCTUATION: &str = ".,;:";

/// Opening delimiters of protected spans and their closers
pub const SPAN_PAIRS: [(char, char); 6] = [
    ('(', ')'),
    ('"', '"'),
    ('\'', '\''),
    ('“', '”'),
    ('‘', '’'),
    ('«', '»'),
];

/// True if the text contains a Spanish diacritic or inverted mark
pub fn has_spanish_marker(text: &str) -> bool {
    text.chars().any(|c| SPANISH_MARKERS.contains(c))
}

/// True if every character is punctuation (and there is at least one)
pub fn is_punctuation_only(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| PUNCTUATION.contains(c))
}

/// Closing delimiter for a span opener
pub fn closer_for(open: char) -> Option<char> {
    SPAN_PAIRS
        .iter()
        .find(|(o, _)| *o == open)
        .map(|(_, close)| *close)
}

/// Strip quotes and brackets from both ends, and inverted marks from the front
pub fn strip_delimiters(text: &str) -> &str {
    text.trim_start_matches(|c: char| DELIMITERS.contains(c) || INVERTED_MARKS.contains(c))
        .trim_end_matches(|c: char| DELIMITERS.contains(c))
}

/// Split trailing `.,;:` off a token, returning `(body, trailing)`
pub fn split_trailing_punctuation(text: &str) -> (&str, &str) {
    let end = text
        .trim_end_matches(|c: char| TRAILING_PUNCTUATION.contains(c))
        .len();
    text.split_at(end)
}

/// Compiled word-character pattern
#[derive(Debug, Clone)]
pub struct WordPattern {
    regex: Regex,
}

impl WordPattern {
    /// Compile a word pattern
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| Error::Configuration(format!("invalid word pattern: {e}")))?;
        Ok(Self { regex })
    }

    /// Whether the whole text is a speakable word
    pub fn is_match(&self, text: &str) -> bool {
        !text.is_empty() && self.regex.is_match(text)
    }

    /// The pattern source
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}
