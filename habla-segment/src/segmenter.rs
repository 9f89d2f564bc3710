//! Sentence boundary detection for mixed Spanish/English prose
//!
//! Boundaries are found by scanning for runs of terminator characters. A run
//! closes a sentence when it is followed by whitespace (or the end of the
//! text) and the next sentence does not start in lowercase. A lone period is
//! additionally checked against the abbreviation trie and single-letter
//! initials so that `Sr. García` or `J. R. R. Tolkien` stay on one line.

use crate::abbreviation::AbbreviationTrie;
use crate::config::{get_language_config, LanguageConfig};
use crate::error::Result;

/// Language codes merged by [`SentenceSegmenter::new`]
pub const DEFAULT_LANGUAGES: [&str; 2] = ["es", "en"];

/// Splits raw text into trimmed, non-empty sentence lines
#[derive(Debug, Clone)]
pub struct SentenceSegmenter {
    terminators: Vec<char>,
    openers: Vec<char>,
    closers: Vec<char>,
    abbreviations: AbbreviationTrie,
}

impl SentenceSegmenter {
    /// Create a segmenter with the union of the Spanish and English rules
    pub fn new() -> Result<Self> {
        Self::for_languages(&DEFAULT_LANGUAGES)
    }

    /// Create a segmenter merging the embedded rules of the given languages
    pub fn for_languages(codes: &[&str]) -> Result<Self> {
        let configs = codes
            .iter()
            .map(|code| get_language_config(code))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_configs(configs))
    }

    /// Build a segmenter from already-parsed language rules
    pub fn from_configs<'a, I>(configs: I) -> Self
    where
        I: IntoIterator<Item = &'a LanguageConfig>,
    {
        let configs: Vec<&LanguageConfig> = configs.into_iter().collect();
        let mut segmenter = Self {
            terminators: Vec::new(),
            openers: Vec::new(),
            closers: Vec::new(),
            abbreviations: AbbreviationTrie::from_categories(
                configs
                    .iter()
                    .flat_map(|config| &config.abbreviations.categories),
            ),
        };

        for config in &configs {
            extend_unique(&mut segmenter.terminators, &config.terminators.chars);
            extend_unique(&mut segmenter.openers, &config.terminators.inverted);
            for pair in &config.enclosures.pairs {
                extend_unique(&mut segmenter.openers, &[pair.open]);
                extend_unique(&mut segmenter.closers, &[pair.close]);
            }
        }

        segmenter
    }

    /// Abbreviations known to this segmenter
    pub fn abbreviations(&self) -> &AbbreviationTrie {
        &self.abbreviations
    }

    /// Split text into sentence lines.
    ///
    /// Newlines are replaced with spaces first so that hard-wrapped paragraphs
    /// do not break mid-sentence. Every returned line is trimmed and non-empty.
    pub fn split(&self, text: &str) -> Vec<String> {
        let normalized: String = text
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();

        let mut lines = Vec::new();
        let mut start = 0;
        for end in self.boundaries(&normalized) {
            push_line(&mut lines, &normalized[start..end]);
            start = end;
        }
        push_line(&mut lines, &normalized[start..]);

        log::trace!("segmented {} bytes into {} lines", text.len(), lines.len());
        lines
    }

    /// Byte offsets where sentences end, in ascending order
    pub fn boundaries(&self, text: &str) -> Vec<usize> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut boundaries = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            if !self.is_terminator(chars[i].1) {
                i += 1;
                continue;
            }

            let run_start = i;
            let mut j = i;
            while j < chars.len() && self.is_terminator(chars[j].1) {
                j += 1;
            }
            let run_end = j;
            while j < chars.len() && self.closers.contains(&chars[j].1) {
                j += 1;
            }

            if self.is_boundary(&chars, run_start, run_end, j) {
                boundaries.push(chars.get(j).map_or(text.len(), |(offset, _)| *offset));
            }
            i = j;
        }

        boundaries
    }

    fn is_terminator(&self, ch: char) -> bool {
        self.terminators.contains(&ch)
    }

    fn is_boundary(&self, chars: &[(usize, char)], run_start: usize, run_end: usize, after: usize) -> bool {
        match chars.get(after) {
            None => return true,
            Some((_, next)) if !next.is_whitespace() => return false,
            Some(_) => {}
        }

        let next_visible = chars[after..].iter().map(|(_, c)| *c).find(|c| !c.is_whitespace());
        match next_visible {
            None => return true,
            Some(c) if c.is_lowercase() => return false,
            Some(_) => {}
        }

        let single_period = run_end - run_start == 1 && chars[run_start].1 == '.';
        if !single_period {
            return true;
        }

        let word = self.word_before(chars, run_start);
        if word.is_empty() {
            return true;
        }

        let mut letters = word.chars();
        let is_initial = matches!((letters.next(), letters.next()), (Some(c), None) if c.is_alphabetic());
        !(is_initial || self.abbreviations.contains(&word))
    }

    fn word_before(&self, chars: &[(usize, char)], end: usize) -> String {
        let start = chars[..end]
            .iter()
            .rposition(|(_, c)| c.is_whitespace())
            .map_or(0, |p| p + 1);

        chars[start..end]
            .iter()
            .map(|(_, c)| *c)
            .skip_while(|c| self.openers.contains(c))
            .collect()
    }
}

fn extend_unique(target: &mut Vec<char>, chars: &[char]) {
    for &ch in chars {
        if !target.contains(&ch) {
            target.push(ch);
        }
    }
}

fn push_line(lines: &mut Vec<String>, slice: &str) {
    let line = slice.trim();
    if !line.is_empty() {
        lines.push(line.to_string());
    }
}
