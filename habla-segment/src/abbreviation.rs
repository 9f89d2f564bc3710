//! Abbreviation trie used to suppress false sentence boundaries
//!
//! Abbreviations are stored without their final period and matched
//! case-insensitively against whole words, so `Sra.` and `SRA.` both hit the
//! `sra` entry.

use std::collections::HashMap;

/// Trie node for abbreviation lookup
#[derive(Debug, Clone, Default)]
struct TrieNode {
    /// Child nodes indexed by character
    children: HashMap<char, TrieNode>,
    /// Whether this node represents the end of an abbreviation
    is_end: bool,
    /// Category of the abbreviation (if this is an end node)
    category: Option<String>,
}

/// Trie of known abbreviations, shared by every language loaded into a segmenter
#[derive(Debug, Clone, Default)]
pub struct AbbreviationTrie {
    root: TrieNode,
    len: usize,
}

impl AbbreviationTrie {
    /// Create an empty trie
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from configuration categories
    pub fn from_categories<'a, I>(categories: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a Vec<String>)>,
    {
        let mut trie = Self::new();
        for (category, abbreviations) in categories {
            for abbr in abbreviations {
                trie.insert(abbr, Some(category.clone()));
            }
        }
        trie
    }

    /// Number of distinct abbreviations stored
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the trie contains no abbreviations
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert an abbreviation; a trailing period is ignored
    pub fn insert(&mut self, abbreviation: &str, category: Option<String>) {
        let abbreviation = abbreviation.trim_end_matches('.');
        if abbreviation.is_empty() {
            return;
        }

        let mut current = &mut self.root;
        for ch in abbreviation.chars().flat_map(char::to_lowercase) {
            current = current.children.entry(ch).or_default();
        }

        if !current.is_end {
            self.len += 1;
        }
        current.is_end = true;
        current.category = category;
    }

    /// Look up a whole word, returning its category when it is an abbreviation
    pub fn lookup(&self, word: &str) -> Option<Option<&str>> {
        let mut current = &self.root;
        for ch in word.chars().flat_map(char::to_lowercase) {
            current = current.children.get(&ch)?;
        }

        current.is_end.then(|| current.category.as_deref())
    }

    /// Check whether `word` (without its final period) is an abbreviation
    pub fn contains(&self, word: &str) -> bool {
        self.lookup(word).is_some()
    }
}
