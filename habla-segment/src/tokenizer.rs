//! Word tokenization for a single sentence line
//!
//! Tokens are whitespace-delimited chunks with sentence punctuation peeled
//! off. Quotes and parentheses stay attached to their words (`"open`,
//! `source"`) so that span detection downstream can see which token opens or
//! closes a quoted region. Inverted marks are emitted ahead of the chunk they
//! lead, even when they sit inside its opening delimiters (`"¿Qué`).

/// Inverted marks that open Spanish questions and exclamations
const INVERTED_MARKS: [char; 2] = ['¿', '¡'];

/// Trailing punctuation that always becomes its own token
const TRAILING_MARKS: [char; 6] = [',', ';', ':', '!', '?', '…'];

/// Opening delimiters that may precede an inverted mark (`(¿por`)
const OPENING_DELIMITERS: [char; 8] = ['"', '\'', '(', '[', '{', '«', '“', '‘'];

/// Closing delimiters that may follow trailing punctuation (`día?"`)
const CLOSING_DELIMITERS: [char; 8] = ['"', '\'', ')', ']', '}', '»', '”', '’'];

/// Splits one sentence line into raw tokens
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    /// Create a new tokenizer
    pub fn new() -> Self {
        Self
    }

    /// Tokenize a line.
    ///
    /// A trailing period is only split off the final chunk of the line (or
    /// when it belongs to an ellipsis), so abbreviations in the middle of a
    /// sentence keep their period.
    pub fn tokenize(&self, line: &str) -> Vec<String> {
        let chunks: Vec<&str> = line.split_whitespace().collect();
        let mut tokens = Vec::with_capacity(chunks.len() + 2);

        for (index, chunk) in chunks.iter().enumerate() {
            let is_last = index + 1 == chunks.len();
            tokenize_chunk(chunk, is_last, &mut tokens);
        }

        tokens
    }
}

fn tokenize_chunk(chunk: &str, is_last: bool, tokens: &mut Vec<String>) {
    let lead_len = chunk.len()
        - chunk
            .trim_start_matches(|c: char| {
                INVERTED_MARKS.contains(&c) || OPENING_DELIMITERS.contains(&c)
            })
            .len();
    let (lead, body) = chunk.split_at(lead_len);

    let mut word = String::with_capacity(chunk.len());
    for ch in lead.chars() {
        if INVERTED_MARKS.contains(&ch) {
            tokens.push(ch.to_string());
        } else {
            word.push(ch);
        }
    }

    // Closers and punctuation may interleave at the end (`pasa?".`).
    let stem_len = body
        .trim_end_matches(|c: char| {
            TRAILING_MARKS.contains(&c) || CLOSING_DELIMITERS.contains(&c) || c == '.'
        })
        .len();
    let (stem, tail) = body.split_at(stem_len);
    word.push_str(stem);

    let keep_periods = !is_last && !tail.contains("..");
    let mut trailing = String::new();
    for ch in tail.chars() {
        if CLOSING_DELIMITERS.contains(&ch) || (ch == '.' && keep_periods && trailing.is_empty()) {
            word.push(ch);
        } else {
            trailing.push(ch);
        }
    }

    if !word.is_empty() {
        tokens.push(word);
    }
    push_runs(&trailing, tokens);
}

/// Push each run of one repeated character as its own token (`?.` -> `?`, `.`)
fn push_runs(trailing: &str, tokens: &mut Vec<String>) {
    let mut rest = trailing;
    while let Some(first) = rest.chars().next() {
        let run_len = rest.len() - rest.trim_start_matches(first).len();
        tokens.push(rest[..run_len].to_string());
        rest = &rest[run_len..];
    }
}
