//! Protected-span detection over a line's raw tokens
//!
//! Quoted or parenthesized regions are resolved independently of the line
//! they sit in. The parser keeps a stack of open frames; a frame is emitted
//! when the bottom frame's closer is found, and abandoned (its tokens handled
//! one by one) when the line ends first. Nothing the tokenizer produced is
//! lost except tokens that are not speakable words or punctuation.

use crate::text::{
    closer_for, is_punctuation_only, split_trailing_punctuation, strip_delimiters, WordPattern,
    DELIMITERS, INVERTED_MARKS,
};
use serde::Serialize;
use smallvec::SmallVec;

/// Kind of a parsed token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Word,
    Punctuation,
    /// Single word inside quotes or parentheses
    ProtectedWord,
    /// Two or more words inside quotes or parentheses, space-joined
    ProtectedPhrase,
}

/// A token with its kind, cleaned text and raw position within the line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Index of the raw token this entry starts at
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }

    /// Inner words of a phrase; a single item for every other kind
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.text.split_whitespace()
    }
}

#[derive(Debug)]
struct Frame {
    open: char,
    close: char,
    start: usize,
    inner: Vec<String>,
}

/// Groups raw tokens into words, punctuation and protected spans
#[derive(Debug, Clone)]
pub struct SpanParser {
    words: WordPattern,
}

impl SpanParser {
    pub fn new(words: WordPattern) -> Self {
        Self { words }
    }

    pub fn word_pattern(&self) -> &WordPattern {
        &self.words
    }

    /// Parse one line's raw tokens
    pub fn parse<S: AsRef<str>>(&self, raw: &[S]) -> Vec<Token> {
        let mut out = Vec::with_capacity(raw.len());
        let mut stack: SmallVec<[Frame; 2]> = SmallVec::new();
        let mut i = 0;

        loop {
            if i >= raw.len() {
                let Some(bottom) = stack.first().map(|frame| frame.start) else {
                    break;
                };
                log::trace!("unterminated span at token {bottom}, degrading to literal tokens");
                stack.clear();
                self.push_plain(raw[bottom].as_ref(), bottom, &mut out);
                i = bottom + 1;
                continue;
            }

            let token = raw[i].as_ref();
            let (core, trailing) = if is_punctuation_only(token) {
                (token, "")
            } else {
                split_trailing_punctuation(token)
            };

            if stack.is_empty() {
                if let Some(word) = self.wrapped_word(core) {
                    out.push(Token::new(TokenKind::ProtectedWord, word, i));
                    push_trailing(trailing, i, &mut out);
                } else if let Some(frame) = open_frame(core, i) {
                    stack.push(frame);
                } else {
                    self.push_plain(token, i, &mut out);
                }
            } else if !self.close_frames(core, trailing, i, raw, &mut stack, &mut out) {
                match open_frame(core, i) {
                    Some(frame) => stack.push(frame),
                    None => {
                        if let Some(top) = stack.last_mut() {
                            top.inner.push(token.to_string());
                        }
                    }
                }
            }

            i += 1;
        }

        out
    }

    /// Pop every frame whose closer trails `core`, innermost first.
    ///
    /// A frame closed while another is still open flattens its tokens into
    /// the outer frame. Returns whether any frame was closed.
    fn close_frames<S: AsRef<str>>(
        &self,
        core: &str,
        trailing: &str,
        position: usize,
        raw: &[S],
        stack: &mut SmallVec<[Frame; 2]>,
        out: &mut Vec<Token>,
    ) -> bool {
        let body_end = core
            .trim_end_matches(|c: char| DELIMITERS.contains(c))
            .len();
        let mut piece = Some(core.to_string());
        let mut closed = false;

        for ch in core[body_end..].chars() {
            let Some(top) = stack.last_mut() else {
                break;
            };
            if top.close != ch {
                continue;
            }
            if let Some(piece) = piece.take() {
                top.inner.push(piece);
            }
            closed = true;

            let Some(frame) = stack.pop() else {
                break;
            };
            match stack.last_mut() {
                Some(outer) => outer.inner.extend(frame.inner),
                None => {
                    self.emit(frame, position, trailing, raw, out);
                    break;
                }
            }
        }

        closed
    }

    /// Inner word of a token wholly wrapped in one delimiter pair
    fn wrapped_word<'a>(&self, core: &'a str) -> Option<&'a str> {
        let open = core.chars().next()?;
        let close = closer_for(open)?;
        if core.chars().count() <= 2 || !core.ends_with(close) {
            return None;
        }

        let inner = &core[open.len_utf8()..core.len() - close.len_utf8()];
        let inner = inner.trim_start_matches(|c: char| INVERTED_MARKS.contains(c));
        self.words.is_match(inner).then_some(inner)
    }

    fn emit<S: AsRef<str>>(
        &self,
        frame: Frame,
        closer: usize,
        trailing: &str,
        raw: &[S],
        out: &mut Vec<Token>,
    ) {
        let valid: Vec<&str> = frame
            .inner
            .iter()
            .map(|piece| clean_piece(piece))
            .filter(|piece| self.words.is_match(piece))
            .collect();

        let kind = match valid.len() {
            0 => {
                log::trace!("span {}..={closer} has no words, keeping literal tokens", frame.start);
                for (offset, token) in raw[frame.start..=closer].iter().enumerate() {
                    self.push_plain(token.as_ref(), frame.start + offset, out);
                }
                return;
            }
            1 => TokenKind::ProtectedWord,
            _ => TokenKind::ProtectedPhrase,
        };

        log::trace!("span {}..={closer} -> {kind:?} {valid:?}", frame.start);
        out.push(Token::new(TokenKind::Punctuation, frame.open, frame.start));
        out.push(Token::new(kind, valid.join(" "), frame.start));
        out.push(Token::new(TokenKind::Punctuation, frame.close, closer));
        push_trailing(trailing, closer, out);
    }

    /// Handle a token outside any span
    fn push_plain(&self, token: &str, position: usize, out: &mut Vec<Token>) {
        if is_punctuation_only(token) {
            out.push(Token::new(TokenKind::Punctuation, token, position));
            return;
        }

        let (body, trailing) = split_trailing_punctuation(strip_delimiters(token));
        let word = strip_delimiters(body);
        if self.words.is_match(word) {
            out.push(Token::new(TokenKind::Word, word, position));
            push_trailing(trailing, position, out);
        } else {
            log::trace!("dropping unspeakable token {token:?}");
        }
    }
}

fn open_frame(core: &str, position: usize) -> Option<Frame> {
    let open = core.chars().next()?;
    let close = closer_for(open)?;
    let rest = &core[open.len_utf8()..];
    if !rest.is_empty() && core.ends_with(close) {
        return None;
    }

    Some(Frame {
        open,
        close,
        start: position,
        inner: if rest.is_empty() {
            Vec::new()
        } else {
            vec![rest.to_string()]
        },
    })
}

fn clean_piece(piece: &str) -> &str {
    let (body, _) = split_trailing_punctuation(strip_delimiters(piece));
    strip_delimiters(body)
}

fn push_trailing(trailing: &str, position: usize, out: &mut Vec<Token>) {
    if !trailing.is_empty() {
        out.push(Token::new(TokenKind::Punctuation, trailing, position));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::DEFAULT_WORD_PATTERN;

    fn parse(raw: &[&str]) -> Vec<(TokenKind, String)> {
        SpanParser::new(WordPattern::new(DEFAULT_WORD_PATTERN).unwrap())
            .parse(raw)
            .into_iter()
            .map(|token| (token.kind, token.text))
            .collect()
    }

    fn word(text: &str) -> (TokenKind, String) {
        (TokenKind::Word, text.to_string())
    }

    fn punct(text: &str) -> (TokenKind, String) {
        (TokenKind::Punctuation, text.to_string())
    }

    #[test]
    fn test_plain_words_and_punctuation() {
        assert_eq!(
            parse(&["Hola", ",", "¿", "qué", "tal", "?"]),
            vec![word("Hola"), punct(","), word("qué"), word("tal")]
        );
    }

    #[test]
    fn test_inverted_marks_inside_spans_keep_words() {
        assert_eq!(
            parse(&["Ella", "dijo", "\"¿Qué", "pasa\"", "?", "ayer"]),
            vec![
                word("Ella"),
                word("dijo"),
                punct("\""),
                (TokenKind::ProtectedPhrase, "Qué pasa".into()),
                punct("\""),
                word("ayer"),
            ]
        );
        assert_eq!(
            parse(&["Respondió", "\"¡sí\"", "enseguida"]),
            vec![
                word("Respondió"),
                (TokenKind::ProtectedWord, "sí".into()),
                word("enseguida"),
            ]
        );
        assert_eq!(parse(&["¿Qué", "tal"]), vec![word("Qué"), word("tal")]);
    }

    #[test]
    fn test_wrapped_single_token() {
        assert_eq!(
            parse(&["el", "\"software\"", "libre"]),
            vec![
                word("el"),
                (TokenKind::ProtectedWord, "software".into()),
                word("libre"),
            ]
        );
    }

    #[test]
    fn test_quoted_phrase() {
        assert_eq!(
            parse(&["el", "\"open", "source\"", "software", "."]),
            vec![
                word("el"),
                punct("\""),
                (TokenKind::ProtectedPhrase, "open source".into()),
                punct("\""),
                word("software"),
                punct("."),
            ]
        );
    }

    #[test]
    fn test_single_word_span_keeps_delimiters() {
        assert_eq!(
            parse(&["(", "laptop", ")"]),
            vec![
                punct("("),
                (TokenKind::ProtectedWord, "laptop".into()),
                punct(")"),
            ]
        );
    }

    #[test]
    fn test_trailing_punctuation_after_closer() {
        assert_eq!(
            parse(&["(big", "data).", "y"]),
            vec![
                punct("("),
                (TokenKind::ProtectedPhrase, "big data".into()),
                punct(")"),
                punct("."),
                word("y"),
            ]
        );
    }

    #[test]
    fn test_unterminated_span_degrades() {
        assert_eq!(
            parse(&["\"word", "and", "more"]),
            vec![word("word"), word("and"), word("more")]
        );
    }

    #[test]
    fn test_span_without_words_degrades() {
        assert_eq!(
            parse(&["(", "¿", ")", "fin"]),
            vec![punct("("), punct(")"), word("fin")]
        );
    }

    #[test]
    fn test_nested_spans_flatten_into_outer() {
        assert_eq!(
            parse(&["(dijo", "\"hello", "world\")"]),
            vec![
                punct("("),
                (TokenKind::ProtectedPhrase, "dijo hello world".into()),
                punct(")"),
            ]
        );
    }

    #[test]
    fn test_unterminated_outer_keeps_inner_span() {
        assert_eq!(
            parse(&["(nota", "\"open", "source\""]),
            vec![
                word("nota"),
                punct("\""),
                (TokenKind::ProtectedPhrase, "open source".into()),
                punct("\""),
            ]
        );
    }

    #[test]
    fn test_word_with_attached_punctuation_is_split() {
        assert_eq!(
            parse(&["Sr.", "hola;"]),
            vec![word("Sr"), punct("."), word("hola"), punct(";")]
        );
    }

    #[test]
    fn test_positions() {
        let parser = SpanParser::new(WordPattern::new(DEFAULT_WORD_PATTERN).unwrap());
        let tokens = parser.parse(&["uno", "\"dos", "tres\"", "cuatro"]);
        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 1, 1, 2, 3]);
        assert_eq!(tokens[2].words().collect::<Vec<_>>(), vec!["dos", "tres"]);
    }
}
