//! Output model handed to the speech synthesizer

use crate::language::Language;
use serde::{Deserialize, Serialize};

/// One output record: a spoken word or a pause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedToken {
    pub text: String,
    /// `None` marks a pause rather than speech
    pub language: Option<Language>,
    /// Pause length in milliseconds; `None` for speech and silent markers
    pub silence_ms: Option<u32>,
}

impl ResolvedToken {
    pub fn speech(text: impl Into<String>, language: Language) -> Self {
        Self {
            text: text.into(),
            language: Some(language),
            silence_ms: None,
        }
    }

    pub fn pause(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: None,
            silence_ms: None,
        }
    }

    pub fn is_pause(&self) -> bool {
        self.language.is_none()
    }
}

/// A unit of synthesis work
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Utterance {
    Speech { language: Language, text: String },
    Silence(u32),
}

/// A resolved sentence line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub text: String,
    pub language: Language,
    pub confidence: f64,
    /// Number of leading tokens forced to English
    pub prefix_run: usize,
    pub tokens: Vec<ResolvedToken>,
}

impl Line {
    /// Spoken words in order, joined by single spaces
    pub fn spoken_text(&self) -> String {
        self.tokens
            .iter()
            .filter(|token| !token.is_pause())
            .map(|token| token.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Group the line into speech batches and silences.
    ///
    /// Consecutive words of the same language form one batch. Pauses with a
    /// duration become silences; pauses without one only end the batch.
    pub fn utterances(&self) -> Vec<Utterance> {
        let mut utterances = Vec::new();
        let mut batch_open = false;

        for token in &self.tokens {
            match (token.language, token.silence_ms) {
                (Some(language), _) => {
                    if let (true, Some(Utterance::Speech { language: current, text })) =
                        (batch_open, utterances.last_mut())
                    {
                        if *current == language {
                            text.push(' ');
                            text.push_str(&token.text);
                            continue;
                        }
                    }
                    utterances.push(Utterance::Speech {
                        language,
                        text: token.text.clone(),
                    });
                    batch_open = true;
                }
                (None, Some(ms)) => {
                    utterances.push(Utterance::Silence(ms));
                    batch_open = false;
                }
                (None, None) => batch_open = false,
            }
        }

        utterances
    }

    pub fn ends_with_pause(&self) -> bool {
        self.tokens.last().is_some_and(ResolvedToken::is_pause)
    }
}

/// The resolved form of a whole input text
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub lines: Vec<Line>,
}

impl Document {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }

    /// Every line's utterances, in order
    pub fn utterances(&self) -> Vec<Utterance> {
        self.lines.iter().flat_map(Line::utterances).collect()
    }

    /// Serialize as `[[{"text", "language", "silence_ms"}, ...], ...]`
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        let lines: Vec<&Vec<ResolvedToken>> = self.lines.iter().map(|line| &line.tokens).collect();
        serde_json::to_string(&lines)
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn silence(text: &str, ms: Option<u32>) -> ResolvedToken {
        ResolvedToken {
            silence_ms: ms,
            ..ResolvedToken::pause(text)
        }
    }

    fn sample() -> Line {
        Line {
            text: "Me gusta el \"open source\" software.".into(),
            language: Language::Spanish,
            confidence: 0.9,
            prefix_run: 0,
            tokens: vec![
                ResolvedToken::speech("Me", Language::Spanish),
                ResolvedToken::speech("gusta", Language::Spanish),
                ResolvedToken::speech("el", Language::Spanish),
                silence("\"", None),
                ResolvedToken::speech("open", Language::English),
                ResolvedToken::speech("source", Language::English),
                silence("\"", None),
                ResolvedToken::speech("software", Language::Spanish),
                silence(".", Some(900)),
            ],
        }
    }

    #[test]
    fn test_spoken_text() {
        assert_eq!(sample().spoken_text(), "Me gusta el open source software");
        assert!(sample().ends_with_pause());
    }

    #[test]
    fn test_utterances() {
        assert_eq!(
            sample().utterances(),
            vec![
                Utterance::Speech {
                    language: Language::Spanish,
                    text: "Me gusta el".into()
                },
                Utterance::Speech {
                    language: Language::English,
                    text: "open source".into()
                },
                Utterance::Speech {
                    language: Language::Spanish,
                    text: "software".into()
                },
                Utterance::Silence(900),
            ]
        );
    }

    #[test]
    fn test_silent_marker_splits_same_language_batch() {
        let line = Line {
            tokens: vec![
                ResolvedToken::speech("uno", Language::Spanish),
                silence("\"", None),
                ResolvedToken::speech("dos", Language::Spanish),
            ],
            ..sample()
        };
        assert_eq!(line.utterances().len(), 2);
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_shape() {
        let document = Document {
            lines: vec![Line {
                tokens: vec![
                    ResolvedToken::speech("hola", Language::Spanish),
                    silence(".", Some(900)),
                ],
                ..sample()
            }],
        };
        assert_eq!(
            document.to_json().unwrap(),
            r#"[[{"text":"hola","language":"es","silence_ms":null},{"text":".","language":null,"silence_ms":900}]]"#
        );
    }
}
