//! Pause durations for punctuation tokens

use crate::output::ResolvedToken;
use std::collections::{BTreeMap, HashMap};

/// Text of the pause appended to lines that do not end in a period
pub const TERMINAL_PAUSE: &str = ".";

/// Maps punctuation to pause lengths and merges adjacent pauses
#[derive(Debug, Clone)]
pub struct SilenceMapper {
    table: HashMap<char, u32>,
}

impl SilenceMapper {
    /// Build from a `mark -> milliseconds` table; keys longer than one char are ignored
    pub fn new(table: &BTreeMap<String, u32>) -> Self {
        let table = table
            .iter()
            .filter_map(|(mark, ms)| {
                let mut chars = mark.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Some((ch, *ms)),
                    _ => None,
                }
            })
            .collect();
        Self { table }
    }

    /// Longest pause among the token's characters
    pub fn duration(&self, text: &str) -> Option<u32> {
        text.chars().filter_map(|ch| self.table.get(&ch).copied()).max()
    }

    /// Terminate the line with a period pause, then assign durations.
    ///
    /// A pause with a duration that directly follows another such pause is
    /// merged into it: the texts are concatenated and the longer duration
    /// kept. Speech or a silent marker in between keeps them separate.
    pub fn apply(&self, mut tokens: Vec<ResolvedToken>) -> Vec<ResolvedToken> {
        let terminated = tokens
            .last()
            .is_some_and(|last| last.is_pause() && last.text.contains(TERMINAL_PAUSE));
        if !terminated {
            tokens.push(ResolvedToken::pause(TERMINAL_PAUSE));
        }

        let mut mapped: Vec<ResolvedToken> = Vec::with_capacity(tokens.len());
        for mut token in tokens {
            if !token.is_pause() {
                mapped.push(token);
                continue;
            }

            token.silence_ms = self.duration(&token.text);
            let Some(ms) = token.silence_ms else {
                mapped.push(token);
                continue;
            };

            match mapped.last_mut() {
                Some(previous) if previous.is_pause() && previous.silence_ms.is_some() => {
                    previous.text.push_str(&token.text);
                    previous.silence_ms = previous.silence_ms.max(Some(ms));
                }
                _ => mapped.push(token),
            }
        }

        mapped
    }
}
