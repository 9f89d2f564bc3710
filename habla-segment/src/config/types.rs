use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    pub metadata: MetadataConfig,
    pub terminators: TerminatorConfig,
    pub enclosures: EnclosureConfig,
    #[serde(default)]
    pub abbreviations: AbbreviationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminatorConfig {
    pub chars: Vec<char>,
    /// Marks that open a sentence (Spanish `¿` and `¡`)
    #[serde(default)]
    pub inverted: Vec<char>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnclosureConfig {
    pub pairs: Vec<EnclosurePair>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnclosurePair {
    pub open: char,
    pub close: char,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AbbreviationConfig {
    #[serde(flatten)]
    pub categories: HashMap<String, Vec<String>>,
}
