//! Embedded per-language segmentation rules

mod loader;
mod types;

pub use loader::{get_language_config, list_available_languages, parse_language_config};
pub use types::{
    AbbreviationConfig, EnclosureConfig, EnclosurePair, LanguageConfig,
    MetadataConfig, TerminatorConfig,
};
