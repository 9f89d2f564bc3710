use super::types::LanguageConfig;
use crate::error::SegmentError;
use std::collections::HashMap;
use std::sync::OnceLock;

static LANGUAGE_CONFIGS: OnceLock<Result<HashMap<String, LanguageConfig>, String>> =
    OnceLock::new();

macro_rules! embed_language_config {
    ($code:expr, $path:expr) => {
        ($code, include_str!($path))
    };
}

fn load_embedded_configs() -> Result<HashMap<String, LanguageConfig>, SegmentError> {
    let mut configs = HashMap::new();

    let embedded_configs = [
        embed_language_config!("es", "../../configs/languages/spanish.toml"),
        embed_language_config!("en", "../../configs/languages/english.toml"),
    ];

    for (code, toml_content) in embedded_configs {
        let config = parse_language_config(code, toml_content)?;
        configs.insert(code.to_string(), config);
    }

    Ok(configs)
}

/// Parse a language rule file and check that its code matches `code`
pub fn parse_language_config(code: &str, toml_content: &str) -> Result<LanguageConfig, SegmentError> {
    let config: LanguageConfig = toml::from_str(toml_content).map_err(|e| {
        SegmentError::ConfigurationError(format!("Failed to parse {code} config: {e}"))
    })?;

    if config.metadata.code != code {
        return Err(SegmentError::ConfigurationError(format!(
            "Config code mismatch: expected {}, got {}",
            code, config.metadata.code
        )));
    }

    Ok(config)
}

fn embedded_configs() -> Result<&'static HashMap<String, LanguageConfig>, SegmentError> {
    LANGUAGE_CONFIGS
        .get_or_init(|| load_embedded_configs().map_err(|e| e.to_string()))
        .as_ref()
        .map_err(|e| SegmentError::ConfigurationError(e.clone()))
}

pub fn get_language_config(code: &str) -> Result<&'static LanguageConfig, SegmentError> {
    embedded_configs()?
        .get(code)
        .ok_or_else(|| SegmentError::UnsupportedLanguage(code.to_string()))
}

pub fn list_available_languages() -> Vec<&'static str> {
    embedded_configs()
        .map(|configs| configs.keys().map(|s| s.as_str()).collect())
        .unwrap_or_default()
}
