use std::{env, path::PathBuf};

use thiserror::Error;

use crate::context::{ContextSource, DEFAULT_CONTEXT};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4.1-nano";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 500;
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid number in {var}: {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("LLM_TEMPERATURE must be between 0.0 and 2.0, got {0}")]
    TemperatureOutOfRange(f32),
}

/// Completion settings passed to the LLM client.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_ms: u64,
}

/// Process configuration, built once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub llm: LlmSettings,
    pub context: ContextSource,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = parse_or(get("PORT"), "PORT", DEFAULT_PORT)?;

        let temperature = parse_or(get("LLM_TEMPERATURE"), "LLM_TEMPERATURE", DEFAULT_TEMPERATURE)?;
        if !temperature.is_finite() || !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::TemperatureOutOfRange(temperature));
        }

        let llm = LlmSettings {
            api_key: get("OPENAI_API_KEY").unwrap_or_default(),
            base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: get("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature,
            max_tokens: parse_or(get("LLM_MAX_TOKENS"), "LLM_MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
            timeout_ms: parse_or(get("LLM_TIMEOUT_MS"), "LLM_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)?,
        };

        let context = match get("KNOWLEDGE_FILE") {
            Some(path) => ContextSource::File(PathBuf::from(path)),
            None => ContextSource::Inline(DEFAULT_CONTEXT.to_string()),
        };

        Ok(Self { port, llm, context })
    }
}

fn parse_or<T: std::str::FromStr>(
    value: Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(value) => value
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let cfg = config_from(&[]).unwrap();

        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.llm.model, "gpt-4.1-nano");
        assert_eq!(cfg.llm.temperature, 0.7);
        assert_eq!(cfg.llm.max_tokens, 500);
        assert_eq!(cfg.llm.base_url, DEFAULT_BASE_URL);
        assert!(cfg.llm.api_key.is_empty());
        assert_eq!(cfg.context, ContextSource::Inline(DEFAULT_CONTEXT.to_string()));
    }

    #[test]
    fn knowledge_file_selects_file_source() {
        let cfg = config_from(&[("KNOWLEDGE_FILE", "data/due.txt")]).unwrap();
        assert_eq!(cfg.context, ContextSource::File(PathBuf::from("data/due.txt")));
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = config_from(&[
            ("PORT", "9001"),
            ("OPENAI_API_KEY", "sk-test"),
            ("LLM_TEMPERATURE", "1.0"),
            ("LLM_MAX_TOKENS", "256"),
            ("LLM_TIMEOUT_MS", "1500"),
        ])
        .unwrap();

        assert_eq!(cfg.port, 9001);
        assert_eq!(cfg.llm.api_key, "sk-test");
        assert_eq!(cfg.llm.temperature, 1.0);
        assert_eq!(cfg.llm.max_tokens, 256);
        assert_eq!(cfg.llm.timeout_ms, 1500);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = config_from(&[("PORT", "  "), ("KNOWLEDGE_FILE", "")]).unwrap();
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert!(matches!(cfg.context, ContextSource::Inline(_)));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                var: "PORT",
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn temperature_out_of_range_is_rejected() {
        let err = config_from(&[("LLM_TEMPERATURE", "3.5")]).unwrap_err();
        assert_eq!(err, ConfigError::TemperatureOutOfRange(3.5));
    }
}
