//! Deployment configuration loaded from TOML.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::RoundtableError;
use crate::orchestrator::DEFAULT_ROUNDS;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub completion: CompletionConfig,
    /// Number of discussion rounds per episode.
    pub rounds: u32,
    pub tts: TtsConfig,
}

/// Settings for the completion provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// OpenAI-compatible API base URL.
    pub api_base: String,
    /// Model identifier.
    pub model: String,
    /// Completion token cap per round.
    pub max_tokens: u32,
}

/// Settings for speech synthesis output.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TtsConfig {
    /// Directory synthesized audio files are written to.
    pub output_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            completion: CompletionConfig::default(),
            rounds: DEFAULT_ROUNDS,
            tts: TtsConfig::default(),
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            max_tokens: 1024,
        }
    }
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            output_dir: "tts_output".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RoundtableError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| RoundtableError::Config(format!("failed to read config: {e}")))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML content.
    pub fn from_toml_str(content: &str) -> Result<Self, RoundtableError> {
        toml::from_str(content)
            .map_err(|e| RoundtableError::Config(format!("failed to parse config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.rounds, 8);
        assert_eq!(config.tts.output_dir, "tts_output");
        assert!(config.completion.api_base.contains("groq"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            rounds = 3

            [completion]
            model = "llama-3.1-8b-instant"
            "#,
        )
        .unwrap();

        assert_eq!(config.rounds, 3);
        assert_eq!(config.completion.model, "llama-3.1-8b-instant");
        assert_eq!(config.completion.max_tokens, 1024);
        assert_eq!(config.tts.output_dir, "tts_output");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::from_toml_str("rounds = \"not a number\"").unwrap_err();
        assert!(matches!(err, RoundtableError::Config(_)));
    }
}
