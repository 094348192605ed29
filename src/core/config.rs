//! Configuration management for Stagekit
//!
//! Supports environment variables, `.env` files, config files, and
//! runtime overrides.
//!
//! Config file location: ~/.config/stagekit/config.toml

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::core::error::{Result, StagekitError};

/// Main configuration for Stagekit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Model API client configuration
    pub openai: OpenAiConfig,
    /// Browser session configuration
    pub stagehand: StagehandConfig,
    /// Agent configuration
    pub agent: AgentConfig,
    /// Streaming configuration
    #[serde(default)]
    pub streaming: StreamingConfig,
}

/// OpenAI-compatible API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API key (usually from OPENAI_API_KEY)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL of the chat-completions API
    pub base_url: String,
    /// Chat model driving the agent
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Browser session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagehandConfig {
    /// Session name for isolation between concurrent runs
    pub session_name: String,
    /// Whether to run with a visible browser window
    pub headed: bool,
    /// Whether the session caches grounded actions
    pub enable_caching: bool,
    /// Verbosity level passed through to the session
    pub verbose: u8,
    /// Model used by the session for action grounding
    pub model: String,
}

/// Agent behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Maximum conversation history length
    pub max_history: usize,
    /// Maximum tool-calling loop turns before stopping
    pub max_turns: usize,
    /// Whether to show debug output
    pub debug: bool,
    /// System prompt override
    pub system_prompt: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_history: 100,
            max_turns: 10,
            debug: env::var("STAGEKIT_DEBUG")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            system_prompt: None,
        }
    }
}

/// Streaming configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamingConfig {
    /// Whether to stream responses in real-time
    pub enabled: bool,
    /// Print tokens as they arrive (vs buffering)
    pub print_tokens: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai: OpenAiConfig::default(),
            stagehand: StagehandConfig::default(),
            agent: AgentConfig::default(),
            streaming: StreamingConfig::default(),
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: env::var("OPENAI_API_KEY").ok(),
            base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            model: env::var("STAGEKIT_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            temperature: 0.0,
            timeout_secs: 120,
        }
    }
}

impl Default for StagehandConfig {
    fn default() -> Self {
        Self {
            session_name: env::var("STAGEKIT_SESSION").unwrap_or_else(|_| "stagekit".to_string()),
            headed: env::var("STAGEKIT_HEADED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            enable_caching: true,
            verbose: 1,
            model: env::var("STAGEHAND_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
        }
    }
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            enabled: env::var("STAGEKIT_STREAMING")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
            print_tokens: true,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("stagekit")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    ///
    /// `.env` values are overlaid on the process environment but never
    /// override variables that are already set.
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();

        if let Ok(config) = Self::load_from_file() {
            return config;
        }

        // Fall back to defaults (which respect env vars)
        Self::default()
    }

    /// Load configuration from file only
    pub fn load_from_file() -> Result<Self> {
        let config_path = Self::config_file();

        if !config_path.exists() {
            return Err(StagekitError::config("Config file not found"));
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| StagekitError::config(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| StagekitError::config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir();
        let config_path = Self::config_file();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .map_err(|e| StagekitError::config(format!("Failed to create config dir: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| StagekitError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, content)
            .map_err(|e| StagekitError::config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Check if a config file exists
    pub fn config_exists() -> bool {
        Self::config_file().exists()
    }

    /// Resolve the API key, erroring if none is configured
    pub fn require_api_key(&self) -> Result<&str> {
        self.openai
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| StagekitError::MissingApiKey("OPENAI_API_KEY".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.openai.temperature, 0.0);
        assert_eq!(config.agent.max_turns, 10);
        assert!(config.stagehand.enable_caching);
        assert!(config.streaming.print_tokens);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("session_name"));
        assert!(toml_str.contains("max_turns"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.stagehand.session_name, config.stagehand.session_name);
    }

    #[test]
    fn test_config_dir() {
        let dir = Config::config_dir();
        assert!(dir.to_string_lossy().contains("stagekit"));
    }

    #[test]
    fn test_require_api_key_missing() {
        let mut config = Config::default();
        config.openai.api_key = None;
        assert!(config.require_api_key().is_err());

        config.openai.api_key = Some("sk-test".to_string());
        assert_eq!(config.require_api_key().unwrap(), "sk-test");
    }
}
