//! Terminal configuration, loaded from TOML.
//!
//! ```toml
//! command_prefix = "/"
//! seed = 7
//!
//! [delay]
//! base_ms = 500
//! per_char_ms = 30
//! max_ms = 2000
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Banner shown as the first message of every new conversation.
pub const DEFAULT_GREETING: &str = "HIVE DROID v3.2 Online. 🤖 \nI have deep access to the Hive database.\nTry '/help' to see my expanded capabilities.";

/// Timing of the simulated "thinking" pause before a reply appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelayConfig {
    /// Minimum pause for any reply.
    pub base_ms: u64,

    /// Extra pause per character of reply text.
    pub per_char_ms: u64,

    /// Upper bound on the pause.
    pub max_ms: u64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            base_ms: 500,
            per_char_ms: 30,
            max_ms: 2000,
        }
    }
}

/// Top-level configuration for a [`crate::Session`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Marker that forces input to be read as a command.
    pub command_prefix: String,

    /// First assistant message of a fresh conversation; empty disables it.
    pub greeting: String,

    /// Seed for the session RNG. `None` seeds from entropy.
    pub seed: Option<u64>,

    pub delay: DelayConfig,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            command_prefix: "/".to_string(),
            greeting: DEFAULT_GREETING.to_string(),
            seed: None,
            delay: DelayConfig::default(),
        }
    }
}

impl TerminalConfig {
    /// Parse a configuration from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Fix the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the opening banner.
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TerminalConfig::default();
        assert_eq!(config.command_prefix, "/");
        assert_eq!(config.delay.base_ms, 500);
        assert_eq!(config.delay.max_ms, 2000);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = TerminalConfig::from_toml_str(
            r#"
            seed = 42

            [delay]
            per_char_ms = 20
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.delay.per_char_ms, 20);
        assert_eq!(config.delay.base_ms, 500);
        assert_eq!(config.command_prefix, "/");
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(TerminalConfig::from_toml_str("").unwrap(), TerminalConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TerminalConfig::from_toml_str("seed = \"many\"").unwrap_err();
        assert!(matches!(err, crate::TerminalError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TerminalConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, crate::TerminalError::Io(_)));
    }
}
