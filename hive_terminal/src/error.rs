//! Error types for the terminal.
//!
//! Nothing here is raised while handling a user turn; every failure inside a
//! turn degrades to a textual reply. These errors cover construction only.

use thiserror::Error;

/// Failures while building a [`crate::Session`] or loading its inputs.
#[derive(Error, Debug)]
pub enum TerminalError {
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid trigger pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Portal data error: {0}")]
    Portal(#[from] hive_portal::PortalError),
}

pub type Result<T> = std::result::Result<T, TerminalError>;
