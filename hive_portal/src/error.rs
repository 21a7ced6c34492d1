//! Errors raised while loading portal data.

use thiserror::Error;

/// Failures when building a [`crate::PortalSnapshot`] from external data.
#[derive(Error, Debug)]
pub enum PortalError {
    #[error("failed to read portal data: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid portal data: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PortalError>;
