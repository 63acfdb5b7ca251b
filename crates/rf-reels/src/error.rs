//! Error types for reel strips and banks

use thiserror::Error;

/// Reel error type
#[derive(Error, Debug)]
pub enum ReelError {
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid parameter: {0}")]
    InvalidParam(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("Unknown ease: {0}")]
    UnknownEase(String),
}

/// Result type alias
pub type ReelResult<T> = Result<T, ReelError>;
