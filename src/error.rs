//! Error types for DishaNav

use thiserror::Error;

/// DishaNav error type
#[derive(Error, Debug)]
pub enum DishaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Field layout error: {0}")]
    Layout(String),

    #[error("Path planning failed: {0}")]
    Planning(String),
}

impl From<std::io::Error> for DishaError {
    fn from(e: std::io::Error) -> Self {
        DishaError::Config(e.to_string())
    }
}

impl From<toml::de::Error> for DishaError {
    fn from(e: toml::de::Error) -> Self {
        DishaError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DishaError>;
