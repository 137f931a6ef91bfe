// src/error.rs

//! Unified error handling for the bot.

use std::fmt;

use thiserror::Error;

/// Result type alias for bot operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// The page never showed its ready marker
    #[error("Timed out after {timeout_secs}s waiting for '{marker}' on {url}")]
    FetchTimeout {
        url: String,
        marker: String,
        timeout_secs: u64,
    },

    /// Station name is not in the directory
    #[error("Station not registered: {0}")]
    UnknownStation(String),

    /// Chat delivery failed
    #[error("Chat delivery failed: {0}")]
    Chat(String),

    /// Chat command could not be parsed
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a chat delivery error.
    pub fn chat(message: impl fmt::Display) -> Self {
        Self::Chat(message.to_string())
    }

    /// Create a fetch timeout error.
    pub fn fetch_timeout(
        url: impl Into<String>,
        marker: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self::FetchTimeout {
            url: url.into(),
            marker: marker.into(),
            timeout_secs,
        }
    }
}
