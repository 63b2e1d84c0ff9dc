// src/error.rs

//! Unified error handling for the news reader.

use std::fmt;

use thiserror::Error;

/// Result type alias for reader operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed before a response was received
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

    /// The server rejected our credentials (HTTP 401)
    #[error("Authentication expired. Please log in again.")]
    Unauthorized,

    /// The server answered with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// A detail query was issued without an id
    #[error("Missing {0} id")]
    MissingId(String),

    /// Route could not be parsed
    #[error("Route error: {0}")]
    Route(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create an API error from a status code and message.
    pub fn api(status: u16, message: impl fmt::Display) -> Self {
        Self::Api {
            status,
            message: message.to_string(),
        }
    }

    /// Create a route error.
    pub fn route(message: impl Into<String>) -> Self {
        Self::Route(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether a retry could plausibly succeed.
    ///
    /// Transport failures and 5xx answers are transient; everything the
    /// server rejected on purpose is not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
