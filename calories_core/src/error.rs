//! Error types for the calories_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for calories_core operations
///
/// The projection engine itself is total and never produces one of these;
/// they come from the stores, config and export layers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Profile store error
    #[error("Profile error: {0}")]
    Profile(String),

    /// Measurement store error
    #[error("Measurement error: {0}")]
    Measurement(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
