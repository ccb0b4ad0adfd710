//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// Deployment environment name is not one of development, staging, production.
    #[error("invalid environment '{value}': expected development, staging or production")]
    InvalidEnvironment { value: String },

    #[error("invalid retrieval top_k {value}: must be at least 1")]
    InvalidTopK { value: usize },

    /// Guard threshold outside `[0, 1]` (or NaN).
    #[error("invalid minimum confidence {value}: must be between 0 and 1")]
    InvalidConfidence { value: f32 },

    #[error("invalid cache max size {value}: must be at least 1")]
    InvalidCacheSize { value: usize },

    /// The configured model is served by a different provider than the configured one.
    #[error("model '{model}' is not served by provider '{provider}'")]
    ModelProviderMismatch {
        provider: &'static str,
        model: String,
    },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a file (when a file was expected).
    #[error("path is not a file: {path}")]
    NotAFile { path: PathBuf },
}
