//! Error types for settings loading

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Settings file could not be read
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid TOML or has mistyped fields
    #[error("Invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for settings operations
pub type Result<T> = std::result::Result<T, SettingsError>;
