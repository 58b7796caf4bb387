//! Error types for the folio site core.

use std::io;

/// Errors produced by host services and configuration loading.
///
/// Navigation itself never fails on a missing element; these variants only
/// surface when a host capability (history, preference storage, the form
/// relay) reports a problem.
#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error("config error: {0}")]
    Config(String),

    #[error("platform error: {0}")]
    Platform(String),

    #[error("preference error: {0}")]
    Preference(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("form error: {0}")]
    Form(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, FolioError>;
