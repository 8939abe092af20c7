//! Error types for Kestrel.

use std::io;

/// Errors produced by the Kestrel toolkit.
///
/// Pointer and layout paths never fail; these cover the collaborators that
/// can: style lookup plus config and stylesheet parsing. Draw backends
/// report their own failures through `Io`.
#[derive(Debug, thiserror::Error)]
pub enum KestrelError {
    #[error("style error: {0}")]
    Style(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, KestrelError>;
