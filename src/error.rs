//! Error types for loading, highlighting, and startup.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain the Markdown resource.
///
/// Every variant displays with the same `Failed to load markdown file:`
/// prefix so the alert block reads the same regardless of transport.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to load markdown file: {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("Failed to load markdown file: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to load markdown file: {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A single code block could not be highlighted. Never fatal.
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("syntect error: {0}")]
    Syntect(#[from] syntect::Error),
}

/// Configuration and startup failures.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input location: {0}")]
    InvalidLocation(String),

    #[error("Unknown syntax theme: {0}")]
    UnknownTheme(String),

    #[error("Theme CSS error: {0}")]
    ThemeCss(#[from] syntect::Error),

    #[error("Cannot bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;
