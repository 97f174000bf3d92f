//! Error types.
//!
//! [`GridError`] is the narrow, non-fatal taxonomy of the double buffer. [`Error`] is
//! what the application layer (config loading, terminal I/O, name lookups) returns.

use thiserror::Error;

/// Errors produced by grid access and resizing. None of them are fatal.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// A read or write outside the current dimensions.
    #[error("coordinates out of bounds: ({x}, {y})")]
    OutOfBounds { x: i64, y: i64 },

    /// A resize to dimensions that cannot describe a terminal grid.
    #[error("invalid grid size: {width}x{height}")]
    InvalidSize { width: i64, height: i64 },
}

/// Application level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file {path}: {source}")]
    Config {
        path: std::path::PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("unknown pattern: {0}")]
    UnknownPattern(String),

    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("failed to initialize logging: {0}")]
    Logging(#[from] log::SetLoggerError),
}

/// Result type alias using the application [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
