//! Custom error types for the wld-reader crate.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum WorldError {
    /// The world file path did not resolve to a file.
    #[error("World file not found: {path}")]
    FileNotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The world format version predates the sectioned layout this crate decodes.
    #[error("Unsupported world version: {0}. Only versions 88 and above are supported.")]
    UnsupportedVersion(i32),

    /// The file is structurally invalid before the tile stream even starts.
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    /// A primitive read ran past the end of the file.
    ///
    /// Carries the cursor offset and the requested width so a truncation
    /// point can be located without re-parsing.
    #[error("Unexpected end of stream at offset {offset:#x} ({wanted} more bytes wanted)")]
    UnexpectedEndOfStream { offset: u64, wanted: usize },
}

/// A convenience `Result` type alias using the crate's `WorldError` type.
pub type Result<T> = std::result::Result<T, WorldError>;
