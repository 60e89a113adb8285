//! Error handling for the weaver binary.

use std::{io, result};

use thiserror::Error;

/// Convenient result type for weaver commands.
pub type Result<T> = result::Result<T, Error>;

/// Errors that end a weaver invocation with a non-zero exit code.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrapper for standard I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Configuration parsing or resolution errors.
    #[error("{}", .0.pretty())]
    Config(#[from] config::Error),
    /// The resize pipeline aborted before writing anything.
    #[error("{0}")]
    Engine(#[from] weaver_engine::Error),
    /// One or both frame writes failed.
    #[error("{command}: window not fully placed (position {position}, size {size})")]
    Incomplete {
        /// Command that was applied.
        command: String,
        /// Outcome of the position write.
        position: String,
        /// Outcome of the size write.
        size: String,
    },
}
