//! Store error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or saving an option store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unknown option tag {tag:?} at byte {offset}")]
    UnknownTag { tag: char, offset: usize },

    #[error("Option name is not terminated by a space at byte {offset}")]
    UnterminatedName { offset: usize },

    #[error("Empty option name at byte {offset}")]
    EmptyName { offset: usize },

    #[error("Failed to write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Check if this is a parse error (as opposed to an I/O failure)
    pub fn is_parse(&self) -> bool {
        !matches!(self, StoreError::Io { .. })
    }

    /// Get the byte offset at which a parse error occurred
    pub fn offset(&self) -> Option<usize> {
        match self {
            StoreError::UnknownTag { offset, .. } => Some(*offset),
            StoreError::UnterminatedName { offset } => Some(*offset),
            StoreError::EmptyName { offset } => Some(*offset),
            StoreError::Io { .. } => None,
        }
    }
}
