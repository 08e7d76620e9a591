// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for path resolution.

use thiserror::Error;

/// Errors raised while addressing or mutating a document by path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The path is empty, malformed, or does not match the document shape
    #[error("invalid path '{path}': {reason}")]
    InvalidPath {
        /// The offending path
        path: String,
        /// What went wrong while navigating
        reason: String,
    },

    /// A wildcard segment needs a concrete index but none was supplied
    #[error("indices required to resolve wildcard path '{path}'")]
    MissingIndex {
        /// The wildcard path
        path: String,
    },

    /// The operation name does not map to get, set, or delete
    #[error("unsupported operation '{0}'")]
    UnsupportedOperation(String),
}

impl PathError {
    /// Build an [`PathError::InvalidPath`] for `path`
    #[must_use]
    pub fn invalid_path(path: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    /// Build a [`PathError::MissingIndex`] for `path`
    #[must_use]
    pub fn missing_index(path: &str) -> Self {
        Self::MissingIndex {
            path: path.to_string(),
        }
    }
}

/// Result alias for fieldpath operations
pub type Result<T> = std::result::Result<T, PathError>;
