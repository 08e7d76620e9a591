// SPDX-License-Identifier: MIT OR Apache-2.0
//! Core types, error handling, and path grammar for fieldpath
//!
//! This crate provides the foundational types used across the fieldpath crates:
//!
//! - [`error`] - Error types and Result alias
//! - [`path`] - Dotted path segments and navigation steps
//! - [`wildcard`] - Wildcard (`$`) concretization and templating
//! - [`operations`] - Get/Set/Delete operation types

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// Error types for fieldpath operations
pub mod error;
/// Get/Set/Delete operation types
pub mod operations;
/// Dotted path grammar with two-token array lookahead
pub mod path;
/// Wildcard index substitution
pub mod wildcard;
// Re-exports for convenience
pub use error::{PathError, Result};
pub use operations::{Operation, OperationKind};
pub use path::{Segment, Step, Steps, parent_path, parse_steps, segments, trailing_index};
pub use wildcard::{Indices, WILDCARD, concretize, has_wildcard, templatize};
