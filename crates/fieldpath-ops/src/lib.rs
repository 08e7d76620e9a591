// SPDX-License-Identifier: MIT OR Apache-2.0
//! # Path operations for fieldpath
//!
//! Reads, writes, and deletes values inside nested JSON documents addressed by
//! dotted paths such as `items.0.name`.
//!
//! - [`resolver`] - get/set/delete with container creation and one-level pruning
//! - [`batch`] - removal of several array elements in descending index order
//! - [`document`] - mapping-rooted document with wildcard-aware accessors
//! - [`update`] - `$set` / `$unset` partial updates and the submission builder
//!
//! ```
//! use fieldpath_ops::Document;
//! use serde_json::json;
//!
//! let mut doc = Document::new();
//! doc.set("items.0.name", json!("Alice")).unwrap();
//! doc.set("items.1.name", json!("Bob")).unwrap();
//! doc.delete("items.0.name").unwrap();
//! assert_eq!(doc.into_value(), json!({"items": [{}, {"name": "Bob"}]}));
//! ```

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]

/// Ordered batch removal of array elements
pub mod batch;
/// Mapping-rooted document wrapper
pub mod document;
/// Path resolver
pub mod resolver;
/// Partial updates and submissions
pub mod update;

pub use batch::{OrderedBatchRemover, remove_all};
pub use document::Document;
pub use fieldpath_core::{Indices, Operation, OperationKind, PathError, Result};
pub use resolver::{DEFAULT_MAX_INDEX, PathResolver, ResolveOptions, delete, get, resolve, set};
pub use update::{FieldAction, PartialUpdate, Submission, UNSET_KEY, UnsetFields};
