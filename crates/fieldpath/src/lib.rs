// SPDX-License-Identifier: MIT OR Apache-2.0
//! # fieldpath
//!
//! Address, write, and delete values inside nested JSON documents using dotted
//! paths such as `items.0.name`, with `$` wildcards filled from index lists.
//!
//! This umbrella crate re-exports:
//!
//! - [`core`] - errors, path grammar, wildcard helpers
//! - [`ops`] - resolver, ordered batch removal, documents and partial updates
//!
//! ```
//! use fieldpath::prelude::*;
//! use serde_json::json;
//!
//! let mut doc = Document::new();
//! let path = concretize("items.$.name", Some(&Indices::Single(0))).unwrap();
//! doc.set(&path, json!("Alice")).unwrap();
//! assert_eq!(templatize(&path), "items.$.name");
//! assert_eq!(doc.into_value(), json!({"items": [{"name": "Alice"}]}));
//! ```

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]

/// Errors, path grammar, and wildcard helpers
pub use fieldpath_core as core;

/// Resolver, batch removal, documents, and partial updates
pub use fieldpath_ops as ops;

pub use fieldpath_core::{Indices, Operation, OperationKind, PathError, Result};
pub use fieldpath_ops::{
    Document, FieldAction, OrderedBatchRemover, PartialUpdate, PathResolver, ResolveOptions,
    Submission, UnsetFields,
};

/// Common imports
pub mod prelude {
    pub use fieldpath_core::{concretize, templatize};
    pub use fieldpath_ops::{
        Document, Indices, OrderedBatchRemover, PartialUpdate, PathError, PathResolver,
        ResolveOptions, Submission,
    };
}
