// SPDX-License-Identifier: MIT OR Apache-2.0
//! Mapping-rooted document with wildcard-aware field access.

use crate::batch::OrderedBatchRemover;
use crate::resolver::{PathResolver, ResolveOptions};
use crate::update::UnsetFields;
use fieldpath_core::error::{PathError, Result};
use fieldpath_core::wildcard::{Indices, concretize};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A document whose root is always a mapping.
///
/// Field names may be wildcard templates (`items.$.name`); the `*_value`
/// accessors concretize them with the supplied indices before resolving.
/// Equality compares content only, not resolver options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    root: Map<String, Value>,
    #[serde(skip)]
    resolver: PathResolver,
}

impl Document {
    /// An empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty document resolving paths with `options`
    #[must_use]
    pub fn with_options(options: ResolveOptions) -> Self {
        Self {
            root: Map::new(),
            resolver: PathResolver::new(options),
        }
    }

    /// Wrap an existing mapping
    #[must_use]
    pub fn from_map(root: Map<String, Value>) -> Self {
        Self {
            root,
            resolver: PathResolver::default(),
        }
    }

    /// Replace the resolver options
    #[must_use]
    pub fn options(mut self, options: ResolveOptions) -> Self {
        self.resolver = PathResolver::new(options);
        self
    }

    /// The resolver used by this document
    #[must_use]
    pub const fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// The root mapping
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    /// The root mapping, mutably
    pub const fn as_map_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.root
    }

    /// Unwrap the root mapping
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.root
    }

    /// Unwrap into a JSON value
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    /// Read the value at a concrete `path`.
    ///
    /// # Errors
    ///
    /// See [`PathResolver::get`].
    pub fn get(&self, path: &str) -> Result<Option<&Value>> {
        self.resolver.get(&self.root, path)
    }

    /// Write `value` at a concrete `path`.
    ///
    /// # Errors
    ///
    /// See [`PathResolver::set`].
    pub fn set(&mut self, path: &str, value: Value) -> Result<()> {
        self.resolver.set(&mut self.root, path, value)
    }

    /// Remove the value at a concrete `path`.
    ///
    /// # Errors
    ///
    /// See [`PathResolver::delete`].
    pub fn delete(&mut self, path: &str) -> Result<Option<Value>> {
        self.resolver.delete(&mut self.root, path)
    }

    /// Remove several array elements in descending index order.
    ///
    /// # Errors
    ///
    /// See [`OrderedBatchRemover::remove_all`].
    pub fn remove_elements<S: AsRef<str>>(&mut self, paths: &[S]) -> Result<UnsetFields> {
        OrderedBatchRemover::new(self.resolver).remove_all(&mut self.root, paths)
    }

    /// Read the field `name`, filling wildcards from `indices`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::MissingIndex`] if `name` has wildcards and no
    /// indices, otherwise see [`PathResolver::get`].
    pub fn value(&self, name: &str, indices: Option<&Indices>) -> Result<Option<&Value>> {
        let path = concretize(name, indices)?;
        self.resolver.get(&self.root, &path)
    }

    /// Write the field `name`, filling wildcards from `indices`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::MissingIndex`] if `name` has wildcards and no
    /// indices, otherwise see [`PathResolver::set`].
    pub fn set_value(&mut self, name: &str, indices: Option<&Indices>, value: Value) -> Result<()> {
        let path = concretize(name, indices)?;
        self.resolver.set(&mut self.root, &path, value)
    }

    /// Remove the field `name`, filling wildcards from `indices`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::MissingIndex`] if `name` has wildcards and no
    /// indices, otherwise see [`PathResolver::delete`].
    pub fn delete_value(&mut self, name: &str, indices: Option<&Indices>) -> Result<Option<Value>> {
        let path = concretize(name, indices)?;
        self.resolver.delete(&mut self.root, &path)
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

impl Eq for Document {}

impl From<Map<String, Value>> for Document {
    fn from(root: Map<String, Value>) -> Self {
        Self::from_map(root)
    }
}

impl TryFrom<Value> for Document {
    type Error = PathError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self::from_map(root)),
            _ => Err(PathError::invalid_path("", "document root is not a mapping")),
        }
    }
}

impl From<Document> for Value {
    fn from(document: Document) -> Self {
        document.into_value()
    }
}
