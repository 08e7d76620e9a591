// SPDX-License-Identifier: MIT OR Apache-2.0
//! Partial updates produced from a submitted document.
//!
//! A submission ends as a [`PartialUpdate`]: the mutated document under
//! `$set`, and the paths whose values were removed or whose containers became
//! empty under `$unset`.
//!
//! ```json
//! { "$set": { "name": "Alice" }, "$unset": { "tags": "" } }
//! ```

use crate::batch::OrderedBatchRemover;
use crate::document::Document;
use crate::resolver::ResolveOptions;
use fieldpath_core::error::{PathError, Result};
use serde::de::{Deserializer, IgnoredAny};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// Key under which a document may carry its own unset side channel
pub const UNSET_KEY: &str = "$unset";

/// Paths that must be removed explicitly by the consumer of an update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnsetFields(BTreeSet<String>);

impl UnsetFields {
    /// An empty set
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Record `path`; returns `false` if it was already recorded
    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        self.0.insert(path.into())
    }

    /// Forget `path`
    pub fn remove(&mut self, path: &str) -> bool {
        self.0.remove(path)
    }

    /// Returns `true` if `path` is recorded
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.0.contains(path)
    }

    /// Number of recorded paths
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing is recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Recorded paths in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Move every path of `other` into `self`
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }
}

impl<S: Into<String>> FromIterator<S> for UnsetFields {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for UnsetFields {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for UnsetFields {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// Serialized as `{"path": ""}`, the shape document stores expect for unset
impl Serialize for UnsetFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for path in &self.0 {
            map.serialize_entry(path, "")?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for UnsetFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let entries = BTreeMap::<String, IgnoredAny>::deserialize(deserializer)?;
        Ok(Self(entries.into_keys().collect()))
    }
}

/// A `$set` / `$unset` pair describing how to apply a submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialUpdate {
    /// The mutated document
    #[serde(rename = "$set", default)]
    pub set: Map<String, Value>,
    /// Paths to remove
    #[serde(rename = "$unset", default)]
    pub unset: UnsetFields,
}

impl PartialUpdate {
    /// Build an update from a document.
    ///
    /// A top-level `$unset` mapping in the document is moved out of `$set`
    /// into the unset side channel.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidPath`] if `$unset` is present but is not a
    /// mapping.
    pub fn from_document(document: Document) -> Result<Self> {
        let mut set = document.into_map();
        let unset = match set.remove(UNSET_KEY) {
            None | Some(Value::Null) => UnsetFields::new(),
            Some(Value::Object(fields)) => fields.into_iter().map(|(path, _)| path).collect(),
            Some(_) => {
                return Err(PathError::invalid_path(UNSET_KEY, "expected a mapping"));
            }
        };
        Ok(Self { set, unset })
    }

    /// Returns `true` if the update neither sets nor unsets anything
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.unset.is_empty()
    }
}

/// One step of a submission, as produced by the form glue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FieldAction {
    /// Write a field value
    Field {
        /// Field path
        name: String,
        /// Value to write
        value: Value,
    },
    /// Mark a field as cleared
    Clear {
        /// Field path
        name: String,
    },
    /// Queue removal of an array element
    RemoveElement {
        /// Element path, ending in an index
        path: String,
    },
}

/// Builder for the document and unset side channel of one submission.
///
/// Field values are written by path as they arrive, explicit clears go to the
/// unset side channel, and array element removals are queued until
/// [`Submission::finish`] so they can be applied in a safe order.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    document: Document,
    unset: UnsetFields,
    removals: Vec<String>,
}

impl Submission {
    /// Start an empty submission
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an empty submission resolving paths with `options`
    #[must_use]
    pub fn with_options(options: ResolveOptions) -> Self {
        Self {
            document: Document::with_options(options),
            ..Self::default()
        }
    }

    /// Write `value` at the field path `name`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidPath`] if `name` conflicts with the shape
    /// built so far.
    pub fn field(&mut self, name: &str, value: Value) -> Result<&mut Self> {
        self.document.set(name, value)?;
        Ok(self)
    }

    /// Record that `name` was cleared and must be unset
    pub fn clear(&mut self, name: impl Into<String>) -> &mut Self {
        self.unset.insert(name);
        self
    }

    /// Queue removal of the array element at `path`
    pub fn remove_element(&mut self, path: impl Into<String>) -> &mut Self {
        self.removals.push(path.into());
        self
    }

    /// Apply one [`FieldAction`].
    ///
    /// # Errors
    ///
    /// See [`Submission::field`].
    pub fn apply(&mut self, action: FieldAction) -> Result<&mut Self> {
        match action {
            FieldAction::Field { name, value } => self.field(&name, value),
            FieldAction::Clear { name } => Ok(self.clear(name)),
            FieldAction::RemoveElement { path } => Ok(self.remove_element(path)),
        }
    }

    /// The document built so far
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Apply queued removals and produce the update.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`OrderedBatchRemover::remove_all`] and
    /// [`PartialUpdate::from_document`].
    pub fn finish(mut self) -> Result<PartialUpdate> {
        let remover = OrderedBatchRemover::new(*self.document.resolver());
        let removed = remover.remove_all(self.document.as_map_mut(), &self.removals)?;

        let mut update = PartialUpdate::from_document(self.document)?;
        update.unset.merge(self.unset);
        update.unset.merge(removed);
        Ok(update)
    }
}
