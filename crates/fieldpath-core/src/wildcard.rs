// SPDX-License-Identifier: MIT OR Apache-2.0
//! Wildcard index substitution.
//!
//! Rendered field names such as `items.$.name` carry `$` in place of array
//! indices. [`concretize`] fills them in from the indices of the element being
//! rendered, and [`templatize`] maps a concrete path back to its template so
//! it can be used as a lookup key.

use crate::error::{PathError, Result};
use crate::path::{SEPARATOR, is_index};
use serde::{Deserialize, Serialize};

/// The wildcard segment
pub const WILDCARD: &str = "$";

/// Indices used to fill wildcard segments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Indices {
    /// Applied to every wildcard
    Single(usize),
    /// Consumed one per wildcard, left to right
    Each(Vec<usize>),
}

impl Indices {
    fn get(&self, position: usize) -> Option<usize> {
        match self {
            Self::Single(index) => Some(*index),
            Self::Each(indices) => indices.get(position).copied(),
        }
    }
}

impl From<usize> for Indices {
    fn from(index: usize) -> Self {
        Self::Single(index)
    }
}

impl From<Vec<usize>> for Indices {
    fn from(indices: Vec<usize>) -> Self {
        Self::Each(indices)
    }
}

impl From<&[usize]> for Indices {
    fn from(indices: &[usize]) -> Self {
        Self::Each(indices.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Indices {
    fn from(indices: [usize; N]) -> Self {
        Self::Each(indices.to_vec())
    }
}

/// Returns `true` if any segment of `path` is a wildcard
#[must_use]
pub fn has_wildcard(path: &str) -> bool {
    path.split(SEPARATOR).any(|segment| segment == WILDCARD)
}

/// Replace every wildcard segment of `path` with a concrete index.
///
/// A path without wildcards is returned unchanged whether or not indices are
/// given. Surplus indices are ignored.
///
/// ```
/// use fieldpath_core::wildcard::{Indices, concretize};
///
/// let one = Indices::Single(2);
/// assert_eq!(concretize("items.$.name", Some(&one)).unwrap(), "items.2.name");
///
/// let each = Indices::Each(vec![1, 2]);
/// assert_eq!(concretize("a.$.b.$.c", Some(&each)).unwrap(), "a.1.b.2.c");
/// ```
///
/// # Errors
///
/// Returns [`PathError::MissingIndex`] if the path has a wildcard and no
/// indices were supplied, or if a list of indices runs out.
pub fn concretize(path: &str, indices: Option<&Indices>) -> Result<String> {
    if !has_wildcard(path) {
        return Ok(path.to_string());
    }
    let indices = indices.ok_or_else(|| PathError::missing_index(path))?;

    let mut out = String::with_capacity(path.len() + 8);
    let mut consumed = 0;
    for (position, segment) in path.split(SEPARATOR).enumerate() {
        if position > 0 {
            out.push(SEPARATOR);
        }
        if segment == WILDCARD {
            let index = indices
                .get(consumed)
                .ok_or_else(|| PathError::missing_index(path))?;
            consumed += 1;
            out.push_str(&index.to_string());
        } else {
            out.push_str(segment);
        }
    }
    Ok(out)
}

/// Replace every index segment of `path` with the wildcard.
///
/// ```
/// use fieldpath_core::wildcard::templatize;
///
/// assert_eq!(templatize("items.2.name"), "items.$.name");
/// ```
#[must_use]
pub fn templatize(path: &str) -> String {
    path.split(SEPARATOR)
        .map(|segment| if is_index(segment) { WILDCARD } else { segment })
        .collect::<Vec<_>>()
        .join(".")
}
