// SPDX-License-Identifier: MIT OR Apache-2.0
//! Index-safe removal of several array elements.
//!
//! Removing an element shifts every later element down by one, so a batch of
//! element paths is applied highest index first. Every path's index is then
//! still valid when its turn comes.

use crate::resolver::PathResolver;
use crate::update::UnsetFields;
use fieldpath_core::error::{PathError, Result};
use fieldpath_core::path::{parent_path, trailing_index};
use serde_json::{Map, Value};
use std::cmp::Reverse;

/// Removes array elements by path in descending index order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderedBatchRemover {
    resolver: PathResolver,
}

impl OrderedBatchRemover {
    /// Create a remover that deletes through `resolver`
    #[must_use]
    pub const fn new(resolver: PathResolver) -> Self {
        Self { resolver }
    }

    /// Delete every element addressed by `paths`.
    ///
    /// Paths are sorted by trailing index, highest first. Ties are broken by
    /// path, descending, so a nested element under `items.1` goes before
    /// `items.1` itself; exact duplicates are removed once. After each
    /// deletion, if the element's parent path no longer resolves to a value,
    /// the parent path is recorded in the returned [`UnsetFields`].
    ///
    /// Ordering only considers the trailing index, so it is safe for paths
    /// into the same array. When one path removes an element of an outer
    /// array and another path reaches through a later element of that array
    /// (`items.1` and `items.2.tags.0`), the outer removal may run first and
    /// shift the later element; the inner path then resolves to nothing and
    /// is skipped. Split such batches by array level.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidPath`] before touching the document if any
    /// path does not end in an index, and propagates navigation errors from
    /// the resolver.
    pub fn remove_all<S: AsRef<str>>(
        &self,
        document: &mut Map<String, Value>,
        paths: &[S],
    ) -> Result<UnsetFields> {
        let mut ordered = paths
            .iter()
            .map(|path| {
                let path = path.as_ref();
                trailing_index(path)
                    .map(|index| (index, path))
                    .ok_or_else(|| {
                        PathError::invalid_path(path, "does not address an array element")
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        ordered.sort_unstable_by_key(|&(index, path)| (Reverse(index), Reverse(path)));
        ordered.dedup();

        tracing::debug!(
            target: "fieldpath::batch",
            requested = paths.len(),
            removing = ordered.len(),
            "Removing array elements in descending index order"
        );

        let mut unset = UnsetFields::new();
        for (index, path) in ordered {
            let removed = self.resolver.delete(document, path)?;
            tracing::trace!(
                target: "fieldpath::batch",
                path,
                index,
                removed = removed.is_some(),
                "Removed array element"
            );

            if let Some(parent) = parent_path(path)
                && self.resolver.get(document, parent)?.is_none()
            {
                tracing::debug!(target: "fieldpath::batch", parent, "Marking emptied parent for unset");
                unset.insert(parent);
            }
        }
        Ok(unset)
    }
}

/// Delete every element addressed by `paths` with default options.
///
/// # Errors
///
/// See [`OrderedBatchRemover::remove_all`].
pub fn remove_all<S: AsRef<str>>(
    document: &mut Map<String, Value>,
    paths: &[S],
) -> Result<UnsetFields> {
    OrderedBatchRemover::default().remove_all(document, paths)
}
