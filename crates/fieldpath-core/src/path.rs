// SPDX-License-Identifier: MIT OR Apache-2.0
//! Dotted path grammar.
//!
//! Paths are dot-separated segments. A segment made only of ASCII digits is an
//! array index, a segment that is exactly `$` is an unresolved wildcard, and
//! anything else is an object key.
//!
//! Navigation does not treat indices as an address space of their own. A key
//! immediately followed by an index is read as one [`Step::Element`]: "the
//! array stored under this key, at this index". Every other key is a
//! [`Step::Field`]. This is a two-token lookahead over the segments, not a
//! grammar, and it means `items.0.name` walks `items[0]` then `name`.
//!
//! ```
//! use fieldpath_core::path::{Step, parse_steps};
//!
//! let steps = parse_steps("items.2.name").unwrap();
//! assert_eq!(
//!     steps.as_slice(),
//!     &[Step::Element { field: "items", index: 2 }, Step::Field("name")]
//! );
//! ```

use crate::error::{PathError, Result};
use crate::wildcard::WILDCARD;
use smallvec::SmallVec;
use std::fmt;

/// Segment separator
pub const SEPARATOR: char = '.';

/// A single classified path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Object key
    Key(&'a str),
    /// Array index (saturates at `usize::MAX` for oversized digit runs)
    Index(usize),
    /// Unresolved `$` wildcard
    Wildcard,
}

impl<'a> Segment<'a> {
    /// Classify a raw segment
    #[must_use]
    pub fn classify(raw: &'a str) -> Self {
        if raw == WILDCARD {
            Self::Wildcard
        } else if is_index(raw) {
            Self::Index(parse_index(raw))
        } else {
            Self::Key(raw)
        }
    }

    /// Returns `true` for index segments
    #[must_use]
    pub const fn is_index(&self) -> bool {
        matches!(self, Self::Index(_))
    }
}

/// One navigation step produced by the two-token lookahead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    /// Plain object key access
    Field(&'a str),
    /// Array stored under `field`, at `index`
    Element {
        /// Key holding the array
        field: &'a str,
        /// Position within the array
        index: usize,
    },
}

impl Step<'_> {
    /// The object key this step reads from its container
    #[must_use]
    pub const fn field(&self) -> &str {
        match self {
            Self::Field(field) | Self::Element { field, .. } => field,
        }
    }
}

impl fmt::Display for Step<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(field) => f.write_str(field),
            Self::Element { field, index } => write!(f, "{field}{SEPARATOR}{index}"),
        }
    }
}

/// Steps for a typical path fit inline
pub type Steps<'a> = SmallVec<[Step<'a>; 8]>;

/// Returns `true` if `raw` is a non-empty run of ASCII digits
#[inline]
#[must_use]
pub fn is_index(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit())
}

#[inline]
fn parse_index(raw: &str) -> usize {
    raw.bytes().fold(0usize, |acc, b| {
        acc.saturating_mul(10).saturating_add(usize::from(b - b'0'))
    })
}

/// Iterate over the classified segments of `path`
pub fn segments(path: &str) -> impl Iterator<Item = Segment<'_>> {
    path.split(SEPARATOR).map(Segment::classify)
}

/// Split `path` into navigation steps.
///
/// # Errors
///
/// Returns [`PathError::InvalidPath`] if the path is empty, has an empty
/// segment, or still contains a wildcard.
pub fn parse_steps(path: &str) -> Result<Steps<'_>> {
    if path.is_empty() {
        return Err(PathError::invalid_path(path, "path is empty"));
    }

    let raw: SmallVec<[&str; 16]> = path.split(SEPARATOR).collect();
    let mut steps = Steps::new();
    let mut idx = 0;
    while idx < raw.len() {
        let segment = raw[idx];
        if segment.is_empty() {
            return Err(PathError::invalid_path(
                path,
                format!("empty segment at position {idx}"),
            ));
        }
        if segment == WILDCARD {
            return Err(PathError::invalid_path(
                path,
                format!("unresolved wildcard at position {idx}"),
            ));
        }

        match raw.get(idx + 1).map(|next| Segment::classify(next)) {
            Some(Segment::Index(index)) => {
                steps.push(Step::Element {
                    field: segment,
                    index,
                });
                idx += 2;
            }
            _ => {
                steps.push(Step::Field(segment));
                idx += 1;
            }
        }
    }

    Ok(steps)
}

/// The path with its last segment removed, or `None` for a single segment
#[must_use]
pub fn parent_path(path: &str) -> Option<&str> {
    path.rsplit_once(SEPARATOR).map(|(parent, _)| parent)
}

/// The trailing index of `path`, if its last segment is an index
#[must_use]
pub fn trailing_index(path: &str) -> Option<usize> {
    let last = path.rsplit(SEPARATOR).next()?;
    match Segment::classify(last) {
        Segment::Index(index) => Some(index),
        _ => None,
    }
}
