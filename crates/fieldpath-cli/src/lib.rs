// SPDX-License-Identifier: MIT OR Apache-2.0
//! # fieldpath-cli
//!
//! Command-line interface for fieldpath - address and mutate JSON documents by
//! dotted path.
//!
//! ## Usage
//!
//! ```bash
//! # Read a value
//! fieldpath get items.0.name data.json
//!
//! # Write a value (JSON, or a bare string)
//! fieldpath set items.2.name '"Carol"' data.json
//!
//! # Fill wildcards from indices
//! fieldpath get 'items.$.tags.$' --indices 1,0 data.json
//!
//! # Remove several array elements and print the partial update
//! fieldpath remove -p items.1 -p items.3 data.json
//!
//! # Build a partial update from a list of field actions
//! fieldpath submit actions.json
//! ```
//!
//! ## Subcommands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `get` | Print the value at a path |
//! | `set` | Write a value and print the document |
//! | `delete` | Delete a value and print the document |
//! | `remove` | Remove array elements in descending index order |
//! | `concretize` | Fill `$` wildcards with indices |
//! | `templatize` | Replace indices with `$` |
//! | `submit` | Turn field actions into a `$set` / `$unset` update |
//!
//! ## Library Usage
//!
//! For programmatic access use the library crates directly:
//!
//! - [`fieldpath`](https://docs.rs/fieldpath) - Umbrella crate
//! - [`fieldpath-ops`](https://docs.rs/fieldpath-ops) - Resolver, batch removal, updates
//! - [`fieldpath-core`](https://docs.rs/fieldpath-core) - Errors and path grammar

#![doc(html_root_url = "https://docs.rs/fieldpath-cli/0.1.0")]
#![warn(missing_docs)]

use anyhow::{Context, bail};
use fieldpath_core::Indices;
use serde::Serialize;
use serde_json::Value;

/// Re-export of fieldpath-ops for path operations.
pub use fieldpath_ops as ops;

/// Re-export of fieldpath-core for core types.
pub use fieldpath_core as core;

/// Parse a command-line value as JSON, falling back to a plain string.
#[must_use]
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Parse wildcard indices: `2`, `1,2`, or a JSON array such as `[1, 2]`.
///
/// # Errors
///
/// Returns an error if any index is not a non-negative integer.
pub fn parse_indices(raw: &str) -> anyhow::Result<Indices> {
    let raw = raw.trim();
    if raw.starts_with('[') {
        return serde_json::from_str::<Vec<usize>>(raw)
            .map(Indices::Each)
            .with_context(|| format!("invalid index list '{raw}'"));
    }

    let parts = raw
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<usize>()
                .with_context(|| format!("invalid index '{part}'"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    match parts.as_slice() {
        [] => bail!("no indices given"),
        [single] => Ok(Indices::Single(*single)),
        _ => Ok(Indices::Each(parts)),
    }
}

/// Render `value` as pretty or compact JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render<T: Serialize + ?Sized>(value: &T, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_value_json() {
        assert_eq!(parse_value("42"), json!(42));
        assert_eq!(parse_value("\"Carol\""), json!("Carol"));
        assert_eq!(parse_value("{\"a\": [1]}"), json!({"a": [1]}));
        assert_eq!(parse_value("null"), Value::Null);
    }

    #[test]
    fn test_parse_value_bare_string() {
        assert_eq!(parse_value("Carol"), json!("Carol"));
        assert_eq!(parse_value(""), json!(""));
    }

    #[test]
    fn test_parse_indices() {
        assert_eq!(parse_indices("2").unwrap(), Indices::Single(2));
        assert_eq!(parse_indices("1, 2").unwrap(), Indices::Each(vec![1, 2]));
        assert_eq!(parse_indices("[3,4]").unwrap(), Indices::Each(vec![3, 4]));
        assert!(parse_indices("-1").is_err());
        assert!(parse_indices("a,1").is_err());
        assert!(parse_indices("[1, \"x\"]").is_err());
    }

    #[test]
    fn test_render() {
        let value = json!({"a": 1});
        assert_eq!(render(&value, true).unwrap(), "{\"a\":1}");
        assert_eq!(render(&value, false).unwrap(), "{\n  \"a\": 1\n}");
    }
}
