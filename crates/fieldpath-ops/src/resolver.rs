// SPDX-License-Identifier: MIT OR Apache-2.0
//! Path-addressed get/set/delete over nested JSON documents.
//!
//! A document is a root mapping. Paths are walked with the two-token lookahead
//! from [`fieldpath_core::path`], so `items.0.name` reads the array under
//! `items`, takes element `0`, and then the key `name` inside it.
//!
//! # Creating and pruning containers
//!
//! Writes and deletes are deliberately asymmetric:
//!
//! - **Set** creates every missing container on the way down: a mapping for a
//!   field step, an array for an element step. Arrays shorter than the index
//!   are padded. Padding added while descending is `{}`, padding added for a
//!   terminal assignment is `null`. A `null` found where a container is
//!   required counts as missing.
//! - **Delete** prunes at most one level on the way up. Removing the last
//!   element of an array removes the array's key. Removing the last key of a
//!   mapping removes that mapping from its parent, and nothing above that. When
//!   the emptied mapping is an array element, the array's key is removed only
//!   if every remaining element is vacant (`{}` or `null`).
//!
//! Deeply nested documents therefore keep empty ancestors after a delete. Do
//! not turn this into recursive pruning; callers rely on the exact shape.
//!
//! # Missing containers
//!
//! Get and Delete never create anything. When a container on the way is
//! missing they return `Ok(None)`, so a repeated delete is a no-op. A present
//! value that is not a container is always [`PathError::InvalidPath`].
//!
//! [`ResolveOptions::max_index`] bounds only Set, the one operation that pads
//! arrays. Get and Delete reach any index that exists.

use fieldpath_core::error::{PathError, Result};
use fieldpath_core::operations::Operation;
use fieldpath_core::path::{Step, Steps, parse_steps};
use serde_json::{Map, Value};

/// Default upper bound for array indices in a path
pub const DEFAULT_MAX_INDEX: usize = 65_535;

/// Options controlling path resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Largest array index a Set may write to
    pub max_index: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolveOptions {
    /// Options with default limits
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_index: DEFAULT_MAX_INDEX,
        }
    }

    /// Set the largest addressable array index
    #[must_use]
    pub const fn with_max_index(mut self, max_index: usize) -> Self {
        self.max_index = max_index;
        self
    }
}

/// What a delete removed, and whether it left its mapping empty
struct Removal {
    value: Option<Value>,
    emptied: bool,
}

impl Removal {
    const fn nothing() -> Self {
        Self {
            value: None,
            emptied: false,
        }
    }
}

/// Stateless path resolver.
///
/// Holds only its [`ResolveOptions`]; copy it freely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathResolver {
    options: ResolveOptions,
}

impl PathResolver {
    /// Create a resolver with the given options
    #[must_use]
    pub const fn new(options: ResolveOptions) -> Self {
        Self { options }
    }

    /// The resolver's options
    #[must_use]
    pub const fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Apply `operation` to `document` at `path`.
    ///
    /// Get returns a copy of the value, Delete returns the removed value, Set
    /// returns `None`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidPath`] if the root is not a mapping, the
    /// path is malformed, or navigation meets a non-container.
    pub fn resolve(
        &self,
        document: &mut Value,
        path: &str,
        operation: Operation,
    ) -> Result<Option<Value>> {
        let Value::Object(map) = document else {
            return Err(PathError::invalid_path(
                path,
                "document root is not a mapping",
            ));
        };
        match operation {
            Operation::Get => Ok(self.get(map, path)?.cloned()),
            Operation::Set(value) => {
                self.set(map, path, value)?;
                Ok(None)
            }
            Operation::Delete => self.delete(map, path),
        }
    }

    /// Read the value at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidPath`] if the path is malformed or a
    /// non-container sits where a container is required.
    pub fn get<'d>(
        &self,
        document: &'d Map<String, Value>,
        path: &str,
    ) -> Result<Option<&'d Value>> {
        let steps = parse_steps(path)?;
        let Some((last, init)) = steps.split_last() else {
            return Err(PathError::invalid_path(path, "path is empty"));
        };

        let mut map = document;
        for step in init {
            let next = match *step {
                Step::Field(key) => map.get(key),
                Step::Element { field, index } => match array_of(path, map, field)? {
                    Some(array) => array.get(index),
                    None => return Ok(None),
                },
            };
            map = match next {
                None | Some(Value::Null) => return Ok(None),
                Some(Value::Object(child)) => child,
                Some(_) => return Err(expected_mapping(path, step)),
            };
        }

        match *last {
            Step::Field(key) => Ok(map.get(key)),
            Step::Element { field, index } => {
                Ok(array_of(path, map, field)?.and_then(|array| array.get(index)))
            }
        }
    }

    /// Write `value` at `path`, creating missing containers.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidPath`] if the path is malformed, an index
    /// exceeds the configured limit, or a non-container sits where a container
    /// is required.
    pub fn set(
        &self,
        document: &mut Map<String, Value>,
        path: &str,
        value: Value,
    ) -> Result<()> {
        let steps = self.bounded_steps(path)?;
        let Some((last, init)) = steps.split_last() else {
            return Err(PathError::invalid_path(path, "path is empty"));
        };

        let mut map = document;
        for step in init {
            let slot = match *step {
                Step::Field(key) => map.entry(key).or_insert(Value::Null),
                Step::Element { field, index } => {
                    let len = padded_len(path, index)?;
                    let array = vivify_array(path, map, field)?;
                    if array.len() < len {
                        tracing::trace!(
                            target: "fieldpath::resolver",
                            path,
                            field,
                            from = array.len(),
                            to = len,
                            "Padding array with empty mappings"
                        );
                        array.resize_with(len, empty_mapping);
                    }
                    &mut array[index]
                }
            };
            if slot.is_null() {
                tracing::trace!(target: "fieldpath::resolver", path, step = %step, "Creating mapping");
                *slot = empty_mapping();
            }
            map = match slot {
                Value::Object(child) => child,
                _ => return Err(expected_mapping(path, step)),
            };
        }

        match *last {
            Step::Field(key) => {
                map.insert(key.to_string(), value);
            }
            Step::Element { field, index } => {
                let len = padded_len(path, index)?;
                let array = vivify_array(path, map, field)?;
                if array.len() < len {
                    array.resize(len, Value::Null);
                }
                array[index] = value;
            }
        }
        Ok(())
    }

    /// Remove the value at `path` and return it.
    ///
    /// Missing containers and missing terminal keys are a no-op returning
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidPath`] if the path is malformed or a
    /// non-container sits where a container is required.
    pub fn delete(
        &self,
        document: &mut Map<String, Value>,
        path: &str,
    ) -> Result<Option<Value>> {
        let steps = parse_steps(path)?;
        // The root has no parent, so an emptied root is left as is
        Ok(delete_in(path, document, &steps)?.value)
    }

    // Only Set allocates, so only Set is bounded
    fn bounded_steps<'p>(&self, path: &'p str) -> Result<Steps<'p>> {
        let steps = parse_steps(path)?;
        for step in &steps {
            if let Step::Element { index, .. } = *step
                && index > self.options.max_index
            {
                return Err(PathError::invalid_path(
                    path,
                    format!(
                        "index {index} exceeds the limit of {}",
                        self.options.max_index
                    ),
                ));
            }
        }
        Ok(steps)
    }
}

fn delete_in(path: &str, map: &mut Map<String, Value>, steps: &[Step<'_>]) -> Result<Removal> {
    let Some((step, rest)) = steps.split_first() else {
        return Ok(Removal::nothing());
    };

    if rest.is_empty() {
        return Ok(match *step {
            Step::Field(key) => {
                let value = map.remove(key);
                Removal {
                    emptied: value.is_some() && map.is_empty(),
                    value,
                }
            }
            Step::Element { field, index } => {
                let Some(array) = array_of_mut(path, map, field)? else {
                    return Ok(Removal::nothing());
                };
                if index >= array.len() {
                    return Ok(Removal::nothing());
                }
                let value = array.remove(index);
                if array.is_empty() {
                    tracing::debug!(target: "fieldpath::resolver", path, field, "Pruning emptied array");
                    map.remove(field);
                }
                Removal {
                    value: Some(value),
                    emptied: false,
                }
            }
        });
    }

    // An emptied child is pruned here and not reported further up
    match *step {
        Step::Field(key) => {
            let child = match map.get_mut(key) {
                None | Some(Value::Null) => return Ok(Removal::nothing()),
                Some(Value::Object(child)) => child,
                Some(_) => return Err(expected_mapping(path, step)),
            };
            let removal = delete_in(path, child, rest)?;
            if removal.emptied {
                tracing::debug!(target: "fieldpath::resolver", path, key, "Pruning emptied mapping");
                map.remove(key);
            }
            Ok(Removal {
                value: removal.value,
                emptied: false,
            })
        }
        Step::Element { field, index } => {
            let Some(array) = array_of_mut(path, map, field)? else {
                return Ok(Removal::nothing());
            };
            let child = match array.get_mut(index) {
                None | Some(Value::Null) => return Ok(Removal::nothing()),
                Some(Value::Object(child)) => child,
                Some(_) => return Err(expected_mapping(path, step)),
            };
            let removal = delete_in(path, child, rest)?;
            if removal.emptied && array.iter().all(is_vacant) {
                tracing::debug!(target: "fieldpath::resolver", path, field, "Pruning array of vacant elements");
                map.remove(field);
            }
            Ok(Removal {
                value: removal.value,
                emptied: false,
            })
        }
    }
}

fn array_of<'d>(
    path: &str,
    map: &'d Map<String, Value>,
    field: &str,
) -> Result<Option<&'d Vec<Value>>> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(array)) => Ok(Some(array)),
        Some(_) => Err(expected_array(path, field)),
    }
}

fn array_of_mut<'d>(
    path: &str,
    map: &'d mut Map<String, Value>,
    field: &str,
) -> Result<Option<&'d mut Vec<Value>>> {
    match map.get_mut(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(array)) => Ok(Some(array)),
        Some(_) => Err(expected_array(path, field)),
    }
}

fn vivify_array<'d>(
    path: &str,
    map: &'d mut Map<String, Value>,
    field: &str,
) -> Result<&'d mut Vec<Value>> {
    let slot = map.entry(field).or_insert(Value::Null);
    if slot.is_null() {
        tracing::trace!(target: "fieldpath::resolver", path, field, "Creating array");
        *slot = Value::Array(Vec::new());
    }
    match slot {
        Value::Array(array) => Ok(array),
        _ => Err(expected_array(path, field)),
    }
}

fn padded_len(path: &str, index: usize) -> Result<usize> {
    index
        .checked_add(1)
        .ok_or_else(|| PathError::invalid_path(path, "index out of range"))
}

fn empty_mapping() -> Value {
    Value::Object(Map::new())
}

fn is_vacant(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn expected_mapping(path: &str, step: &Step<'_>) -> PathError {
    PathError::invalid_path(path, format!("expected a mapping at '{step}'"))
}

fn expected_array(path: &str, field: &str) -> PathError {
    PathError::invalid_path(path, format!("expected an array at '{field}'"))
}

/// Read the value at `path` with default options.
///
/// # Errors
///
/// See [`PathResolver::get`].
pub fn get<'d>(document: &'d Map<String, Value>, path: &str) -> Result<Option<&'d Value>> {
    PathResolver::default().get(document, path)
}

/// Write `value` at `path` with default options.
///
/// # Errors
///
/// See [`PathResolver::set`].
pub fn set(document: &mut Map<String, Value>, path: &str, value: Value) -> Result<()> {
    PathResolver::default().set(document, path, value)
}

/// Remove the value at `path` with default options.
///
/// # Errors
///
/// See [`PathResolver::delete`].
pub fn delete(document: &mut Map<String, Value>, path: &str) -> Result<Option<Value>> {
    PathResolver::default().delete(document, path)
}

/// Apply `operation` at `path` with default options.
///
/// # Errors
///
/// See [`PathResolver::resolve`].
pub fn resolve(document: &mut Value, path: &str, operation: Operation) -> Result<Option<Value>> {
    PathResolver::default().resolve(document, path, operation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not a mapping: {other}"),
        }
    }

    #[test]
    fn test_get_nested() {
        let d = doc(json!({"a": {"b": {"c": 1}}, "items": [{"name": "x"}]}));
        assert_eq!(get(&d, "a.b.c").unwrap(), Some(&json!(1)));
        assert_eq!(get(&d, "items.0.name").unwrap(), Some(&json!("x")));
        assert_eq!(get(&d, "items.0").unwrap(), Some(&json!({"name": "x"})));
        assert_eq!(get(&d, "a.b").unwrap(), Some(&json!({"c": 1})));
    }

    #[test]
    fn test_get_missing_is_none() {
        let d = doc(json!({"a": {}, "items": [1]}));
        assert_eq!(get(&d, "a.b.c").unwrap(), None);
        assert_eq!(get(&d, "x.y").unwrap(), None);
        assert_eq!(get(&d, "items.5").unwrap(), None);
        assert_eq!(get(&d, "missing.0.name").unwrap(), None);
    }

    #[test]
    fn test_get_does_not_mutate() {
        let d = doc(json!({"a": {}}));
        let before = d.clone();
        let _ = get(&d, "a.b.0.c").unwrap();
        assert_eq!(d, before);
    }

    #[test]
    fn test_get_through_scalar_fails() {
        let d = doc(json!({"a": "text", "n": 3}));
        assert!(matches!(
            get(&d, "a.b"),
            Err(PathError::InvalidPath { .. })
        ));
        assert!(matches!(
            get(&d, "n.0"),
            Err(PathError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_set_creates_minimal_containers() {
        let mut d = Map::new();
        set(&mut d, "a.b.c", json!(1)).unwrap();
        assert_eq!(Value::Object(d), json!({"a": {"b": {"c": 1}}}));
    }

    #[test]
    fn test_set_element_creates_array() {
        let mut d = Map::new();
        set(&mut d, "items.0.name", json!("Alice")).unwrap();
        assert_eq!(Value::Object(d), json!({"items": [{"name": "Alice"}]}));
    }

    #[test]
    fn test_set_pads_terminal_with_null() {
        let mut d = Map::new();
        set(&mut d, "tags.2", json!("c")).unwrap();
        assert_eq!(Value::Object(d), json!({"tags": [null, null, "c"]}));
    }

    #[test]
    fn test_set_pads_descent_with_mappings() {
        let mut d = Map::new();
        set(&mut d, "items.2.name", json!("c")).unwrap();
        assert_eq!(Value::Object(d), json!({"items": [{}, {}, {"name": "c"}]}));
    }

    #[test]
    fn test_set_through_null_placeholder() {
        let mut d = Map::new();
        set(&mut d, "items.1", json!("x")).unwrap();
        set(&mut d, "items.0.name", json!("y")).unwrap();
        assert_eq!(Value::Object(d), json!({"items": [{"name": "y"}, "x"]}));
    }

    #[test]
    fn test_set_overwrites() {
        let mut d = doc(json!({"a": {"b": 1}, "items": [1, 2]}));
        set(&mut d, "a.b", json!(2)).unwrap();
        set(&mut d, "items.1", json!(9)).unwrap();
        assert_eq!(Value::Object(d), json!({"a": {"b": 2}, "items": [1, 9]}));
    }

    #[test]
    fn test_set_through_scalar_fails() {
        let mut d = doc(json!({"a": 1, "items": ["x"]}));
        assert!(matches!(
            set(&mut d, "a.b", json!(1)),
            Err(PathError::InvalidPath { .. })
        ));
        assert!(matches!(
            set(&mut d, "a.0", json!(1)),
            Err(PathError::InvalidPath { .. })
        ));
        assert!(matches!(
            set(&mut d, "items.0.name", json!(1)),
            Err(PathError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_set_index_limit() {
        let resolver = PathResolver::new(ResolveOptions::new().with_max_index(10));
        let mut d = Map::new();
        resolver.set(&mut d, "items.10", json!(1)).unwrap();
        let err = resolver.set(&mut d, "items.11", json!(1)).unwrap_err();
        assert_eq!(
            err,
            PathError::invalid_path("items.11", "index 11 exceeds the limit of 10")
        );
    }

    #[test]
    fn test_index_limit_bounds_set_only() {
        let mut elements = vec![Value::Null; 70_000];
        elements[69_999] = json!("last");
        let mut d = Map::new();
        d.insert("a".to_string(), Value::Array(elements));

        assert_eq!(get(&d, "a.69999").unwrap(), Some(&json!("last")));
        assert_eq!(delete(&mut d, "a.69999").unwrap(), Some(json!("last")));
        assert_eq!(get(&d, "a.69999").unwrap(), None);
        assert_eq!(delete(&mut d, "a.99999").unwrap(), None);
        assert!(matches!(
            set(&mut d, "a.70000", json!(1)),
            Err(PathError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_set_index_overflow_is_invalid() {
        let resolver = PathResolver::new(ResolveOptions::new().with_max_index(usize::MAX));
        let mut d = Map::new();
        // Saturates to usize::MAX, which has no padded length
        let huge = "a.99999999999999999999999";
        let nested = format!("{huge}.b");
        assert_eq!(
            resolver.set(&mut d, &nested, json!(1)),
            Err(PathError::invalid_path(&nested, "index out of range"))
        );
        assert_eq!(
            resolver.set(&mut d, huge, json!(1)),
            Err(PathError::invalid_path(huge, "index out of range"))
        );
        assert!(d.is_empty());
    }

    #[test]
    fn test_delete_key_returns_value() {
        let mut d = doc(json!({"a": 1, "b": 2}));
        assert_eq!(delete(&mut d, "a").unwrap(), Some(json!(1)));
        assert_eq!(Value::Object(d), json!({"b": 2}));
    }

    #[test]
    fn test_delete_prunes_one_level() {
        let mut d = doc(json!({"a": {"b": {"c": 1}}}));
        delete(&mut d, "a.b.c").unwrap();
        // `b` emptied and is removed from `a`; `a` stays even though it is now empty
        assert_eq!(Value::Object(d), json!({"a": {}}));
    }

    #[test]
    fn test_delete_root_key_leaves_empty_root() {
        let mut d = doc(json!({"a": 1}));
        delete(&mut d, "a").unwrap();
        assert!(d.is_empty());
    }

    #[test]
    fn test_delete_element_compacts() {
        let mut d = doc(json!({"a": [0, 1, 2]}));
        assert_eq!(delete(&mut d, "a.1").unwrap(), Some(json!(1)));
        assert_eq!(Value::Object(d), json!({"a": [0, 2]}));
    }

    #[test]
    fn test_delete_last_element_prunes_array() {
        let mut d = doc(json!({"a": [0], "b": true}));
        delete(&mut d, "a.0").unwrap();
        assert_eq!(Value::Object(d), json!({"b": true}));
    }

    #[test]
    fn test_delete_emptied_element_keeps_populated_array() {
        let mut d = doc(json!({"items": [{"name": "A"}, {"name": "B"}]}));
        delete(&mut d, "items.0.name").unwrap();
        assert_eq!(Value::Object(d), json!({"items": [{}, {"name": "B"}]}));
    }

    #[test]
    fn test_delete_emptied_sole_element_prunes_array() {
        let mut d = doc(json!({"items": [{"name": "A"}], "id": 1}));
        delete(&mut d, "items.0.name").unwrap();
        assert_eq!(Value::Object(d), json!({"id": 1}));
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut d = doc(json!({"a": {"b": 1}, "items": [1]}));
        let before = d.clone();
        assert_eq!(delete(&mut d, "a.x").unwrap(), None);
        assert_eq!(delete(&mut d, "x.y.z").unwrap(), None);
        assert_eq!(delete(&mut d, "items.4").unwrap(), None);
        assert_eq!(delete(&mut d, "gone.0.b").unwrap(), None);
        assert_eq!(d, before);
    }

    #[test]
    fn test_delete_through_scalar_fails() {
        let mut d = doc(json!({"a": 1}));
        assert!(matches!(
            delete(&mut d, "a.b"),
            Err(PathError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_resolve_dispatch() {
        let mut d = json!({});
        assert_eq!(
            resolve(&mut d, "a.b", Operation::Set(json!("v"))).unwrap(),
            None
        );
        assert_eq!(
            resolve(&mut d, "a.b", Operation::Get).unwrap(),
            Some(json!("v"))
        );
        assert_eq!(
            resolve(&mut d, "a.b", Operation::Delete).unwrap(),
            Some(json!("v"))
        );
        assert_eq!(d, json!({}));
    }

    #[test]
    fn test_resolve_rejects_non_mapping_root() {
        let mut d = json!([1, 2]);
        assert_eq!(
            resolve(&mut d, "0", Operation::Get),
            Err(PathError::invalid_path("0", "document root is not a mapping"))
        );
    }

    #[test]
    fn test_empty_path_is_invalid() {
        let mut d = Map::new();
        assert!(matches!(
            set(&mut d, "", json!(1)),
            Err(PathError::InvalidPath { .. })
        ));
    }
}
