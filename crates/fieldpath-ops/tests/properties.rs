// SPDX-License-Identifier: MIT OR Apache-2.0
//! Property tests for path resolution.

use fieldpath_core::wildcard::{Indices, concretize, templatize};
use fieldpath_ops::{OrderedBatchRemover, PathResolver, ResolveOptions};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

/// Keys that never look like indices or wildcards
fn key() -> impl Strategy<Value = String> {
    "[a-z][a-z_]{0,6}"
}

/// A concrete path of 1-4 steps, each a key optionally followed by a small index
fn concrete_path() -> impl Strategy<Value = String> {
    prop::collection::vec((key(), prop::option::of(0usize..6)), 1..5).prop_map(|steps| {
        steps
            .into_iter()
            .map(|(key, index)| match index {
                Some(index) => format!("{key}.{index}"),
                None => key,
            })
            .collect::<Vec<_>>()
            .join(".")
    })
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::String),
    ]
}

proptest! {
    #[test]
    fn set_then_get_round_trips(path in concrete_path(), value in scalar()) {
        let resolver = PathResolver::default();
        let mut document = Map::new();
        resolver.set(&mut document, &path, value.clone()).unwrap();
        prop_assert_eq!(resolver.get(&document, &path).unwrap(), Some(&value));
    }

    #[test]
    fn set_then_delete_then_get_is_absent(path in concrete_path(), value in scalar()) {
        let resolver = PathResolver::default();
        let mut document = Map::new();
        resolver.set(&mut document, &path, value.clone()).unwrap();
        prop_assert_eq!(resolver.delete(&mut document, &path).unwrap(), Some(value));
        prop_assert_eq!(resolver.get(&document, &path).unwrap(), None);
        // A second delete finds nothing and fails on nothing
        prop_assert_eq!(resolver.delete(&mut document, &path).unwrap(), None);
    }

    #[test]
    fn get_never_mutates(path in concrete_path(), value in scalar(), probe in concrete_path()) {
        let resolver = PathResolver::default();
        let mut document = Map::new();
        resolver.set(&mut document, &path, value).unwrap();
        let before = document.clone();
        let _ = resolver.get(&document, &probe);
        prop_assert_eq!(document, before);
    }

    #[test]
    fn batch_removal_keeps_survivors_in_order(
        len in 1usize..12,
        picks in prop::collection::btree_set(0usize..12, 0..12),
    ) {
        let picks: Vec<usize> = picks.into_iter().filter(|&i| i < len).collect();
        let elements: Vec<Value> = (0..len).map(|i| json!(i)).collect();
        let mut document = Map::new();
        document.insert("a".to_string(), Value::Array(elements));

        let paths: Vec<String> = picks.iter().map(|i| format!("a.{i}")).collect();
        let unset = OrderedBatchRemover::new(PathResolver::default())
            .remove_all(&mut document, &paths)
            .unwrap();

        let survivors: Vec<Value> = (0..len)
            .filter(|i| !picks.contains(i))
            .map(|i| json!(i))
            .collect();
        if survivors.is_empty() {
            prop_assert!(document.get("a").is_none());
            prop_assert!(unset.contains("a"));
        } else {
            prop_assert_eq!(document.get("a"), Some(&Value::Array(survivors)));
            prop_assert!(unset.is_empty());
        }
    }

    #[test]
    fn templatize_inverts_concretize(path in concrete_path(), index in 0usize..100) {
        let template = templatize(&path);
        let concrete = concretize(&template, Some(&Indices::Single(index))).unwrap();
        prop_assert_eq!(templatize(&concrete), template);
    }

    #[test]
    fn index_limit_is_enforced(index in 0usize..200, limit in 0usize..100) {
        let resolver = PathResolver::new(ResolveOptions::new().with_max_index(limit));
        let mut document = Map::new();
        let result = resolver.set(&mut document, &format!("a.{index}"), json!(1));
        prop_assert_eq!(result.is_ok(), index <= limit);
    }
}
