#![no_main]
// SPDX-License-Identifier: MIT OR Apache-2.0
//! libFuzzer target for path resolution.
//!
//! Tests:
//! - get/set/delete never panic on arbitrary paths and documents
//! - set followed by get returns the written value
//! - delete of a written value returns it
//! - templatize/concretize agree on arbitrary paths
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_path_resolution

use fieldpath_core::wildcard::{Indices, concretize, has_wildcard, templatize};
use fieldpath_ops::{OrderedBatchRemover, PathResolver, ResolveOptions};
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};

fuzz_target!(|data: &[u8]| {
    // Skip overly large inputs
    if data.len() > 10_000 {
        return;
    }

    let input = match std::str::from_utf8(data) {
        Ok(s) => s,
        Err(_) => return,
    };

    // First line is the path, the rest is an optional JSON document
    let (path, rest) = input.split_once('\n').unwrap_or((input, ""));
    let mut document = match serde_json::from_str::<Value>(rest) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };

    // Keep padding allocations small
    let resolver = PathResolver::new(ResolveOptions::new().with_max_index(1024));

    // === Test: get never panics and never mutates ===
    let before = document.clone();
    let _ = resolver.get(&document, path);
    assert_eq!(document, before, "get mutated the document");

    // === Contract: set then get round-trips ===
    let marker = Value::String("fuzz-marker".to_string());
    if resolver.set(&mut document, path, marker.clone()).is_ok() {
        let read = resolver.get(&document, path);
        assert_eq!(read, Ok(Some(&marker)), "set/get mismatch for {path:?}");

        // === Contract: delete returns the written value ===
        let removed = resolver.delete(&mut document, path);
        assert_eq!(removed, Ok(Some(marker)), "delete mismatch for {path:?}");
    }

    // === Test: batch removal never panics ===
    let paths: Vec<&str> = path.split(',').collect();
    let _ = OrderedBatchRemover::new(resolver).remove_all(&mut document, &paths);

    // === Contract: a concretized template templatizes back to itself ===
    let template = templatize(path);
    if let Ok(concrete) = concretize(&template, Some(&Indices::Single(0))) {
        assert!(!has_wildcard(&concrete));
        assert_eq!(templatize(&concrete), template);
    }
});
