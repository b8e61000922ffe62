// src/graph/attrs.rs

//! String-keyed attribute storage shared by tasks, edges and the graph
//! itself.
//!
//! Attribute values are plain strings as written in the source. The one key
//! the engine interprets is `Weight`; the typed accessors parse and format
//! it on access so the map stays a uniform string-to-string store.

use std::collections::HashMap;

const WEIGHT_KEY: &str = "Weight";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttrMap {
    entries: HashMap<String, String>,
}

impl AttrMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Insert or overwrite one attribute.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Fold `other` into this map, its values winning on key collision.
    pub fn merge(&mut self, other: AttrMap) {
        for (key, value) in other.entries {
            self.entries.insert(key, value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// The `Weight` attribute as an integer cost. Absent or non-numeric
    /// values read as 0.
    pub fn weight(&self) -> i64 {
        self.get(WEIGHT_KEY)
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn set_weight(&mut self, weight: i64) {
        self.set(WEIGHT_KEY, weight.to_string());
    }
}
