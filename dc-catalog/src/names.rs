// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Case-insensitive name map used for schema and table sets

use std::collections::BTreeMap;

/// Map keyed by ASCII-case-folded names. Values keep the spelling they were inserted with.
#[derive(Debug, Clone)]
pub struct CaseInsensitiveMap<V> {
    entries: BTreeMap<String, V>,
}

impl<V> CaseInsensitiveMap<V> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    fn fold(name: &str) -> String {
        name.to_ascii_lowercase()
    }

    /// Insert unless a differently-cased spelling is already present.
    /// Returns false when the name was taken.
    pub fn insert(&mut self, name: &str, value: V) -> bool {
        let key = Self::fold(name);
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, value);
        true
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries.get(&Self::fold(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&Self::fold(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sole value when the map holds exactly one entry
    pub fn only(&self) -> Option<&V> {
        if self.entries.len() == 1 {
            self.entries.values().next()
        } else {
            None
        }
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }
}

impl<V> Default for CaseInsensitiveMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case() {
        let mut map = CaseInsensitiveMap::new();
        assert!(map.insert("Sales", 1));
        assert_eq!(map.get("sales"), Some(&1));
        assert_eq!(map.get("SALES"), Some(&1));
        assert!(map.contains("sAlEs"));
        assert!(map.get("sale").is_none());
    }

    #[test]
    fn test_first_spelling_wins() {
        let mut map = CaseInsensitiveMap::new();
        assert!(map.insert("orders", "first"));
        assert!(!map.insert("ORDERS", "second"));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("Orders"), Some(&"first"));
    }

    #[test]
    fn test_only() {
        let mut map = CaseInsensitiveMap::new();
        assert!(map.only().is_none());
        map.insert("a", 1);
        assert_eq!(map.only(), Some(&1));
        map.insert("b", 2);
        assert!(map.only().is_none());
    }
}
