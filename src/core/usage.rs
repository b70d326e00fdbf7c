//! Usage accumulation for one extraction run.
//!
//! Both aggregates here are plain values owned by a single run and threaded
//! explicitly through the traversal; nothing is shared across runs.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use crate::core::locale::LocaleKeySet;

/// Files already visited during one run.
///
/// Guards the recursive import walk against cycles and keeps attribution to
/// the first visit when a file is reachable through several import paths.
pub type ScannedFileSet = HashSet<PathBuf>;

/// Where one locale key is referenced.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UsageEntry {
    /// Absolute paths of the source files that referenced the key.
    pub pages: BTreeSet<PathBuf>,
    /// Routes of the entry pages the references were reached from.
    pub routes: BTreeSet<String>,
}

/// Mapping from locale key to its recorded usages.
///
/// Entries are created lazily on first reference and never removed. Keys not
/// present in the locale key set are discarded on record: the tool audits
/// locale coverage, not free-text extraction.
#[derive(Debug, Default)]
pub struct UsageMap {
    entries: BTreeMap<String, UsageEntry>,
}

impl UsageMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one reference, gated on the known key set.
    pub fn record(&mut self, known: &LocaleKeySet, key: &str, file: &Path, route: &str) {
        if !known.contains(key) {
            return;
        }
        let entry = self.entries.entry(key.to_string()).or_default();
        entry.pages.insert(file.to_path_buf());
        entry.routes.insert(route.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&UsageEntry> {
        self.entries.get(key)
    }

    /// Number of distinct keys with at least one recorded usage.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &UsageEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn key_set() -> LocaleKeySet {
        LocaleKeySet::from_value(&json!({"a": {"b": "hello"}, "c": "world"}))
    }

    #[test]
    fn test_record_known_key() {
        let known = key_set();
        let mut usage = UsageMap::new();
        usage.record(&known, "a.b", Path::new("/p/x.vue"), "/x");

        let entry = usage.get("a.b").unwrap();
        assert!(entry.pages.contains(Path::new("/p/x.vue")));
        assert!(entry.routes.contains("/x"));
    }

    #[test]
    fn test_unknown_key_is_discarded() {
        let known = key_set();
        let mut usage = UsageMap::new();
        usage.record(&known, "not.a.key", Path::new("/p/x.vue"), "/x");
        assert!(usage.is_empty());
    }

    #[test]
    fn test_repeated_records_deduplicate() {
        let known = key_set();
        let mut usage = UsageMap::new();
        usage.record(&known, "c", Path::new("/p/x.vue"), "/x");
        usage.record(&known, "c", Path::new("/p/x.vue"), "/x");
        usage.record(&known, "c", Path::new("/p/y.vue"), "/y");

        let entry = usage.get("c").unwrap();
        assert_eq!(entry.pages.len(), 2);
        assert_eq!(entry.routes.len(), 2);
        assert_eq!(usage.len(), 1);
    }

    #[test]
    fn test_iter_is_key_ordered() {
        let known = key_set();
        let mut usage = UsageMap::new();
        usage.record(&known, "c", Path::new("/p/x.vue"), "/x");
        usage.record(&known, "a.b", Path::new("/p/x.vue"), "/x");

        let keys: Vec<&str> = usage.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["a.b", "c"]);
    }
}
