//! Locale dictionary loading and key flattening.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// The set of dotted keys defined by one locale dictionary.
///
/// Built once by recursively flattening the nested locale JSON; immutable
/// afterwards. A nested object contributes its own dotted path and recurses
/// into its children. Arrays, null and scalars are leaves: their contents
/// never produce keys.
#[derive(Debug, Default, Clone)]
pub struct LocaleKeySet {
    keys: BTreeSet<String>,
}

impl LocaleKeySet {
    /// Load and flatten a locale file. Missing or invalid files are fatal to
    /// the run; the error carries the offending path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read i18n file: {}", path.display()))?;
        let json: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse i18n file: {}", path.display()))?;
        Ok(Self::from_value(&json))
    }

    pub fn from_value(value: &Value) -> Self {
        let mut keys = BTreeSet::new();
        if let Value::Object(map) = value {
            flatten_object(map, "", &mut keys);
        }
        Self { keys }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

fn flatten_object(map: &serde_json::Map<String, Value>, prefix: &str, keys: &mut BTreeSet<String>) {
    for (key, value) in map {
        let dotted = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        keys.insert(dotted.clone());

        if let Value::Object(child) = value {
            flatten_object(child, &dotted, keys);
        }
    }
}
