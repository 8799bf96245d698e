//! The flat row model: one [`Row`] per catalog key, across all languages.

use std::collections::BTreeMap;

use crate::key::{build_key, depth, key_name, parent_path};

/// Language code → translation value. Folders keep every entry empty.
pub type ValueMap = BTreeMap<String, String>;

/// One entry of the flat table projection.
///
/// `name`, `parent_path` and `depth` are always derived from `key` (via
/// [`Row::rekey`]); they are cached for display, never independent ground
/// truth. A folder row groups children and carries no translation content; a
/// leaf row holds one value per known language, `""` meaning "missing".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub key: String,
    pub name: String,
    pub parent_path: String,
    pub depth: usize,
    pub is_folder: bool,
    pub values: ValueMap,
}

impl Row {
    pub fn folder(key: &str, languages: &[String]) -> Self {
        Self::new(key, true, languages)
    }

    pub fn leaf(key: &str, languages: &[String]) -> Self {
        Self::new(key, false, languages)
    }

    fn new(key: &str, is_folder: bool, languages: &[String]) -> Self {
        Self {
            key: key.to_string(),
            name: key_name(key).to_string(),
            parent_path: parent_path(key).to_string(),
            depth: depth(key),
            is_folder,
            values: empty_values(languages),
        }
    }

    /// Replace the key and recompute every derived field.
    pub fn rekey(&mut self, new_key: String) {
        self.name = key_name(&new_key).to_string();
        self.parent_path = parent_path(&new_key).to_string();
        self.depth = depth(&new_key);
        self.key = new_key;
    }

    /// Rename the last segment in place, keeping the parent path.
    pub fn rename(&mut self, new_name: &str) {
        self.key = build_key(&self.parent_path, new_name);
        self.name = new_name.to_string();
        self.depth = depth(&self.key);
    }

    pub fn value(&self, language: &str) -> &str {
        self.values.get(language).map(String::as_str).unwrap_or("")
    }

    /// A leaf with an empty value for a known language lacks a translation.
    pub fn is_missing(&self, language: &str) -> bool {
        !self.is_folder && self.value(language).is_empty()
    }

    /// True when `other_key` names this row or anything nested under it.
    pub fn is_within(&self, other_key: &str) -> bool {
        !other_key.is_empty()
            && (self.key == other_key || self.key.starts_with(&format!("{other_key}.")))
    }
}

/// One empty value slot per language.
pub fn empty_values(languages: &[String]) -> ValueMap {
    languages
        .iter()
        .map(|lang| (lang.clone(), String::new()))
        .collect()
}
