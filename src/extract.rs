//! Extraction: nested per-language trees → one unified flat row list.
//!
//! Every language's tree is walked once. A path that nests in *any* language
//! becomes a folder row; a string at that same path in another language loses
//! (folder wins) and the conflict is reported as a warning instead of being
//! dropped silently. A language that simply lacks a key leaves that row's
//! value empty, which is how missing translations surface in the table.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::key::build_key;
use crate::row::{Row, empty_values};

/// Result of extracting rows from a set of locale trees.
#[derive(Debug, Default)]
pub struct ExtractOutcome {
    /// Rows in ascending lexicographic key order.
    pub rows: Vec<Row>,
    /// Language codes in input order.
    pub languages: Vec<String>,
    pub warnings: Vec<String>,
}

/// Build the unified row list from `(language, tree)` pairs.
pub fn extract_rows(locales: &[(String, Value)]) -> ExtractOutcome {
    let languages: Vec<String> = locales.iter().map(|(lang, _)| lang.clone()).collect();
    let mut rows = BTreeMap::new();
    let mut warnings = Vec::new();

    for (language, tree) in locales {
        match tree {
            Value::Object(object) => {
                walk(object, "", language, &languages, &mut rows, &mut warnings);
            }
            _ => warnings.push(format!("{language}: root is not an object, ignored")),
        }
    }

    ExtractOutcome {
        rows: rows.into_values().collect(),
        languages,
        warnings,
    }
}

fn walk(
    object: &Map<String, Value>,
    prefix: &str,
    language: &str,
    languages: &[String],
    rows: &mut BTreeMap<String, Row>,
    warnings: &mut Vec<String>,
) {
    for (segment, value) in object {
        let full_key = build_key(prefix, segment);
        match value {
            Value::Object(child) => {
                ensure_folder(&full_key, languages, rows, warnings);
                walk(child, &full_key, language, languages, rows, warnings);
            }
            leaf => set_leaf(&full_key, language, leaf, languages, rows, warnings),
        }
    }
}

/// Make sure a folder row exists at `key`, flipping a leaf if necessary.
fn ensure_folder(
    key: &str,
    languages: &[String],
    rows: &mut BTreeMap<String, Row>,
    warnings: &mut Vec<String>,
) {
    match rows.get_mut(key) {
        Some(row) if row.is_folder => {}
        Some(row) => {
            warnings.push(format!(
                "'{key}' nests keys in one language but holds plain values in another; \
                 folder wins, values dropped"
            ));
            row.is_folder = true;
            row.values = empty_values(languages);
        }
        None => {
            rows.insert(key.to_string(), Row::folder(key, languages));
        }
    }
}

fn set_leaf(
    key: &str,
    language: &str,
    value: &Value,
    languages: &[String],
    rows: &mut BTreeMap<String, Row>,
    warnings: &mut Vec<String>,
) {
    let text = leaf_text(value);
    match rows.get_mut(key) {
        Some(row) if row.is_folder => warnings.push(format!(
            "{language}: '{key}' is a folder in another language; value {text:?} dropped"
        )),
        Some(row) => {
            row.values.insert(language.to_string(), text);
        }
        None => {
            let mut row = Row::leaf(key, languages);
            row.values.insert(language.to_string(), text);
            rows.insert(key.to_string(), row);
        }
    }
}

/// Leaf values are strings; anything else (numbers, bools, null, arrays) is
/// kept as its opaque JSON rendering.
fn leaf_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn locales(pairs: &[(&str, Value)]) -> Vec<(String, Value)> {
        pairs
            .iter()
            .map(|(lang, tree)| (lang.to_string(), tree.clone()))
            .collect()
    }

    #[test]
    fn test_extract_two_languages() {
        let outcome = extract_rows(&locales(&[
            ("en", json!({"common": {"ok": "OK"}})),
            ("fr", json!({"common": {"ok": "OK"}})),
        ]));

        assert_eq!(outcome.languages, vec!["en", "fr"]);
        assert_eq!(outcome.rows.len(), 2);

        let folder = &outcome.rows[0];
        assert_eq!(folder.key, "common");
        assert_eq!(folder.depth, 0);
        assert!(folder.is_folder);

        let leaf = &outcome.rows[1];
        assert_eq!(leaf.key, "common.ok");
        assert_eq!(leaf.depth, 1);
        assert!(!leaf.is_folder);
        assert_eq!(leaf.value("en"), "OK");
        assert_eq!(leaf.value("fr"), "OK");
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_missing_translation_left_empty() {
        let outcome = extract_rows(&locales(&[
            ("en", json!({"dashboard": {"stats": "Stats"}})),
            ("de", json!({})),
        ]));

        let leaf = outcome
            .rows
            .iter()
            .find(|row| row.key == "dashboard.stats")
            .unwrap();
        assert_eq!(leaf.value("en"), "Stats");
        assert_eq!(leaf.value("de"), "");
        assert!(leaf.is_missing("de"));
        assert!(!leaf.is_missing("en"));
    }

    #[test]
    fn test_rows_sorted_by_key() {
        let outcome = extract_rows(&locales(&[(
            "en",
            json!({"zebra": "z", "apple": {"pie": "p"}, "mango": "m"}),
        )]));
        let keys: Vec<&str> = outcome.rows.iter().map(|row| row.key.as_str()).collect();
        assert_eq!(keys, vec!["apple", "apple.pie", "mango", "zebra"]);
    }

    #[test]
    fn test_folder_wins_when_folder_seen_first() {
        let outcome = extract_rows(&locales(&[
            ("en", json!({"common": {"ok": "OK"}})),
            ("fr", json!({"common": "oops"})),
        ]));

        let folder = outcome.rows.iter().find(|row| row.key == "common").unwrap();
        assert!(folder.is_folder);
        assert_eq!(folder.value("fr"), "");
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("common"));
    }

    #[test]
    fn test_folder_wins_when_leaf_seen_first() {
        let outcome = extract_rows(&locales(&[
            ("en", json!({"common": "oops"})),
            ("fr", json!({"common": {"ok": "Oui"}})),
        ]));

        let folder = outcome.rows.iter().find(|row| row.key == "common").unwrap();
        assert!(folder.is_folder, "string is flipped once any language nests");
        assert_eq!(folder.value("en"), "", "flipped folder drops its values");
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn test_non_string_leaves_stringified() {
        let outcome = extract_rows(&locales(&[(
            "en",
            json!({"count": 3, "flag": true, "none": null, "list": [1, 2]}),
        )]));

        let value_of = |key: &str| {
            outcome
                .rows
                .iter()
                .find(|row| row.key == key)
                .unwrap()
                .value("en")
                .to_string()
        };
        assert_eq!(value_of("count"), "3");
        assert_eq!(value_of("flag"), "true");
        assert_eq!(value_of("none"), "null");
        assert_eq!(value_of("list"), "[1,2]");
    }

    #[test]
    fn test_non_object_root_warns() {
        let outcome = extract_rows(&locales(&[("en", json!("not a tree"))]));
        assert!(outcome.rows.is_empty());
        assert_eq!(outcome.warnings.len(), 1);
    }
}
