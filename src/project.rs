//! Projection: flat row list → one nested locale tree per language.
//!
//! The inverse of extraction. Only leaf rows are written; folders are implied
//! by the keys of their leaves, so a folder that lost all its leaves is
//! pruned from the output. Conflicting leaf keys (one key a prefix of
//! another) are resolved in row order with a warning, the later nested
//! mapping replacing the earlier plain value.

use serde_json::{Map, Value};

use crate::row::Row;

/// Result of projecting one language out of the row list.
#[derive(Debug, Default)]
pub struct ProjectOutcome {
    pub tree: Map<String, Value>,
    pub warnings: Vec<String>,
}

/// Build the nested tree for `language`. Rows with empty keys (still being
/// typed) are skipped; a missing value serializes as `""`.
pub fn project_rows(rows: &[Row], language: &str) -> ProjectOutcome {
    let mut outcome = ProjectOutcome::default();

    for row in rows {
        if row.is_folder {
            continue;
        }
        let key = row.key.trim();
        if key.is_empty() {
            continue;
        }
        let segments: Vec<&str> = key.split('.').collect();
        insert_nested(
            &mut outcome.tree,
            &segments,
            key,
            Value::String(row.value(language).to_string()),
            &mut outcome.warnings,
        );
    }

    outcome
}

/// Insert a value at a nested path, creating intermediate objects as needed.
fn insert_nested(
    node: &mut Map<String, Value>,
    path: &[&str],
    full_key: &str,
    value: Value,
    warnings: &mut Vec<String>,
) {
    let segment = path[0];

    if path.len() == 1 {
        if matches!(node.get(segment), Some(Value::Object(_))) {
            warnings.push(format!("'{full_key}' overwrites keys nested under it"));
        }
        node.insert(segment.to_string(), value);
        return;
    }

    let child = node
        .entry(segment.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !child.is_object() {
        warnings.push(format!(
            "'{full_key}': segment '{segment}' held a plain value, replaced with a nested mapping"
        ));
        *child = Value::Object(Map::new());
    }
    if let Value::Object(inner) = child {
        insert_nested(inner, &path[1..], full_key, value, warnings);
    }
}
