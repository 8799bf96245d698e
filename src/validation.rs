//! Advisory validation of key syntax and duplicate keys.
//!
//! Validation never gates mutation or export: the store accepts any key and
//! these checks only produce findings for display. A row being typed may sit
//! in an invalid state (empty name, duplicate) until the user finishes.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::row::Row;

/// Characters allowed in a single key segment: letters, digits, `_`, `-`.
static KEY_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("valid regex"));

/// Characters allowed in a full key; dots separate segments.
static FULL_KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._-]+$").expect("valid regex"));

/// Why a key is flagged, in checking priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyError {
    EmptyName,
    ContainsDot,
    ContainsWhitespace,
    InvalidCharacters,
    DuplicateKey,
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyError::EmptyName => write!(f, "Key name cannot be empty"),
            KeyError::ContainsDot => write!(f, "Key name cannot contain dots"),
            KeyError::ContainsWhitespace => write!(f, "Key name cannot contain spaces"),
            KeyError::InvalidCharacters => {
                write!(f, "Key name can only contain letters, numbers, _ and -")
            }
            KeyError::DuplicateKey => write!(f, "Duplicate key exists"),
        }
    }
}

/// Check a single segment (the editable `name` of a row).
pub fn is_valid_key_name(name: &str) -> bool {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.contains('.') {
        return false;
    }
    KEY_NAME_PATTERN.is_match(trimmed)
}

/// Check a full dot-delimited key.
pub fn is_valid_key(key: &str) -> bool {
    let trimmed = key.trim();
    if trimmed.is_empty()
        || trimmed.contains("..")
        || trimmed.starts_with('.')
        || trimmed.ends_with('.')
    {
        return false;
    }
    FULL_KEY_PATTERN.is_match(trimmed)
}

/// True iff some other row (not at `exclude_index`) holds the same
/// trimmed, non-empty key.
pub fn is_duplicate_key(key: &str, rows: &[Row], exclude_index: usize) -> bool {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return false;
    }
    rows.iter()
        .enumerate()
        .any(|(index, row)| index != exclude_index && row.key == trimmed)
}

/// First syntax problem with a key name, or `None` when valid.
pub fn key_name_error(name: &str) -> Option<KeyError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Some(KeyError::EmptyName);
    }
    if trimmed.contains('.') {
        return Some(KeyError::ContainsDot);
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Some(KeyError::ContainsWhitespace);
    }
    if !KEY_NAME_PATTERN.is_match(trimmed) {
        return Some(KeyError::InvalidCharacters);
    }
    None
}

/// Full advisory check for one row: name syntax first, then duplicates.
pub fn row_error(row: &Row, rows: &[Row], index: usize) -> Option<KeyError> {
    if let Some(error) = key_name_error(&row.name) {
        return Some(error);
    }
    if is_duplicate_key(&row.key, rows, index) {
        return Some(KeyError::DuplicateKey);
    }
    None
}

/// One flagged row, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub row: usize,
    pub key: String,
    pub error: KeyError,
}

/// Pure state → findings pass over the whole row set.
pub fn catalog_findings(rows: &[Row]) -> Vec<Finding> {
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| {
            row_error(row, rows, index).map(|error| Finding {
                row: index,
                key: row.key.clone(),
                error,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_key_names() {
        assert!(is_valid_key_name("ok"));
        assert!(is_valid_key_name("snake_case"));
        assert!(is_valid_key_name("kebab-case"));
        assert!(is_valid_key_name("v2"));
        assert!(is_valid_key_name("  padded  "));
    }

    #[test]
    fn test_invalid_key_names() {
        assert!(!is_valid_key_name(""));
        assert!(!is_valid_key_name("   "));
        assert!(!is_valid_key_name("a.b"));
        assert!(!is_valid_key_name("hello world"));
        assert!(!is_valid_key_name("emoji🔑"));
    }

    #[test]
    fn test_valid_keys() {
        assert!(is_valid_key("common.ok"));
        assert!(is_valid_key("dashboard"));
        assert!(is_valid_key("a.b-c.d_e"));
    }

    #[test]
    fn test_invalid_keys() {
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("common..ok"));
        assert!(!is_valid_key(".common"));
        assert!(!is_valid_key("common."));
        assert!(!is_valid_key("common ok"));
    }

    #[test]
    fn test_key_name_error_priority() {
        assert_eq!(key_name_error(""), Some(KeyError::EmptyName));
        assert_eq!(key_name_error("a.b"), Some(KeyError::ContainsDot));
        assert_eq!(key_name_error("my key"), Some(KeyError::ContainsWhitespace));
        assert_eq!(key_name_error("naïve"), Some(KeyError::InvalidCharacters));
        assert_eq!(key_name_error("ok"), None);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            key_name_error("my key").unwrap().to_string(),
            "Key name cannot contain spaces"
        );
        assert_eq!(
            key_name_error("a.b").unwrap().to_string(),
            "Key name cannot contain dots"
        );
    }

    #[test]
    fn test_duplicate_detection() {
        let langs = vec!["en".to_string()];
        let rows = vec![
            Row::folder("common", &langs),
            Row::leaf("common.ok", &langs),
            Row::leaf("common.ok", &langs),
        ];
        assert!(is_duplicate_key("common.ok", &rows, 1));
        assert!(is_duplicate_key("common.ok", &rows, 2));
        assert!(!is_duplicate_key("common", &rows, 0));
        assert!(!is_duplicate_key("", &rows, 0));
    }

    #[test]
    fn test_row_error_reports_rename_collision() {
        let langs = vec!["en".to_string()];
        let mut rows = vec![
            Row::folder("common", &langs),
            Row::leaf("common.okay", &langs),
            Row::leaf("common.ok", &langs),
        ];
        rows[2].rename("okay");
        assert_eq!(row_error(&rows[2], &rows, 2), Some(KeyError::DuplicateKey));
    }

    #[test]
    fn test_catalog_findings() {
        let langs = vec!["en".to_string()];
        let mut rows = vec![
            Row::folder("common", &langs),
            Row::leaf("common.ok", &langs),
            Row::leaf("", &langs),
        ];
        rows[2].rename("bad name");
        let findings = catalog_findings(&rows);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].row, 2);
        assert_eq!(findings[0].error, KeyError::ContainsWhitespace);
    }
}
