//! Key-constant snippet generation for a folder's descendant leaves.
//!
//! Produces the block frontend code pastes next to a `useTranslation` call:
//! every leaf key under the folder as an upper-snake-case constant, bound to
//! either the full key or the suffix relative to the folder.

use crate::key::key_name;
use crate::row::Row;

/// Full keys of every leaf nested under `folder_key`, in row order.
pub fn descendant_leaf_keys(rows: &[Row], folder_key: &str) -> Vec<String> {
    rows.iter()
        .filter(|row| !row.is_folder && row.key != folder_key && row.is_within(folder_key))
        .map(|row| row.key.clone())
        .collect()
}

/// `statsOverview` → `STATS_OVERVIEW`, `my-key` → `MY_KEY`.
pub fn to_upper_snake_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_lowercase = false;
    for ch in text.chars() {
        if ch == '-' {
            out.push('_');
            prev_lowercase = false;
            continue;
        }
        if prev_lowercase && ch.is_ascii_uppercase() {
            out.push('_');
        }
        prev_lowercase = ch.is_ascii_lowercase();
        out.extend(ch.to_uppercase());
    }
    out
}

/// Render the snippet. With `use_key_prefix` the constants hold key suffixes
/// relative to the folder and a `useTranslation('<folder>')` line is added;
/// otherwise they hold full keys.
pub fn generate_snippet(folder_key: &str, leaf_keys: &[String], use_key_prefix: bool) -> String {
    if leaf_keys.is_empty() {
        return "// No translation keys found".to_string();
    }

    let lines: Vec<String> = leaf_keys
        .iter()
        .map(|full_key| {
            let name = to_upper_snake_case(key_name(full_key));
            let value = if use_key_prefix {
                &full_key[(folder_key.len() + 1).min(full_key.len())..]
            } else {
                full_key.as_str()
            };
            format!("  {name}: '{value}',")
        })
        .collect();

    let keys_block = format!("const keys = {{\n{}\n}};", lines.join("\n"));
    if use_key_prefix {
        format!("const {{ t }} = useTranslation('{folder_key}');\n\n{keys_block}")
    } else {
        keys_block
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::extract::extract_rows;

    #[test]
    fn test_to_upper_snake_case() {
        assert_eq!(to_upper_snake_case("ok"), "OK");
        assert_eq!(to_upper_snake_case("statsOverview"), "STATS_OVERVIEW");
        assert_eq!(to_upper_snake_case("my-key"), "MY_KEY");
        assert_eq!(to_upper_snake_case("already_snake"), "ALREADY_SNAKE");
    }

    fn sample_rows() -> Vec<Row> {
        extract_rows(&[(
            "en".to_string(),
            json!({
                "common": {"ok": "OK", "buttons": {"saveAll": "Save all"}},
                "title": "Hello"
            }),
        )])
        .rows
    }

    #[test]
    fn test_descendant_leaf_keys() {
        let keys = descendant_leaf_keys(&sample_rows(), "common");
        assert_eq!(keys, vec!["common.buttons.saveAll", "common.ok"]);
    }

    #[test]
    fn test_snippet_with_key_prefix() {
        let keys = descendant_leaf_keys(&sample_rows(), "common");
        let snippet = generate_snippet("common", &keys, true);
        assert_eq!(
            snippet,
            "const { t } = useTranslation('common');\n\n\
             const keys = {\n  SAVE_ALL: 'buttons.saveAll',\n  OK: 'ok',\n};"
        );
    }

    #[test]
    fn test_snippet_with_full_keys() {
        let keys = descendant_leaf_keys(&sample_rows(), "common");
        let snippet = generate_snippet("common", &keys, false);
        assert_eq!(
            snippet,
            "const keys = {\n  SAVE_ALL: 'common.buttons.saveAll',\n  OK: 'common.ok',\n};"
        );
    }

    #[test]
    fn test_snippet_empty_folder() {
        let snippet = generate_snippet("ghost", &[], true);
        assert_eq!(snippet, "// No translation keys found");
    }
}
