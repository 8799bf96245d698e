//! Helpers for dot-delimited translation key paths.
//!
//! A key like `"common.buttons.ok"` names one entry in the catalog namespace.
//! Its depth is 2, its parent path is `"common.buttons"` and its name is
//! `"ok"`. All row fields derived from a key are recomputed through these
//! functions, never stored independently.

/// Nesting level of a key: number of dots.
///
/// ```
/// use keyloom::key::depth;
///
/// assert_eq!(depth("common.ok"), 1);
/// assert_eq!(depth("dashboard"), 0);
/// assert_eq!(depth(""), 0);
/// ```
pub fn depth(key: &str) -> usize {
    if key.is_empty() {
        return 0;
    }
    key.matches('.').count()
}

/// Everything before the last segment, or `""` for a root-level key.
pub fn parent_path(key: &str) -> &str {
    match key.rfind('.') {
        Some(pos) => &key[..pos],
        None => "",
    }
}

/// The last segment of a key, or `""` for the empty key.
pub fn key_name(key: &str) -> &str {
    match key.rfind('.') {
        Some(pos) => &key[pos + 1..],
        None => key,
    }
}

/// Rebuild a full key from a parent path and a name.
///
/// Inverse of [`parent_path`] + [`key_name`]: for any well-formed non-empty
/// key `k`, `build_key(parent_path(k), key_name(k)) == k`.
pub fn build_key(parent_path: &str, name: &str) -> String {
    if parent_path.is_empty() {
        name.to_string()
    } else {
        format!("{parent_path}.{name}")
    }
}
