//! Loading per-language catalog files from a messages directory.
//!
//! Every `*.json` file contributes one locale named after its file stem
//! (`en.json` → `en`, `zh-CN.json` → `zh-CN`). A file that fails to parse
//! becomes a warning instead of aborting the scan, so one broken locale does
//! not block editing the others.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;

/// A scanned messages directory: `(locale, tree)` pairs sorted by locale.
#[derive(Debug, Default)]
pub struct LoadedCatalog {
    pub locales: Vec<(String, Value)>,
    pub warnings: Vec<String>,
}

/// Locale code from a file path, taken from the file stem.
pub fn locale_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
}

/// Read every locale JSON file directly under `dir`.
pub fn load_catalog_dir(dir: &Path) -> Result<LoadedCatalog> {
    if !dir.exists() {
        bail!("Messages directory '{}' does not exist", dir.display());
    }
    if !dir.is_dir() {
        bail!("'{}' is not a directory", dir.display());
    }

    let mut catalog = LoadedCatalog::default();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let Some(locale) = locale_from_path(&path) else {
            continue;
        };
        match load_locale_file(&path) {
            Ok(tree) => catalog.locales.push((locale, tree)),
            Err(err) => catalog
                .warnings
                .push(format!("Skipped {}: {:#}", path.display(), err)),
        }
    }

    if catalog.locales.is_empty() && catalog.warnings.is_empty() {
        bail!("No locale JSON files found in '{}'", dir.display());
    }

    catalog.locales.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(catalog)
}

fn load_locale_file(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file: {}", path.display()))?;
    if !value.is_object() {
        bail!("Root of locale file must be an object");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_locale_from_path() {
        assert_eq!(locale_from_path(Path::new("en.json")), Some("en".into()));
        assert_eq!(
            locale_from_path(Path::new("/messages/zh-CN.json")),
            Some("zh-CN".into())
        );
    }

    #[test]
    fn test_load_catalog_dir() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("en.json"), r#"{"ok": "OK"}"#).unwrap();
        fs::write(dir.path().join("fr.json"), r#"{"ok": "Oui"}"#).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let catalog = load_catalog_dir(dir.path()).unwrap();
        let locales: Vec<&str> = catalog
            .locales
            .iter()
            .map(|(locale, _)| locale.as_str())
            .collect();
        assert_eq!(locales, vec!["en", "fr"]);
        assert!(catalog.warnings.is_empty());
    }

    #[test]
    fn test_broken_locale_becomes_warning() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("en.json"), r#"{"ok": "OK"}"#).unwrap();
        fs::write(dir.path().join("de.json"), "{ not json").unwrap();
        fs::write(dir.path().join("nl.json"), r#"["array root"]"#).unwrap();

        let catalog = load_catalog_dir(dir.path()).unwrap();
        assert_eq!(catalog.locales.len(), 1);
        assert_eq!(catalog.warnings.len(), 2);
        assert!(catalog.warnings.iter().any(|w| w.contains("de.json")));
    }

    #[test]
    fn test_missing_dir_fails() {
        let err = load_catalog_dir(Path::new("/nonexistent/messages")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_empty_dir_fails() {
        let dir = tempdir().unwrap();
        assert!(load_catalog_dir(dir.path()).is_err());
    }
}
