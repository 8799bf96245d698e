//! Export assembly: project every visible language and hand the documents to
//! a download collaborator.
//!
//! The sink is a trait so the core stays free of delivery mechanics; the CLI
//! plugs in [`DirSink`], tests use [`MemorySink`]. Export is synchronous and
//! all-or-nothing from the store's point of view: the dirty flag clears only
//! after every file was delivered.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::project::project_rows;
use crate::store::RowStore;

/// One serialized per-language document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub language: String,
    pub filename: String,
    /// Pretty-printed JSON, 2-space indent, trailing newline.
    pub contents: String,
}

/// Where exported documents go. Delivery failures abort the export.
pub trait DownloadSink {
    fn deliver(&mut self, file: ExportFile) -> Result<()>;
}

/// Writes `{language}.json` files into a directory.
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }
}

impl DownloadSink for DirSink {
    fn deliver(&mut self, file: ExportFile) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory: {}", self.dir.display()))?;
        let path = self.dir.join(&file.filename);
        fs::write(&path, file.contents)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        Ok(())
    }
}

/// Collects delivered files in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: Vec<ExportFile>,
}

impl DownloadSink for MemorySink {
    fn deliver(&mut self, file: ExportFile) -> Result<()> {
        self.files.push(file);
        Ok(())
    }
}

/// Summary of a finished export.
#[derive(Debug, Default)]
pub struct ExportReport {
    pub languages: Vec<String>,
    pub warnings: Vec<String>,
}

/// Project and deliver one document per language visible at export time.
/// Validation findings never block this; whatever keys exist are serialized.
pub fn export_catalog(store: &mut RowStore, sink: &mut dyn DownloadSink) -> Result<ExportReport> {
    let mut report = ExportReport::default();

    let languages: Vec<String> = store
        .visible_languages()
        .into_iter()
        .map(str::to_string)
        .collect();
    for language in languages {
        let outcome = project_rows(store.rows(), &language);
        report.warnings.extend(outcome.warnings);

        let contents = serde_json::to_string_pretty(&Value::Object(outcome.tree))
            .context("Failed to serialize JSON")?;
        sink.deliver(ExportFile {
            filename: format!("{language}.json"),
            language: language.clone(),
            contents: format!("{contents}\n"),
        })?;
        report.languages.push(language);
    }

    store.clear_dirty();
    Ok(report)
}
