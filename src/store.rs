//! The editing state machine over the flat row list.
//!
//! `RowStore` owns the only materialized structure of the session: the
//! ordered row list plus view state (collapsed folders, search query, visible
//! languages) and the dirty flag. Derived views are recomputed from current
//! state on every call, never cached.
//!
//! Operations address rows by their position in the *currently visible* view;
//! the store resolves that to an underlying index before mutating. Subtree
//! operations (delete, rename, move of a folder) are transactional: every
//! affected descendant's `parent_path`/`key` is rewritten in the same pass so
//! the tree linkage never goes stale. Rows that nonetheless reference a
//! missing parent (possible in loaded data) are tolerated and render as
//! root-adjacent rather than being rejected.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::extract::extract_rows;
use crate::key::build_key;
use crate::row::{Row, empty_values};

/// Result of a relocation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// Destination equals the current parent path.
    Unchanged,
    /// Destination is the source itself, inside its subtree, or unknown.
    Illegal,
}

#[derive(Debug)]
pub struct RowStore {
    rows: Vec<Row>,
    languages: Vec<String>,
    visible_languages: Vec<String>,
    collapsed: BTreeSet<String>,
    search: String,
    dirty: bool,
}

impl RowStore {
    pub fn new(languages: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            rows,
            visible_languages: languages.clone(),
            languages,
            collapsed: BTreeSet::new(),
            search: String::new(),
            dirty: false,
        }
    }

    /// Extract rows from `(language, tree)` pairs and take ownership of the
    /// result. Returns extraction warnings alongside the store.
    pub fn from_locales(locales: &[(String, Value)]) -> (Self, Vec<String>) {
        let outcome = extract_rows(locales);
        (Self::new(outcome.languages, outcome.rows), outcome.warnings)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Known languages currently shown, in catalog order.
    pub fn visible_languages(&self) -> Vec<&str> {
        self.languages
            .iter()
            .filter(|lang| self.visible_languages.contains(lang))
            .map(String::as_str)
            .collect()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Cleared only by a successful export.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub fn search_query(&self) -> &str {
        &self.search
    }

    pub fn is_collapsed(&self, key: &str) -> bool {
        self.collapsed.contains(key)
    }

    /// Every folder row with a non-empty key, in list order. Feeds the move
    /// destination picker.
    pub fn parent_keys(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter(|row| row.is_folder && !row.key.is_empty())
            .map(|row| row.key.clone())
            .collect()
    }

    // ---- derived views -------------------------------------------------

    /// Underlying indices of the rows the table currently shows.
    ///
    /// A non-empty search query matches key or any value, case-insensitive,
    /// and ignores collapse state entirely. Otherwise a row is hidden iff any
    /// ancestor folder is collapsed.
    pub fn visible_indices(&self) -> Vec<usize> {
        let query = self.search.trim().to_lowercase();
        if !query.is_empty() {
            return self
                .rows
                .iter()
                .enumerate()
                .filter(|(_, row)| matches_query(row, &query))
                .map(|(index, _)| index)
                .collect();
        }
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !self.hidden_by_collapse(row))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn visible_rows(&self) -> Vec<&Row> {
        self.visible_indices()
            .into_iter()
            .map(|index| &self.rows[index])
            .collect()
    }

    /// Position of `key` within the visible view.
    pub fn visible_index_of(&self, key: &str) -> Option<usize> {
        self.visible_indices()
            .into_iter()
            .position(|index| self.rows[index].key == key)
    }

    fn hidden_by_collapse(&self, row: &Row) -> bool {
        self.collapsed.iter().any(|key| {
            row.parent_path == *key || row.parent_path.starts_with(&format!("{key}."))
        })
    }

    fn resolve(&self, visible_index: usize) -> Option<usize> {
        self.visible_indices().get(visible_index).copied()
    }

    // ---- mutations -----------------------------------------------------

    /// Append an unnamed root folder. Returns its underlying index.
    pub fn add_root_row(&mut self) -> usize {
        self.rows.push(Row::folder("", &self.languages));
        self.dirty = true;
        self.rows.len() - 1
    }

    /// Insert an unnamed leaf right after the parent at `visible_index`.
    pub fn add_child_leaf(&mut self, visible_index: usize) -> Option<usize> {
        self.insert_child(visible_index, false)
    }

    /// Insert an unnamed sub-folder right after the parent at `visible_index`.
    pub fn add_child_folder(&mut self, visible_index: usize) -> Option<usize> {
        self.insert_child(visible_index, true)
    }

    fn insert_child(&mut self, visible_index: usize, is_folder: bool) -> Option<usize> {
        let parent_index = self.resolve(visible_index)?;
        let (parent_key, parent_depth) = {
            let parent = &self.rows[parent_index];
            (parent.key.clone(), parent.depth)
        };
        let child = Row {
            key: format!("{parent_key}."),
            name: String::new(),
            parent_path: parent_key.clone(),
            depth: parent_depth + 1,
            is_folder,
            values: empty_values(&self.languages),
        };
        self.rows.insert(parent_index + 1, child);
        // a child added under a collapsed folder would be invisible
        self.collapsed.remove(&parent_key);
        self.dirty = true;
        Some(parent_index + 1)
    }

    /// Delete the row at `visible_index`; deleting a named folder removes its
    /// whole subtree. Returns how many rows were removed.
    pub fn delete_row(&mut self, visible_index: usize) -> Option<usize> {
        let index = self.resolve(visible_index)?;
        let key = self.rows[index].key.clone();
        let removed = if self.rows[index].is_folder && !key.trim().is_empty() {
            let before = self.rows.len();
            self.rows.retain(|row| !row.is_within(&key));
            let prefix = format!("{key}.");
            self.collapsed
                .retain(|collapsed| collapsed != &key && !collapsed.starts_with(&prefix));
            before - self.rows.len()
        } else {
            self.rows.remove(index);
            1
        };
        self.dirty = true;
        Some(removed)
    }

    /// Replace the name (last segment) of the row at `visible_index` and
    /// recompute its key. Renaming a folder rewrites every descendant in the
    /// same pass. The new name is stored as given, valid or not; validation
    /// is advisory.
    pub fn rename_row(&mut self, visible_index: usize, new_name: &str) -> Option<()> {
        let index = self.resolve(visible_index)?;
        let old_key = self.rows[index].key.clone();
        self.rows[index].rename(new_name);
        let new_key = self.rows[index].key.clone();
        if self.rows[index].is_folder && !old_key.trim().is_empty() && old_key != new_key {
            self.rewrite_subtree(index, &old_key, &new_key);
        }
        self.dirty = true;
        Some(())
    }

    /// Set one translation value. Folder rows carry no content; edits against
    /// them or unknown languages are ignored. Returns whether anything was
    /// stored.
    pub fn set_value(&mut self, visible_index: usize, language: &str, value: &str) -> Option<bool> {
        let index = self.resolve(visible_index)?;
        if !self.languages.iter().any(|known| known == language) {
            return Some(false);
        }
        let row = &mut self.rows[index];
        if row.is_folder {
            return Some(false);
        }
        row.values.insert(language.to_string(), value.to_string());
        self.dirty = true;
        Some(true)
    }

    /// Reparent the row at `visible_index` under `new_parent` (`""` = root).
    /// Folder moves carry the whole subtree.
    pub fn move_row(&mut self, visible_index: usize, new_parent: &str) -> Option<MoveOutcome> {
        let index = self.resolve(visible_index)?;
        let source = self.rows[index].clone();
        if source.parent_path == new_parent {
            return Some(MoveOutcome::Unchanged);
        }
        let inside_own_subtree = !source.key.is_empty()
            && (new_parent == source.key || new_parent.starts_with(&format!("{}.", source.key)));
        let known_destination =
            new_parent.is_empty() || self.parent_keys().iter().any(|key| key == new_parent);
        if inside_own_subtree || !known_destination {
            return Some(MoveOutcome::Illegal);
        }

        let new_key = build_key(new_parent, &source.name);
        self.rows[index].parent_path = new_parent.to_string();
        self.rows[index].rekey(new_key.clone());
        if source.is_folder && !source.key.trim().is_empty() {
            self.rewrite_subtree(index, &source.key, &new_key);
        }
        self.dirty = true;
        Some(MoveOutcome::Moved)
    }

    /// Rewrite every descendant of a renamed or moved folder, and remap
    /// collapse entries so the view state follows the subtree.
    fn rewrite_subtree(&mut self, root_index: usize, old_key: &str, new_key: &str) {
        let old_prefix = format!("{old_key}.");
        for (index, row) in self.rows.iter_mut().enumerate() {
            if index == root_index {
                continue;
            }
            if row.parent_path == old_key || row.parent_path.starts_with(&old_prefix) {
                let suffix = row.parent_path[old_key.len()..].to_string();
                let parent = format!("{new_key}{suffix}");
                let key = build_key(&parent, &row.name);
                row.parent_path = parent;
                row.rekey(key);
            }
        }
        self.collapsed = self
            .collapsed
            .iter()
            .map(|collapsed| {
                if collapsed == old_key {
                    new_key.to_string()
                } else if collapsed.starts_with(&old_prefix) {
                    format!("{new_key}{}", &collapsed[old_key.len()..])
                } else {
                    collapsed.clone()
                }
            })
            .collect();
    }

    // ---- view state ----------------------------------------------------

    /// Hide or show a language column. Hiding the last visible language is a
    /// no-op, not an error.
    pub fn toggle_language(&mut self, language: &str) {
        if let Some(position) = self.visible_languages.iter().position(|lang| lang == language) {
            if self.visible_languages.len() > 1 {
                self.visible_languages.remove(position);
            }
        } else if self.languages.iter().any(|known| known == language) {
            self.visible_languages.push(language.to_string());
        }
    }

    pub fn toggle_collapse(&mut self, key: &str) {
        // An empty key would match every root row's parent path.
        if key.is_empty() {
            return;
        }
        if !self.collapsed.remove(key) {
            self.collapsed.insert(key.to_string());
        }
    }

    pub fn expand_all(&mut self) {
        self.collapsed.clear();
    }

    /// Collapse every current folder key.
    pub fn collapse_all(&mut self) {
        self.collapsed = self
            .rows
            .iter()
            .filter(|row| row.is_folder && !row.key.is_empty())
            .map(|row| row.key.clone())
            .collect();
    }

    pub fn set_search(&mut self, query: &str) {
        self.search = query.to_string();
    }
}

fn matches_query(row: &Row, query: &str) -> bool {
    if row.key.to_lowercase().contains(query) {
        return true;
    }
    row.values
        .values()
        .any(|value| value.to_lowercase().contains(query))
}
