//! The presentation boundary: user intents in, toasts out.
//!
//! Hosts (the CLI here, any UI in principle) never touch the row list
//! directly. They submit an [`Intent`] against the visible view and get back
//! a [`Toast`] describing what happened, mirroring the callback-and-toast
//! surface of the original table UI. No structural logic lives here; every
//! intent maps onto one store operation.

use std::fmt;

use crate::store::{MoveOutcome, RowStore};

/// One user-initiated edit or view change, addressed against the currently
/// visible row list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    AddRoot,
    AddChildLeaf { row: usize },
    AddChildFolder { row: usize },
    DeleteRow { row: usize },
    Rename { row: usize, name: String },
    SetValue { row: usize, language: String, value: String },
    Move { row: usize, new_parent: String },
    ToggleCollapse { key: String },
    ExpandAll,
    CollapseAll,
    Search { query: String },
    ToggleLanguage { language: String },
}

/// Feedback for the host to show. Errors never leave the store in a bad
/// state; they mean the intent was refused or pointed nowhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toast {
    Info(String),
    Error(String),
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Toast::Info(message) | Toast::Error(message) => write!(f, "{message}"),
        }
    }
}

fn stale(row: usize) -> Toast {
    Toast::Error(format!("Row {row} is not visible"))
}

/// Execute one intent against the store.
pub fn apply(store: &mut RowStore, intent: Intent) -> Toast {
    match intent {
        Intent::AddRoot => {
            store.add_root_row();
            Toast::Info("Added root key".to_string())
        }
        Intent::AddChildLeaf { row } => match store.add_child_leaf(row) {
            Some(_) => Toast::Info("Added key".to_string()),
            None => stale(row),
        },
        Intent::AddChildFolder { row } => match store.add_child_folder(row) {
            Some(_) => Toast::Info("Added nested folder".to_string()),
            None => stale(row),
        },
        Intent::DeleteRow { row } => {
            let key = match store.visible_rows().get(row) {
                Some(visible) => visible.key.clone(),
                None => return stale(row),
            };
            match store.delete_row(row) {
                Some(1) => Toast::Info(format!("Deleted '{key}'")),
                Some(removed) => Toast::Info(format!("Deleted '{key}' ({removed} rows)")),
                None => stale(row),
            }
        }
        Intent::Rename { row, name } => match store.rename_row(row, &name) {
            Some(()) => Toast::Info(format!("Renamed to '{name}'")),
            None => stale(row),
        },
        Intent::SetValue { row, language, value } => {
            match store.set_value(row, &language, &value) {
                Some(true) => Toast::Info(format!("Updated {language} value")),
                Some(false) => {
                    Toast::Error(format!("Cannot set a {language} value on this row"))
                }
                None => stale(row),
            }
        }
        Intent::Move { row, new_parent } => match store.move_row(row, &new_parent) {
            Some(MoveOutcome::Moved) => Toast::Info(destination_label(&new_parent)),
            Some(MoveOutcome::Unchanged) => Toast::Info("Key already there".to_string()),
            Some(MoveOutcome::Illegal) => {
                Toast::Error(format!("Cannot move under '{new_parent}'"))
            }
            None => stale(row),
        },
        Intent::ToggleCollapse { key } => {
            store.toggle_collapse(&key);
            Toast::Info(format!(
                "{} '{key}'",
                if store.is_collapsed(&key) { "Collapsed" } else { "Expanded" }
            ))
        }
        Intent::ExpandAll => {
            store.expand_all();
            Toast::Info("Expanded all folders".to_string())
        }
        Intent::CollapseAll => {
            store.collapse_all();
            Toast::Info("Collapsed all folders".to_string())
        }
        Intent::Search { query } => {
            store.set_search(&query);
            let matches = store.visible_indices().len();
            Toast::Info(if matches == 1 {
                "1 row matches".to_string()
            } else {
                format!("{matches} rows match")
            })
        }
        Intent::ToggleLanguage { language } => {
            store.toggle_language(&language);
            Toast::Info(format!(
                "Visible languages: {}",
                store.visible_languages().join(", ")
            ))
        }
    }
}

fn destination_label(new_parent: &str) -> String {
    if new_parent.is_empty() {
        "Moved to root".to_string()
    } else {
        format!("Moved under '{new_parent}'")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn sample_store() -> RowStore {
        let (store, _) = RowStore::from_locales(&[(
            "en".to_string(),
            json!({"common": {"ok": "OK"}, "title": "Hello"}),
        )]);
        store
    }

    #[test]
    fn test_delete_reports_subtree_size() {
        let mut store = sample_store();
        let row = store.visible_index_of("common").unwrap();
        let toast = apply(&mut store, Intent::DeleteRow { row });
        assert_eq!(toast, Toast::Info("Deleted 'common' (2 rows)".to_string()));
    }

    #[test]
    fn test_set_value_on_folder_is_refused() {
        let mut store = sample_store();
        let row = store.visible_index_of("common").unwrap();
        let toast = apply(
            &mut store,
            Intent::SetValue {
                row,
                language: "en".to_string(),
                value: "nope".to_string(),
            },
        );
        assert!(matches!(toast, Toast::Error(_)));
    }

    #[test]
    fn test_illegal_move_surfaces_error() {
        let mut store = sample_store();
        let row = store.visible_index_of("common").unwrap();
        let toast = apply(
            &mut store,
            Intent::Move {
                row,
                new_parent: "common".to_string(),
            },
        );
        assert!(matches!(toast, Toast::Error(_)));
    }

    #[test]
    fn test_stale_index_is_an_error_not_a_panic() {
        let mut store = sample_store();
        let toast = apply(&mut store, Intent::DeleteRow { row: 99 });
        assert!(matches!(toast, Toast::Error(_)));
        assert_eq!(store.rows().len(), 3);
    }

    #[test]
    fn test_search_reports_match_count() {
        let mut store = sample_store();
        let toast = apply(
            &mut store,
            Intent::Search {
                query: "hello".to_string(),
            },
        );
        assert_eq!(toast, Toast::Info("1 row matches".to_string()));

        let toast = apply(
            &mut store,
            Intent::Search {
                query: "common".to_string(),
            },
        );
        assert_eq!(toast, Toast::Info("2 rows match".to_string()));
    }
}
