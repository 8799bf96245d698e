//! Keyloom - flat-table editor core for hierarchical translation catalogs
//!
//! Keyloom manages a set of per-language nested JSON catalogs that share one
//! dot-delimited key namespace. It merges them into a single editable flat
//! row list (one row per key, folder or leaf), keeps the tree invariants
//! intact through edits (insert, delete, rename, move), and serializes the
//! result back into per-language nested documents.
//!
//! ## Module Structure
//!
//! - `key`: pure helpers over dot-delimited key paths
//! - `row`: the flat row model unit
//! - `validation`: advisory key-syntax and duplicate checks
//! - `extract` / `project`: nested trees ↔ flat rows, both directions
//! - `store`: the editing state machine and its derived views
//! - `moves`: legal-destination resolution for relocations
//! - `export`: per-language document assembly behind a download seam
//! - `catalog`: loading locale files from a messages directory
//! - `adapter`: user intents and toast feedback for hosts
//! - `render`: table/toolbar/findings formatting
//! - `snippet`: key-constant code snippet generation
//! - `cli`: command-line interface layer

pub mod adapter;
pub mod catalog;
pub mod cli;
pub mod export;
pub mod extract;
pub mod key;
pub mod moves;
pub mod project;
pub mod render;
pub mod row;
pub mod snippet;
pub mod store;
pub mod validation;
