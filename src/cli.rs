//! CLI argument definitions and command dispatch.
//!
//! Every command opens one editing session: load the locale files from a
//! messages directory, drive the store through adapter intents, then either
//! print the resulting view or export it. The commands are thin; all
//! structural logic stays in the core modules.

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::adapter::{Intent, Toast, apply};
use crate::catalog::load_catalog_dir;
use crate::export::{DirSink, export_catalog};
use crate::moves::{destination_tree, legal_destinations};
use crate::render;
use crate::snippet::{descendant_leaf_keys, generate_snippet};
use crate::store::RowStore;
use crate::validation::catalog_findings;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Command,
}

/// Arguments shared by every command: where the catalog lives and which
/// language columns to hide for this session.
#[derive(Debug, Clone, Args)]
pub struct SessionArgs {
    /// Directory holding one {locale}.json file per language
    pub messages_dir: PathBuf,

    /// Hide a language column (repeatable); the last visible one never hides
    #[arg(long = "hide", value_name = "LANG")]
    pub hidden: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the catalog as the editable flat table
    Show(ShowArgs),
    /// Validate key names and report duplicates
    Check(CheckArgs),
    /// Write one nested JSON document per visible language
    Export(ExportArgs),
    /// Generate a key-constant snippet for a folder's leaves
    Snippet(SnippetArgs),
    /// Move a key (a folder takes its subtree along) under another folder
    Move(MoveArgs),
    /// Add a new key
    Add(AddArgs),
    /// Rename the last segment of a key
    Rename(RenameArgs),
    /// Set one translation value
    Set(SetArgs),
    /// Delete a key (a folder takes its subtree along)
    Delete(DeleteArgs),
}

#[derive(Debug, Parser)]
pub struct ShowArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Filter rows by key or value, case-insensitive
    #[arg(long, short)]
    pub query: Option<String>,

    /// Collapse a folder (repeatable)
    #[arg(long = "collapse", value_name = "KEY")]
    pub collapsed: Vec<String>,

    /// Collapse every folder
    #[arg(long)]
    pub collapse_all: bool,
}

#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub session: SessionArgs,
}

#[derive(Debug, Parser)]
pub struct ExportArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Output directory for the {language}.json files
    #[arg(long, short)]
    pub out: PathBuf,
}

#[derive(Debug, Parser)]
pub struct SnippetArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Folder key to collect leaves under
    pub folder: String,

    /// Bind key suffixes relative to the folder, with a useTranslation header
    #[arg(long)]
    pub key_prefix: bool,
}

#[derive(Debug, Parser)]
pub struct MoveArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Key to relocate
    pub key: String,

    /// Destination folder key
    #[arg(long, value_name = "PARENT", conflicts_with = "root")]
    pub to: Option<String>,

    /// Move to the root level
    #[arg(long)]
    pub root: bool,

    /// Export here after the edit instead of printing the table
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Parser)]
pub struct AddArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Name (single segment) of the new key
    pub name: String,

    /// Folder to nest under; omitted means a new root folder
    #[arg(long, value_name = "KEY")]
    pub parent: Option<String>,

    /// Create a folder instead of a translatable leaf
    #[arg(long)]
    pub folder: bool,

    /// Export here after the edit instead of printing the table
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Parser)]
pub struct RenameArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    pub key: String,
    pub new_name: String,

    /// Export here after the edit instead of printing the table
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Parser)]
pub struct SetArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    pub key: String,
    pub language: String,
    pub value: String,

    /// Export here after the edit instead of printing the table
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Parser)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    pub key: String,

    /// Export here after the edit instead of printing the table
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run_cli(args: Arguments) -> Result<u8> {
    match args.command {
        Command::Show(args) => run_show(args),
        Command::Check(args) => run_check(args),
        Command::Export(args) => run_export(args),
        Command::Snippet(args) => run_snippet(args),
        Command::Move(args) => run_move(args),
        Command::Add(args) => run_add(args),
        Command::Rename(args) => run_rename(args),
        Command::Set(args) => run_set(args),
        Command::Delete(args) => run_delete(args),
    }
}

/// Load the catalog and build the session store; loader and extraction
/// warnings go to stderr.
fn open_session(session: &SessionArgs) -> Result<RowStore> {
    let catalog = load_catalog_dir(&session.messages_dir)?;
    render::print_warnings(&catalog.warnings);
    let (mut store, warnings) = RowStore::from_locales(&catalog.locales);
    render::print_warnings(&warnings);
    for language in &session.hidden {
        store.toggle_language(language);
    }
    Ok(store)
}

fn require_row(store: &RowStore, key: &str) -> Result<usize> {
    store
        .visible_index_of(key)
        .ok_or_else(|| anyhow!("No row with key '{key}'"))
}

fn visible_index_of_underlying(store: &RowStore, underlying: usize) -> Result<usize> {
    store
        .visible_indices()
        .into_iter()
        .position(|index| index == underlying)
        .ok_or_else(|| anyhow!("Inserted row is not visible"))
}

/// Report the edit outcome, then export or print the updated view.
fn finish_edit(store: &mut RowStore, toast: Toast, out: Option<&Path>) -> Result<u8> {
    match &toast {
        Toast::Info(_) => println!("{} {toast}", render::SUCCESS_MARK.green()),
        Toast::Error(_) => {
            eprintln!("{} {toast}", render::FAILURE_MARK.red());
            return Ok(1);
        }
    }
    match out {
        Some(dir) => {
            let report = export_catalog(store, &mut DirSink::new(dir))?;
            render::print_warnings(&report.warnings);
            println!(
                "Exported {} file(s) to {}",
                report.languages.len(),
                dir.display()
            );
        }
        None => render::print_view(store),
    }
    Ok(0)
}

fn run_show(args: ShowArgs) -> Result<u8> {
    let mut store = open_session(&args.session)?;
    if args.collapse_all {
        apply(&mut store, Intent::CollapseAll);
    }
    for key in args.collapsed {
        apply(&mut store, Intent::ToggleCollapse { key });
    }
    if let Some(query) = args.query {
        apply(&mut store, Intent::Search { query });
    }
    render::print_view(&store);
    Ok(0)
}

fn run_check(args: CheckArgs) -> Result<u8> {
    let store = open_session(&args.session)?;
    let findings = catalog_findings(store.rows());
    render::print_findings(&findings);
    Ok(if findings.is_empty() { 0 } else { 1 })
}

fn run_export(args: ExportArgs) -> Result<u8> {
    let mut store = open_session(&args.session)?;
    let report = export_catalog(&mut store, &mut DirSink::new(&args.out))?;
    render::print_warnings(&report.warnings);
    println!(
        "{} Exported {} file(s) to {}",
        render::SUCCESS_MARK.green(),
        report.languages.len(),
        args.out.display()
    );
    Ok(0)
}

fn run_snippet(args: SnippetArgs) -> Result<u8> {
    let store = open_session(&args.session)?;
    if !store.parent_keys().contains(&args.folder) {
        bail!("'{}' is not a folder key", args.folder);
    }
    let leaves = descendant_leaf_keys(store.rows(), &args.folder);
    println!("{}", generate_snippet(&args.folder, &leaves, args.key_prefix));
    Ok(0)
}

fn run_move(args: MoveArgs) -> Result<u8> {
    let mut store = open_session(&args.session)?;
    let row = require_row(&store, &args.key)?;

    let destination = if args.root {
        String::new()
    } else if let Some(to) = args.to {
        to
    } else {
        // no destination given: show where the key may go
        let legal = legal_destinations(&args.key, &store.parent_keys());
        println!("'{}' can move under:", args.key);
        render::print_destination_tree(&destination_tree(&legal));
        return Ok(0);
    };

    let toast = apply(
        &mut store,
        Intent::Move {
            row,
            new_parent: destination,
        },
    );
    finish_edit(&mut store, toast, args.out.as_deref())
}

fn run_add(args: AddArgs) -> Result<u8> {
    let mut store = open_session(&args.session)?;
    let underlying = match &args.parent {
        Some(parent) => {
            let parent_row = require_row(&store, parent)?;
            let inserted = if args.folder {
                store.add_child_folder(parent_row)
            } else {
                store.add_child_leaf(parent_row)
            };
            inserted.ok_or_else(|| anyhow!("No row with key '{parent}'"))?
        }
        // a new root row is always a folder, same as the toolbar button
        None => store.add_root_row(),
    };
    let row = visible_index_of_underlying(&store, underlying)?;
    let toast = apply(
        &mut store,
        Intent::Rename {
            row,
            name: args.name,
        },
    );
    finish_edit(&mut store, toast, args.out.as_deref())
}

fn run_rename(args: RenameArgs) -> Result<u8> {
    let mut store = open_session(&args.session)?;
    let row = require_row(&store, &args.key)?;
    let toast = apply(
        &mut store,
        Intent::Rename {
            row,
            name: args.new_name,
        },
    );
    finish_edit(&mut store, toast, args.out.as_deref())
}

fn run_set(args: SetArgs) -> Result<u8> {
    let mut store = open_session(&args.session)?;
    let row = require_row(&store, &args.key)?;
    let toast = apply(
        &mut store,
        Intent::SetValue {
            row,
            language: args.language,
            value: args.value,
        },
    );
    finish_edit(&mut store, toast, args.out.as_deref())
}

fn run_delete(args: DeleteArgs) -> Result<u8> {
    let mut store = open_session(&args.session)?;
    let row = require_row(&store, &args.key)?;
    let toast = apply(&mut store, Intent::DeleteRow { row });
    finish_edit(&mut store, toast, args.out.as_deref())
}
