//! Table, toolbar and findings formatting.
//!
//! This module is separate from the core model to allow keyloom to be used as
//! a library without printing side effects. Everything here is a read-only
//! projection of store state; nothing mutates.

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::moves::DestinationNode;
use crate::store::RowStore;
use crate::validation::{Finding, catalog_findings, row_error};

/// Success mark for consistent output formatting
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓
/// Failure mark for consistent output formatting
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

const VALUE_WIDTH: usize = 32;

/// Render the currently visible rows as an aligned table, one column per
/// visible language. Folders carry a collapse marker, missing translations
/// show as `(missing)`, and a flagged row gets an inline error line beneath
/// it.
pub fn format_table(store: &RowStore) -> String {
    let languages = store.visible_languages();
    let indices = store.visible_indices();
    let rows = store.rows();

    let key_cells: Vec<String> = indices
        .iter()
        .map(|&index| {
            let row = &rows[index];
            let marker = if row.is_folder {
                if store.is_collapsed(&row.key) { "\u{25b8} " } else { "\u{25be} " }
            } else {
                "  "
            };
            let name = if row.name.is_empty() {
                "(unnamed)"
            } else {
                row.name.as_str()
            };
            format!("{}{marker}{name}", "  ".repeat(row.depth))
        })
        .collect();

    let key_width = key_cells
        .iter()
        .map(|cell| cell.width())
        .chain(std::iter::once("KEY".width()))
        .max()
        .unwrap_or(3);

    let mut out = String::new();
    out.push_str(&pad("KEY", key_width));
    for language in &languages {
        out.push_str("  ");
        out.push_str(&pad(&language.to_uppercase(), VALUE_WIDTH));
    }
    out.push('\n');

    for (cell, &index) in key_cells.iter().zip(&indices) {
        let row = &rows[index];
        out.push_str(&pad(cell, key_width));
        if !row.is_folder {
            for language in &languages {
                out.push_str("  ");
                let value = row.value(language);
                if value.is_empty() {
                    // pad before colorizing so escape codes stay out of width math
                    out.push_str(&pad("(missing)", VALUE_WIDTH).yellow().to_string());
                } else {
                    out.push_str(&pad(&truncate(value, VALUE_WIDTH), VALUE_WIDTH));
                }
            }
        }
        out.push('\n');

        if let Some(error) = row_error(row, rows, index) {
            out.push_str(&format!(
                "{}  {} {}\n",
                " ".repeat(key_width),
                FAILURE_MARK.red(),
                error.to_string().red()
            ));
        }
    }
    out
}

/// One-line session summary shown above the table.
pub fn format_toolbar(store: &RowStore) -> String {
    let folders = store.rows().iter().filter(|row| row.is_folder).count();
    let leaves = store.rows().len() - folders;
    let mut parts = vec![
        format!("{leaves} keys"),
        format!("{folders} folders"),
        format!("languages: {}", store.visible_languages().join(" ")),
    ];
    let query = store.search_query().trim();
    if !query.is_empty() {
        parts.push(format!("search: \"{query}\""));
    }
    if store.is_dirty() {
        parts.push("unsaved changes".yellow().to_string());
    }
    parts.join("  \u{b7}  ")
}

/// Print validation findings cargo-style, with a closing summary line.
pub fn print_findings(findings: &[Finding]) {
    for finding in findings {
        println!(
            "{}: {}",
            "error".bold().red(),
            finding.error.to_string().bold()
        );
        println!("  {} row {}: '{}'", "-->".blue(), finding.row + 1, finding.key);
    }
    if findings.is_empty() {
        println!("{} no key problems found", SUCCESS_MARK.green());
    } else {
        println!(
            "{} {} problem{} found",
            FAILURE_MARK.red(),
            findings.len(),
            if findings.len() == 1 { "" } else { "s" }
        );
    }
}

/// Print the whole visible view: toolbar, table, findings summary.
pub fn print_view(store: &RowStore) {
    println!("{}", format_toolbar(store));
    println!();
    print!("{}", format_table(store));
    let findings = catalog_findings(store.rows());
    if !findings.is_empty() {
        println!();
        print_findings(&findings);
    }
}

pub fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("{}: {}", "warning".bold().yellow(), warning);
    }
}

/// Print the hierarchical destination picker.
pub fn print_destination_tree(nodes: &[DestinationNode]) {
    fn walk(node: &DestinationNode, depth: usize) {
        println!(
            "{}{} {}",
            "  ".repeat(depth),
            "\u{25b8}".blue(),
            node.name.bold()
        );
        for child in &node.children {
            walk(child, depth + 1);
        }
    }
    if nodes.is_empty() {
        println!("(no folders)");
    }
    for node in nodes {
        walk(node, 0);
    }
}

/// Pad to a display width, wide characters counted via unicode-width.
fn pad(text: &str, width: usize) -> String {
    let current = text.width();
    if current >= width {
        return text.to_string();
    }
    format!("{text}{}", " ".repeat(width - current))
}

/// Clip to a display width, appending `…` when something was cut.
fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.to_string().width();
        if used + ch_width > width.saturating_sub(1) {
            break;
        }
        used += ch_width;
        out.push(ch);
    }
    out.push('\u{2026}');
    out
}
