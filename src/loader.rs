//! File-level orchestration: extract token documents into line-item files,
//! and load line-item files into the book.
//!
//! Each statement is an independent unit of work. A fatal error (unresolved
//! account, undatable document) aborts that statement only; a batch logs it
//! and moves on. Transactions already committed for earlier statements stay
//! committed, and the book is saved once by the caller at the end.

use crate::engine::PostingEngine;
use crate::error::Result;
use crate::item::ItemRecord;
use crate::layout;
use crate::ledger::Book;
use crate::page::{date_from_file_name, StatementDoc};
use crate::registry::AccountRegistry;
use crate::rules::RuleSet;
use log::{info, warn};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Suffix of intermediate line-item files.
pub const ITEMS_SUFFIX: &str = ".items.json";

/// Parses every page of a decoded statement into line-item rows.
pub fn extract_items(doc: &StatementDoc) -> Vec<Vec<ItemRecord>> {
    doc.pages.iter().flat_map(layout::parse_page).collect()
}

/// Extracts a token file into the intermediate line-item file next to it.
///
/// Returns the path of the written file.
pub fn extract_file(input: &Path) -> Result<PathBuf> {
    let doc = StatementDoc::from_file(input)?;
    let items = extract_items(&doc);

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let out = input.with_file_name(format!("{stem}{ITEMS_SUFFIX}"));

    let file = File::create(&out)?;
    serde_json::to_writer_pretty(BufWriter::new(file), &items)?;
    Ok(out)
}

/// Loads one line-item file into the book.
///
/// The statement date comes from the file name; both phases of the posting
/// engine run and every resulting transaction is appended. Returns the
/// number of transactions committed.
pub fn load_file(
    path: &Path,
    book: &mut Book,
    rules: &RuleSet,
    registry: &AccountRegistry,
) -> Result<usize> {
    let date = date_from_file_name(path)?;

    let file = File::open(path)?;
    let rows: Vec<Vec<ItemRecord>> = serde_json::from_reader(BufReader::new(file))?;

    let transactions = PostingEngine::new(rules, registry).process(&rows, date)?;
    let count = transactions.len();
    for tx in transactions {
        book.append_transaction(tx);
    }

    info!("{}: committed {count} transaction(s)", path.display());
    Ok(count)
}

/// Loads a batch of line-item files, treating each as independent.
///
/// A document that fails is logged with enough context for manual
/// remediation and skipped; previously committed transactions remain.
pub fn load_batch(
    paths: &[PathBuf],
    book: &mut Book,
    rules: &RuleSet,
    registry: &AccountRegistry,
) -> usize {
    let mut committed = 0;
    for path in paths {
        match load_file(path, book, rules, registry) {
            Ok(count) => committed += count,
            Err(e) => warn!("{}: {e}, skipping document", path.display()),
        }
    }
    committed
}
