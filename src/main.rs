//! Paystub Ledger CLI
//!
//! Extracts line items from decoded payroll statements and loads them into
//! a JSON ledger book.
//!
//! # Usage
//!
//! ```bash
//! paystub-ledger init book.json
//! paystub-ledger extract statements/
//! paystub-ledger load book.json statements/
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use paystub_ledger::loader::{self, ITEMS_SUFFIX};
use paystub_ledger::{AccountRegistry, Book, LoadError, Result, RuleSet};
use std::env;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let command = args.get(1).ok_or(LoadError::MissingArgument)?;

    match command.as_str() {
        "init" => {
            let book_path = args.get(2).ok_or(LoadError::MissingArgument)?;
            init(Path::new(book_path))
        }
        "extract" => {
            let input = args.get(2).ok_or(LoadError::MissingArgument)?;
            extract(Path::new(input))
        }
        "load" => {
            let book_path = args.get(2).ok_or(LoadError::MissingArgument)?;
            let input = args.get(3).ok_or(LoadError::MissingArgument)?;
            load(Path::new(book_path), Path::new(input))
        }
        name => Err(LoadError::UnknownCommand {
            name: name.to_string(),
        }),
    }
}

/// Creates a new book with the full chart of accounts.
fn init(book_path: &Path) -> Result<()> {
    let book = Book::with_chart_of_accounts();
    book.save(book_path)?;
    println!("Created ledger book: {}", book_path.display());
    Ok(())
}

/// Extracts line items from one token file, or every token file in a
/// directory.
fn extract(input: &Path) -> Result<()> {
    for path in input_files(input, ".json")? {
        // Skip previously extracted output living next to its input.
        if path.to_string_lossy().ends_with(ITEMS_SUFFIX) {
            continue;
        }
        println!("Processing {}...", path.display());
        let out = loader::extract_file(&path)?;
        println!("Created {}", out.display());
    }
    Ok(())
}

/// Loads one line-item file, or every line-item file in a directory, into
/// the book. The book is saved once at the end.
fn load(book_path: &Path, input: &Path) -> Result<()> {
    let mut book = Book::open(book_path)?;
    let mut registry = AccountRegistry::new();
    registry.load_from_book(&book);
    let rules = RuleSet::standard();

    let paths = input_files(input, ITEMS_SUFFIX)?;
    let committed = loader::load_batch(&paths, &mut book, &rules, &registry);

    book.save(book_path)?;
    println!("Committed {committed} transaction(s) to {}", book_path.display());
    Ok(())
}

/// Resolves an input path to a sorted list of matching files.
///
/// A file must carry the expected suffix; a directory contributes every
/// matching file it directly contains.
fn input_files(input: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let matches = |p: &Path| {
        p.file_name()
            .map(|n| n.to_string_lossy().ends_with(suffix))
            .unwrap_or(false)
    };

    if input.is_dir() {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(input)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && matches(p))
            .collect();
        paths.sort();
        Ok(paths)
    } else if input.is_file() && matches(input) {
        Ok(vec![input.to_path_buf()])
    } else {
        Err(LoadError::InvalidPath {
            path: input.display().to_string(),
        })
    }
}
