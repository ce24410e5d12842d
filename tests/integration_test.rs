//! Integration tests for the paystub-ledger CLI.
//!
//! These tests run the actual binary over fixture token files and verify
//! the saved book.

use assert_cmd::Command;
use predicates::prelude::*;
use paystub_ledger::Book;
use std::fs;
use std::path::{Path, PathBuf};

/// Get path to a fixture token file
fn test_data_path(filename: &str) -> PathBuf {
    Path::new("tests/data").join(filename)
}

/// Run a subcommand of the binary, asserting success
fn run(args: &[&str]) -> String {
    let mut cmd = Command::cargo_bin("paystub-ledger").unwrap();
    let assert = cmd.args(args).assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

/// Copy the named fixtures into a fresh temp dir and return (dir, book path)
fn setup(fixtures: &[&str]) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    for name in fixtures {
        fs::copy(test_data_path(name), dir.path().join(name)).unwrap();
    }

    let book_path = dir.path().join("book.json");
    run(&["init", book_path.to_str().unwrap()]);
    (dir, book_path)
}

#[test]
fn test_init_creates_book_with_accounts() {
    let dir = tempfile::tempdir().unwrap();
    let book_path = dir.path().join("book.json");

    let stdout = run(&["init", book_path.to_str().unwrap()]);
    assert!(stdout.contains("Created ledger book"));

    let book = Book::open(&book_path).unwrap();
    assert!(book.transactions.is_empty());
    assert!(book.accounts.iter().any(|a| a.path == "Assets:Bank:Checking"));
    assert!(book.accounts.iter().any(|a| a.path == "Equity:Invisible"));
}

#[test]
fn test_extract_then_load_positional_statement() {
    let (dir, book_path) = setup(&["Statement_2021-01-08.json"]);

    run(&["extract", dir.path().to_str().unwrap()]);
    assert!(dir.path().join("Statement_2021-01-08.items.json").exists());

    run(&[
        "load",
        book_path.to_str().unwrap(),
        dir.path().to_str().unwrap(),
    ]);

    let book = Book::open(&book_path).unwrap();
    // Main paycheck transaction plus the employer-match transaction.
    assert_eq!(book.transactions.len(), 2);
    for tx in &book.transactions {
        assert!(tx.balance().is_zero(), "transaction does not balance");
        assert_eq!(tx.currency, "USD");
        assert_eq!(tx.date.to_string(), "2021-01-08");
    }

    let paycheck = &book.transactions[0];
    assert_eq!(paycheck.postings.len(), 4);

    let match_tx = &book.transactions[1];
    assert_eq!(match_tx.postings.len(), 2);
    assert_eq!(match_tx.postings[0].account_path, "Assets:401k:PreTax:Employer");
}

#[test]
fn test_load_grid_fallback_statement() {
    let (dir, book_path) = setup(&["Statement_2021-02-05.json"]);

    run(&["extract", dir.path().to_str().unwrap()]);
    run(&[
        "load",
        book_path.to_str().unwrap(),
        dir.path().to_str().unwrap(),
    ]);

    let book = Book::open(&book_path).unwrap();
    assert_eq!(book.transactions.len(), 1);

    let tx = &book.transactions[0];
    assert!(tx.balance().is_zero());
    assert_eq!(tx.date.to_string(), "2021-02-05");
    // Salary, merged state-tax continuation row, and the net-pay leg.
    assert_eq!(tx.postings.len(), 3);
    assert!(tx
        .postings
        .iter()
        .any(|p| p.account_path == "Expenses:Taxes:State"));
}

#[test]
fn test_load_batch_of_statements() {
    let (dir, book_path) = setup(&[
        "Statement_2021-01-08.json",
        "Statement_2021-02-05.json",
    ]);

    run(&["extract", dir.path().to_str().unwrap()]);
    let stdout = run(&[
        "load",
        book_path.to_str().unwrap(),
        dir.path().to_str().unwrap(),
    ]);
    assert!(stdout.contains("Committed 3 transaction(s)"));

    let book = Book::open(&book_path).unwrap();
    assert_eq!(book.transactions.len(), 3);
    assert!(book.transactions.iter().all(|tx| tx.balance().is_zero()));
}

#[test]
fn test_missing_argument_fails() {
    let mut cmd = Command::cargo_bin("paystub-ledger").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("missing argument"));
}

#[test]
fn test_unknown_command_fails() {
    let mut cmd = Command::cargo_bin("paystub-ledger").unwrap();
    cmd.arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown command"));
}

#[test]
fn test_load_invalid_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    let book_path = dir.path().join("book.json");
    run(&["init", book_path.to_str().unwrap()]);

    let mut cmd = Command::cargo_bin("paystub-ledger").unwrap();
    cmd.args([
        "load",
        book_path.to_str().unwrap(),
        dir.path().join("nope.items.json").to_str().unwrap(),
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("not a valid input path"));
}
