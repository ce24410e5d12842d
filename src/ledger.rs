//! The ledger book: accounts, transactions, and JSON persistence.
//!
//! The book is the single shared mutable resource of a batch run: opened
//! once, appended to as statements are processed, and saved once at the end.
//! There is no partial-commit or rollback; a statement that fails simply
//! contributes nothing.

use crate::accounts;
use crate::decimal::Decimal2;
use crate::error::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Fixed currency for all transactions.
pub const CURRENCY: &str = "USD";

/// One account in the book's hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Full colon-delimited path, e.g. `Assets:Bank:Checking`.
    pub path: String,

    /// Leaf name, e.g. `Checking`.
    pub name: String,

    /// Ledger account type derived from the top-level name.
    pub kind: String,

    /// Placeholder accounts exist only to carry children; rules never post
    /// to them.
    pub placeholder: bool,
}

/// One signed ledger entry against an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    /// Full path of the account this posting hits.
    pub account_path: String,

    /// Short memo describing the leg.
    pub memo: String,

    /// Signed value, exactly two fraction digits.
    pub value: Decimal2,
}

impl Posting {
    /// Creates a posting against the given account path.
    pub fn new(account_path: impl Into<String>, memo: impl Into<String>, value: Decimal2) -> Self {
        Posting {
            account_path: account_path.into(),
            memo: memo.into(),
            value,
        }
    }
}

/// One balanced transaction: a dated, ordered set of postings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Statement date.
    pub date: NaiveDate,

    /// Transaction currency.
    pub currency: String,

    /// Postings in the order the rules produced them.
    pub postings: Vec<Posting>,
}

impl Transaction {
    /// Sum of all posting values; zero for every well-formed transaction.
    pub fn balance(&self) -> Decimal2 {
        self.postings.iter().map(|p| p.value).sum()
    }
}

/// A JSON-backed ledger book.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Book {
    /// All accounts, parents before children.
    pub accounts: Vec<Account>,

    /// Committed transactions, in load order.
    pub transactions: Vec<Transaction>,
}

impl Book {
    /// Creates a book populated with the full chart of accounts.
    ///
    /// Walks every leaf path, inserting missing ancestors as placeholders so
    /// parents always precede children.
    pub fn with_chart_of_accounts() -> Self {
        let mut book = Book::default();

        for full_path in accounts::leaf_account_paths() {
            let elements: Vec<&str> = full_path.split(':').collect();
            let kind = accounts::account_kind(elements[0]);

            for depth in 0..elements.len() {
                let partial = elements[..=depth].join(":");
                if book.accounts.iter().any(|a| a.path == partial) {
                    continue;
                }
                book.accounts.push(Account {
                    path: partial,
                    name: elements[depth].to_string(),
                    kind: kind.to_string(),
                    placeholder: depth < elements.len() - 1,
                });
            }
        }

        book
    }

    /// Reads a book from a JSON file.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let book = serde_json::from_reader(BufReader::new(file))?;
        Ok(book)
    }

    /// Writes the book to a JSON file, replacing any existing content.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Appends a committed transaction.
    pub fn append_transaction(&mut self, tx: Transaction) {
        self.transactions.push(tx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_chart_has_parents_before_children() {
        let book = Book::with_chart_of_accounts();

        let idx = |path: &str| {
            book.accounts
                .iter()
                .position(|a| a.path == path)
                .unwrap_or_else(|| panic!("missing account {path}"))
        };

        assert!(idx("Assets") < idx("Assets:Bank"));
        assert!(idx("Assets:Bank") < idx("Assets:Bank:Checking"));
        assert!(book.accounts[idx("Assets:Bank")].placeholder);
        assert!(!book.accounts[idx("Assets:Bank:Checking")].placeholder);
    }

    #[test]
    fn test_chart_paths_unique() {
        let book = Book::with_chart_of_accounts();
        let mut paths: Vec<&str> = book.accounts.iter().map(|a| a.path.as_str()).collect();
        let before = paths.len();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), before);
    }

    #[test]
    fn test_transaction_balance() {
        let tx = Transaction {
            date: NaiveDate::from_ymd_opt(2021, 1, 8).unwrap(),
            currency: CURRENCY.to_string(),
            postings: vec![
                Posting::new("Income:Taxable:Regular", "Reg", Decimal2::from_str("-1000.00").unwrap()),
                Posting::new("Assets:Bank:Checking", "Net Pay", Decimal2::from_str("1000.00").unwrap()),
            ],
        };
        assert!(tx.balance().is_zero());
    }

    #[test]
    fn test_book_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.json");

        let mut book = Book::with_chart_of_accounts();
        book.append_transaction(Transaction {
            date: NaiveDate::from_ymd_opt(2021, 1, 8).unwrap(),
            currency: CURRENCY.to_string(),
            postings: vec![Posting::new(
                "Assets:Bank:Checking",
                "Net Pay",
                Decimal2::ZERO,
            )],
        });
        book.save(&path).unwrap();

        let reloaded = Book::open(&path).unwrap();
        assert_eq!(reloaded.accounts.len(), book.accounts.len());
        assert_eq!(reloaded.transactions.len(), 1);
    }
}
