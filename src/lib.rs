//! # Paystub Ledger
//!
//! Turns semi-structured payroll statements into validated, balanced
//! double-entry transactions in a JSON-backed ledger book.
//!
//! ## Design Principles
//!
//! - **Header-relative layout parsing**: column geometry is read from each
//!   page's header tokens, with a drawn-grid fallback for statements that
//!   expose structural table lines
//! - **Fixed-point arithmetic**: 2 decimal places via `rust_decimal`
//! - **Two-phase posting**: handlers that depend on other postings' final
//!   totals run as deferred operations after all direct handlers
//! - **Balanced by construction**: every emitted transaction's postings
//!   net to exactly zero
//!
//! ## Example
//!
//! ```no_run
//! use paystub_ledger::{AccountRegistry, Book, PostingEngine, RuleSet};
//! use chrono::NaiveDate;
//!
//! let book = Book::with_chart_of_accounts();
//! let rules = RuleSet::standard();
//! let mut registry = AccountRegistry::new();
//! registry.load_from_book(&book);
//!
//! let rows = paystub_ledger::extract_items(&Default::default());
//! let date = NaiveDate::from_ymd_opt(2021, 1, 8).unwrap();
//! let transactions = PostingEngine::new(&rules, &registry)
//!     .process(&rows, date)
//!     .unwrap();
//! ```

pub mod accounts;
pub mod amount;
pub mod decimal;
pub mod engine;
pub mod error;
pub mod grid;
pub mod item;
pub mod layout;
pub mod ledger;
pub mod loader;
pub mod page;
pub mod registry;
pub mod rules;

pub use decimal::Decimal2;
pub use engine::{PostingEngine, PostingGroups};
pub use error::{LoadError, Result};
pub use item::ItemRecord;
pub use layout::ColumnBounds;
pub use ledger::{Account, Book, Posting, Transaction};
pub use loader::{extract_file, extract_items, load_batch, load_file};
pub use page::{Page, StatementDoc, Word};
pub use registry::AccountRegistry;
pub use rules::{Handler, Rule, RuleSet};
