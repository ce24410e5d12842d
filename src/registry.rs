//! Account lookup against an opened book.

use crate::error::{LoadError, Result};
use crate::ledger::{Account, Book};
use std::collections::HashMap;

/// Registry resolving hierarchical account paths to book accounts.
///
/// Loaded once per batch from the opened book and treated as immutable
/// configuration from then on.
#[derive(Debug, Default)]
pub struct AccountRegistry {
    accounts: HashMap<String, Account>,
}

impl AccountRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        AccountRegistry {
            accounts: HashMap::new(),
        }
    }

    /// Populates the registry from an opened book, keyed by full path.
    pub fn load_from_book(&mut self, book: &Book) {
        self.accounts.clear();
        for account in &book.accounts {
            self.accounts.insert(account.path.clone(), account.clone());
        }
    }

    /// Gets an account by its full path; an unknown path is fatal for the
    /// current statement.
    pub fn get(&self, account_path: &str) -> Result<&Account> {
        self.accounts
            .get(account_path)
            .ok_or_else(|| LoadError::UnresolvedAccount {
                path: account_path.to_string(),
            })
    }

    /// Gets an account by its full path, `None` if absent.
    pub fn get_safe(&self, account_path: &str) -> Option<&Account> {
        self.accounts.get(account_path)
    }

    /// Checks whether an account exists.
    pub fn has(&self, account_path: &str) -> bool {
        self.accounts.contains_key(account_path)
    }
}
