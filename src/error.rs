//! Error types for statement loading.

use thiserror::Error;

/// Result type alias for loader operations
pub type Result<T> = std::result::Result<T, LoadError>;

/// Errors that can occur while parsing statements or posting them to a book.
///
/// Soft conditions (a malformed amount, a description with no matching rule,
/// a page whose layout cannot be detected) are not represented here: they are
/// logged and skipped where they occur. Only conditions that abort the
/// current document or the whole run appear as variants.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Failed to open, read, or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON in a token file, item file, or book file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A rule referenced an account path that is not in the book
    #[error("account not found: {path}")]
    UnresolvedAccount { path: String },

    /// No ISO date token could be extracted from the document's file name
    #[error("unable to derive a statement date from '{name}'")]
    UndatableDocument { name: String },

    /// Missing command-line argument
    #[error("missing argument. Usage: paystub-ledger <init|extract|load> ...")]
    MissingArgument,

    /// Unrecognized subcommand
    #[error("unknown command '{name}'. Expected init, extract, or load")]
    UnknownCommand { name: String },

    /// A path argument does not point at a usable file or directory
    #[error("'{path}' is not a valid input path")]
    InvalidPath { path: String },
}
