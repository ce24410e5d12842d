//! Input document model supplied by the token/table provider.
//!
//! Raw statement decoding happens upstream: each document arrives as a JSON
//! file holding, per page, positioned word tokens and any drawn-grid tables
//! the decoder found. Offsets are in layout units with the origin at the
//! top-left of the page.

use crate::error::{LoadError, Result};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::OnceLock;

/// One positioned word token on a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    /// Token text as printed.
    pub text: String,

    /// Horizontal offset of the token's left edge.
    pub x0: f64,

    /// Vertical offset of the token's top edge.
    pub top: f64,
}

/// A drawn-grid table: rows of cells, a cell being optional text.
pub type GridTable = Vec<Vec<Option<String>>>;

/// One page of a decoded statement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    /// Positioned word tokens, in the order the decoder emitted them.
    #[serde(default)]
    pub words: Vec<Word>,

    /// Line-drawn tables extracted from the page, if any.
    #[serde(default)]
    pub tables: Vec<GridTable>,
}

/// A whole decoded statement document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatementDoc {
    /// Pages in document order.
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl StatementDoc {
    /// Reads a decoded statement from a JSON token file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let doc = serde_json::from_reader(BufReader::new(file))?;
        Ok(doc)
    }
}

fn iso_date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("valid date regex"))
}

/// Derives the statement date from the document's file name.
///
/// The file name is expected to contain an ISO `YYYY-MM-DD` token, e.g.
/// `Statement_2021-01-08.json`. A name with no parsable date is fatal for
/// that document.
pub fn date_from_file_name(path: &Path) -> Result<NaiveDate> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    iso_date_pattern()
        .find(&name)
        .and_then(|m| NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d").ok())
        .ok_or(LoadError::UndatableDocument { name })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_from_typical_name() {
        let date = date_from_file_name(Path::new("data/Statement_2021-01-08.items.json")).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2021, 1, 8).unwrap());
    }

    #[test]
    fn test_date_with_parenthesized_suffix() {
        let date = date_from_file_name(Path::new("Statement_2022-07-22(1).json")).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2022, 7, 22).unwrap());
    }

    #[test]
    fn test_undatable_name_is_fatal() {
        let err = date_from_file_name(Path::new("statement.json")).unwrap_err();
        assert!(matches!(err, LoadError::UndatableDocument { .. }));
    }

    #[test]
    fn test_nonsense_date_is_fatal() {
        // Matches the shape but not a real calendar date.
        let err = date_from_file_name(Path::new("Statement_2021-13-45.json")).unwrap_err();
        assert!(matches!(err, LoadError::UndatableDocument { .. }));
    }

    #[test]
    fn test_doc_deserializes_with_missing_fields() {
        let doc: StatementDoc =
            serde_json::from_str(r#"{"pages":[{"words":[{"text":"Earnings","x0":50.0,"top":100.0}]}]}"#)
                .unwrap();
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(doc.pages[0].words[0].text, "Earnings");
        assert!(doc.pages[0].tables.is_empty());
    }
}
