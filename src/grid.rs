//! Drawn-grid fallback strategy.
//!
//! Some statement versions expose explicit line-drawn table grids instead of
//! free-positioned text. When header-relative column detection fails, cells
//! are taken directly from those grids: the trailing one-or-two
//! whitespace-separated tokens of a cell are split off as the year-to-date
//! and current amounts, and the remainder is the description.

use crate::amount::is_amount;
use crate::item::{push_row, ItemRecord};
use crate::page::GridTable;
use regex::Regex;
use std::sync::OnceLock;

/// A table qualifies as an earnings table only if its header row contains
/// one of these keywords.
const HEADER_KEYWORDS: [&str; 4] = ["Earnings", "Deductions", "Rate", "Hours/Units"];

fn content_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[a-zA-Z0-9,]").expect("valid content regex"))
}

/// Parses one cell into a record, or `None` for cells with no usable
/// content. Also used by the positional parser's side table, whose rows
/// share the same trailing-amount geometry.
pub(crate) fn parse_cell(cell: &str) -> Option<ItemRecord> {
    if !content_pattern().is_match(cell) {
        return None;
    }

    let values: Vec<&str> = cell.split(' ').collect();
    if values.len() > 1 {
        let ytd = values.last().filter(|v| is_amount(v));
        let cur = values.get(values.len() - 2).filter(|v| is_amount(v));

        match (cur, ytd) {
            (_, None) => Some(ItemRecord::desc_only(cell)),
            (None, Some(ytd)) => Some(ItemRecord {
                desc: values[..values.len() - 1].join(" "),
                ytd: Some((*ytd).to_string()),
                ..ItemRecord::default()
            }),
            (Some(cur), Some(ytd)) => Some(ItemRecord {
                desc: values[..values.len() - 2].join(" "),
                cur: Some((*cur).to_string()),
                ytd: Some((*ytd).to_string()),
                ..ItemRecord::default()
            }),
        }
    } else {
        Some(ItemRecord::desc_only(cell))
    }
}

/// Parses one grid row, skipping empty cells.
fn parse_grid_row(row: &[Option<String>]) -> Vec<ItemRecord> {
    row.iter()
        .flatten()
        .filter_map(|cell| parse_cell(cell))
        .collect()
}

/// Checks whether a table's header row marks it as earnings data.
fn is_earnings_table(table: &GridTable) -> bool {
    let Some(header_row) = table.first() else {
        return false;
    };

    let header_text = header_row
        .iter()
        .map(|cell| cell.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ");

    HEADER_KEYWORDS.iter().any(|k| header_text.contains(k))
}

/// Parses one qualifying table into line-item rows, applying the
/// continuation-merge policy.
fn parse_table(table: &GridTable) -> Vec<Vec<ItemRecord>> {
    let mut rows = Vec::new();
    for row in table {
        let row_data = parse_grid_row(row);
        push_row(&mut rows, row_data);
    }
    rows
}

/// Parses every qualifying table on a page; non-earnings tables are
/// ignored.
pub fn parse_tables(tables: &[GridTable]) -> Vec<Vec<ItemRecord>> {
    tables
        .iter()
        .filter(|t| is_earnings_table(t))
        .flat_map(|t| parse_table(t))
        .collect()
}
