//! Position-aware layout parser, the primary strategy.
//!
//! Column geometry is derived from the header tokens of each page rather
//! than hard-coded offsets, because vendors move columns around between
//! statement versions. The parser locates the earnings header line, reads
//! the x-offsets of the amount columns from it, then reconstructs rows by
//! vertical proximity and classifies each token by its horizontal position.
//!
//! Tokens beyond the right-edge cutoff belong to an independent side table
//! (deposit summary, time-off quotas) and are parsed separately with their
//! own geometry.

use crate::amount::is_amount;
use crate::item::{push_row, ItemRecord};
use crate::page::{Page, Word};
use log::debug;

/// Two tokens within this vertical distance sit on the same visual line.
pub const LINE_TOLERANCE: f64 = 2.0;

/// Fixed margin left of the current-amount column; description tokens end
/// here.
pub const COLUMN_MARGIN: f64 = 6.0;

/// The year-to-date column extends this far right of its marker; anything
/// beyond is side-table territory.
pub const SIDE_TABLE_OFFSET: f64 = 90.0;

/// Marker identifying the earnings section header line.
const SECTION_MARKER: &str = "Earnings";

/// Markers identifying the year-to-date column within the header line.
const YTD_MARKERS: [&str; 2] = ["Year-To-Date", "YTD"];

/// A row containing one of these ends the section, inclusive of that row's
/// full visual line.
const TERMINAL_MARKERS: [&str; 2] = ["Total Net Pay", "Deposited to"];

/// Side-table row entering the three-column quota sub-mode.
const QUOTA_BEGIN: &str = "Time Off Balances";

/// Side-table row exiting the quota sub-mode.
const QUOTA_END: &str = "Total Time Off";

/// Header-derived x-offsets of the two amount columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnBounds {
    /// Left edge of the current-amount column.
    pub amount_col: f64,

    /// Left edge of the year-to-date column.
    pub ytd_col: f64,
}

impl ColumnBounds {
    fn cutoff(&self) -> f64 {
        self.ytd_col + SIDE_TABLE_OFFSET
    }
}

fn same_line(a: f64, b: f64) -> bool {
    (a - b).abs() <= LINE_TOLERANCE
}

/// Finds the earnings header line and reads the column geometry from it.
///
/// Returns the header line's vertical offset together with the bounds, or
/// `None` when either column marker is missing, in which case the caller
/// falls back to the drawn-grid strategy.
pub fn detect_column_bounds(words: &[Word]) -> Option<(f64, ColumnBounds)> {
    let header = words.iter().find(|w| w.text.contains(SECTION_MARKER))?;

    let header_line: Vec<&Word> = words
        .iter()
        .filter(|w| same_line(w.top, header.top))
        .collect();

    let is_ytd = |w: &Word| YTD_MARKERS.iter().any(|m| w.text.contains(m));

    let amount_col = header_line
        .iter()
        .find(|w| w.text.contains("Amount") && !is_ytd(w))
        .map(|w| w.x0)?;
    let ytd_col = header_line.iter().find(|w| is_ytd(w)).map(|w| w.x0)?;

    Some((header.top, ColumnBounds { amount_col, ytd_col }))
}

/// Groups words into visual lines by vertical proximity.
///
/// Rows come back in top-to-bottom order, words within a row left to right.
fn group_rows<'a>(words: impl Iterator<Item = &'a Word>) -> Vec<Vec<&'a Word>> {
    let mut sorted: Vec<&Word> = words.collect();
    sorted.sort_by(|a, b| {
        a.top
            .partial_cmp(&b.top)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.x0.partial_cmp(&b.x0).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut rows: Vec<Vec<&Word>> = Vec::new();
    for word in sorted {
        match rows.last_mut() {
            Some(row) if same_line(row[0].top, word.top) => row.push(word),
            _ => rows.push(vec![word]),
        }
    }
    for row in &mut rows {
        row.sort_by(|a, b| a.x0.partial_cmp(&b.x0).unwrap_or(std::cmp::Ordering::Equal));
    }
    rows
}

fn row_text(row: &[&Word]) -> String {
    row.iter()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds a main-section record from a row, classifying tokens by column.
fn classify_main_row(row: &[&Word], bounds: &ColumnBounds) -> Option<ItemRecord> {
    let mut desc_tokens: Vec<&str> = Vec::new();
    let mut cur = None;
    let mut ytd = None;

    for word in row {
        if word.x0 < bounds.amount_col - COLUMN_MARGIN {
            desc_tokens.push(&word.text);
        } else if is_amount(&word.text) {
            if word.x0 < bounds.ytd_col {
                cur.get_or_insert_with(|| word.text.clone());
            } else {
                ytd.get_or_insert_with(|| word.text.clone());
            }
        } else {
            // Stray text inside the amount zone still belongs to the label.
            desc_tokens.push(&word.text);
        }
    }

    let desc = desc_tokens.join(" ");
    if desc.is_empty() && cur.is_none() && ytd.is_none() {
        return None;
    }

    Some(ItemRecord {
        desc,
        cur,
        ytd,
        ..ItemRecord::default()
    })
}

/// Builds a quota record: the trailing three numeric columns are
/// earned/used/balance. Rows without three amounts fall back to the
/// standard two-column split.
fn classify_quota_row(values: &[&str]) -> Option<ItemRecord> {
    let trailing = values.iter().rev().take_while(|v| is_amount(v)).count();

    if trailing >= 3 {
        let desc_len = values.len() - 3;
        Some(ItemRecord {
            desc: values[..desc_len].join(" "),
            earned: Some(values[desc_len].to_string()),
            used: Some(values[desc_len + 1].to_string()),
            balance: Some(values[desc_len + 2].to_string()),
            ..ItemRecord::default()
        })
    } else {
        crate::grid::parse_cell(&values.join(" "))
    }
}

/// Parses the side table independently of the main section.
///
/// Standard rows carry the two-column current/year-to-date geometry; the
/// quota sub-mode (three numeric columns: earned, used, balance) is entered
/// and exited by marker rows which are themselves excluded from output.
fn parse_side_table(rows: &[Vec<&Word>]) -> Vec<Vec<ItemRecord>> {
    let mut out = Vec::new();
    let mut quota_mode = false;

    for row in rows {
        let text = row_text(row);
        if text == QUOTA_BEGIN {
            quota_mode = true;
            continue;
        }
        if text.starts_with(QUOTA_END) {
            quota_mode = false;
            continue;
        }

        let values: Vec<&str> = row.iter().map(|w| w.text.as_str()).collect();
        let record = if quota_mode {
            classify_quota_row(&values)
        } else {
            crate::grid::parse_cell(&values.join(" "))
        };

        if let Some(record) = record {
            push_row(&mut out, vec![record]);
        }
    }

    out
}

/// Parses one page of positioned words into line-item rows.
///
/// Returns `None` when the header-relative column detection fails; the
/// caller then tries the drawn-grid fallback. Output order is the main
/// earnings section first, then the side-table items.
pub fn parse_words(words: &[Word]) -> Option<Vec<Vec<ItemRecord>>> {
    let (header_top, bounds) = detect_column_bounds(words)?;
    debug!(
        "detected columns: amount at {}, year-to-date at {}",
        bounds.amount_col, bounds.ytd_col
    );

    let body = words
        .iter()
        .filter(|w| w.top > header_top + LINE_TOLERANCE);
    let rows = group_rows(body);

    let cutoff = bounds.cutoff();
    let mut main_rows = Vec::new();
    let mut side_rows: Vec<Vec<&Word>> = Vec::new();

    for row in &rows {
        let (main, side): (Vec<&Word>, Vec<&Word>) =
            row.iter().copied().partition(|w| w.x0 <= cutoff);

        if !side.is_empty() {
            side_rows.push(side);
        }
        if main.is_empty() {
            continue;
        }

        let text = row_text(&main);
        let terminal = TERMINAL_MARKERS.iter().any(|m| text.contains(m));

        if let Some(record) = classify_main_row(&main, &bounds) {
            push_row(&mut main_rows, vec![record]);
        }

        if terminal {
            break;
        }
    }

    let mut items = main_rows;
    items.extend(parse_side_table(&side_rows));
    Some(items)
}

/// Parses a whole page: positional strategy first, drawn-grid fallback
/// second. Both failing yields zero items, flagged for manual review.
pub fn parse_page(page: &Page) -> Vec<Vec<ItemRecord>> {
    if let Some(items) = parse_words(&page.words) {
        return items;
    }

    debug!("column detection failed, trying drawn-grid fallback");
    let items = crate::grid::parse_tables(&page.tables);
    if items.is_empty() && (!page.words.is_empty() || !page.tables.is_empty()) {
        log::warn!("no line items recognized on page; manual review needed");
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, x0: f64, top: f64) -> Word {
        Word {
            text: text.to_string(),
            x0,
            top,
        }
    }

    fn header_words() -> Vec<Word> {
        vec![
            word("Earnings", 50.0, 100.0),
            word("Amount", 200.0, 100.0),
            word("Year-To-Date", 260.0, 100.0),
        ]
    }

    #[test]
    fn test_detect_column_bounds() {
        let (top, bounds) = detect_column_bounds(&header_words()).unwrap();
        assert_eq!(top, 100.0);
        assert_eq!(bounds.amount_col, 200.0);
        assert_eq!(bounds.ytd_col, 260.0);
    }

    #[test]
    fn test_detect_fails_without_ytd_marker() {
        let words = vec![word("Earnings", 50.0, 100.0), word("Amount", 200.0, 100.0)];
        assert!(detect_column_bounds(&words).is_none());
    }

    #[test]
    fn test_detect_tolerates_slight_vertical_jitter() {
        let words = vec![
            word("Earnings", 50.0, 100.0),
            word("Amount", 200.0, 101.4),
            word("Year-To-Date", 260.0, 98.9),
        ];
        let (_, bounds) = detect_column_bounds(&words).unwrap();
        assert_eq!(bounds.amount_col, 200.0);
        assert_eq!(bounds.ytd_col, 260.0);
    }

    #[test]
    fn test_parse_words_basic_section() {
        let mut words = header_words();
        words.extend([
            word("Regular", 50.0, 120.0),
            word("Salary", 85.0, 120.0),
            word("80.00", 140.0, 120.0),
            word("1000.00", 200.0, 120.0),
            word("5000.00", 260.0, 120.0),
            word("Total", 50.0, 140.0),
            word("Net", 75.0, 140.0),
            word("Pay", 95.0, 140.0),
            word("800.00", 200.0, 140.0),
        ]);

        let items = parse_words(&words).unwrap();
        assert_eq!(items.len(), 2);

        assert_eq!(items[0][0].desc, "Regular Salary 80.00");
        assert_eq!(items[0][0].cur.as_deref(), Some("1000.00"));
        assert_eq!(items[0][0].ytd.as_deref(), Some("5000.00"));

        assert_eq!(items[1][0].desc, "Total Net Pay");
        assert_eq!(items[1][0].cur.as_deref(), Some("800.00"));
    }

    #[test]
    fn test_rows_after_terminal_marker_excluded() {
        let mut words = header_words();
        words.extend([
            word("Bonus", 50.0, 120.0),
            word("500.00", 200.0, 120.0),
            word("Total", 50.0, 140.0),
            word("Net", 75.0, 140.0),
            word("Pay", 95.0, 140.0),
            word("500.00", 200.0, 140.0),
            word("Footer", 50.0, 160.0),
            word("9.99", 200.0, 160.0),
        ]);

        let items = parse_words(&words).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1][0].desc, "Total Net Pay");
    }

    #[test]
    fn test_continuation_row_merges() {
        let mut words = header_words();
        words.extend([
            word("Tax", 50.0, 120.0),
            word("Deductions:", 70.0, 120.0),
            word("Federal", 120.0, 120.0),
            word("Withholding", 50.0, 140.0),
            word("Tax", 105.0, 140.0),
            word("200.00-", 200.0, 140.0),
            word("Total", 50.0, 160.0),
            word("Net", 75.0, 160.0),
            word("Pay", 95.0, 160.0),
            word("800.00", 200.0, 160.0),
        ]);

        let items = parse_words(&words).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0][0].desc, "Tax Deductions: Federal");
        assert_eq!(items[0][0].cur.as_deref(), Some("200.00-"));
    }

    #[test]
    fn test_side_table_two_column_rows() {
        let mut words = header_words();
        words.extend([
            word("Bonus", 50.0, 120.0),
            word("500.00", 200.0, 120.0),
            // Side table: right of ytd_col + offset (350.0 cutoff).
            word("Gross", 400.0, 120.0),
            word("Pay", 430.0, 120.0),
            word("1200.00", 470.0, 120.0),
            word("8400.00", 520.0, 120.0),
            word("Total", 50.0, 140.0),
            word("Net", 75.0, 140.0),
            word("Pay", 95.0, 140.0),
            word("500.00", 200.0, 140.0),
        ]);

        let items = parse_words(&words).unwrap();
        assert_eq!(items.len(), 3);

        let side = &items[2][0];
        assert_eq!(side.desc, "Gross Pay");
        assert_eq!(side.cur.as_deref(), Some("1200.00"));
        assert_eq!(side.ytd.as_deref(), Some("8400.00"));
    }

    #[test]
    fn test_side_table_quota_mode() {
        let mut words = header_words();
        words.extend([
            word("Bonus", 50.0, 120.0),
            word("500.00", 200.0, 120.0),
            word("Time", 400.0, 120.0),
            word("Off", 430.0, 120.0),
            word("Balances", 450.0, 120.0),
            word("PTO", 400.0, 140.0),
            word("252.24", 425.0, 140.0),
            word("120.00", 460.0, 140.0),
            word("40.00", 495.0, 140.0),
            word("80.00", 530.0, 140.0),
            word("Total", 400.0, 160.0),
            word("Time", 430.0, 160.0),
            word("Off", 455.0, 160.0),
            word("Total", 50.0, 180.0),
            word("Net", 75.0, 180.0),
            word("Pay", 95.0, 180.0),
            word("500.00", 200.0, 180.0),
        ]);

        let items = parse_words(&words).unwrap();
        // Bonus, Total Net Pay, then the single quota row; both quota
        // markers are excluded.
        assert_eq!(items.len(), 3);

        let quota = &items[2][0];
        assert_eq!(quota.desc, "PTO 252.24");
        assert_eq!(quota.earned.as_deref(), Some("120.00"));
        assert_eq!(quota.used.as_deref(), Some("40.00"));
        assert_eq!(quota.balance.as_deref(), Some("80.00"));
    }

    #[test]
    fn test_parse_page_falls_back_to_grid() {
        let page = Page {
            words: vec![word("No", 10.0, 10.0), word("header", 40.0, 10.0)],
            tables: vec![vec![
                vec![Some("Earnings Amount Year-To-Date".to_string())],
                vec![Some("Bonus 500.00 1500.00".to_string())],
            ]],
        };

        let items = parse_page(&page);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0][0].desc, "Bonus");
        assert_eq!(items[0][0].cur.as_deref(), Some("500.00"));
    }
}
