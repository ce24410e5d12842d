//! Lexer for accounting-notation amounts.
//!
//! Payroll statements print negative amounts with a trailing minus sign
//! (`200.00-`) and group thousands with commas (`1,234.56`). This module
//! recognizes and normalizes that notation. Malformed input is never an
//! error: the lexer simply reports that no amount is present.

use crate::decimal::Decimal2;
use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;

fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\d+(,\d+)*(\.\d+)?-?$").expect("valid amount regex")
    })
}

/// Returns `true` if `text` looks like a printed amount: digits, optional
/// comma-grouped thousands, optional fractional part, optional trailing `-`.
pub fn is_amount(text: &str) -> bool {
    amount_pattern().is_match(text)
}

/// Parses an accounting-notation amount into a signed two-place decimal.
///
/// A trailing `-` is moved to the front and thousands separators are
/// stripped before numeric parsing. Anything that fails to parse yields
/// `None`, never an error.
///
/// # Examples
///
/// ```
/// use paystub_ledger::amount::parse_amount;
///
/// assert_eq!(parse_amount("200.00-").unwrap().to_string(), "-200.00");
/// assert_eq!(parse_amount("1,234.56").unwrap().to_string(), "1234.56");
/// assert!(parse_amount("abc").is_none());
/// ```
pub fn parse_amount(text: &str) -> Option<Decimal2> {
    let normalized = match text.strip_suffix('-') {
        Some(digits) => format!("-{digits}"),
        None => text.to_string(),
    };
    Decimal2::from_str(&normalized.replace(',', "")).ok()
}
