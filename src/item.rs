//! Line-item records bridging the layout parsers and the posting engine.
//!
//! Both parsing strategies produce the same intermediate form: a sequence of
//! rows, each row holding one or more records. Amounts stay as the printed
//! decimal strings here; the posting engine lexes them when it needs values.

use serde::{Deserialize, Serialize};

/// A row whose description equals this marker extends the previous row's
/// line item instead of starting a new one.
pub const CONTINUATION_MARKER: &str = "Withholding Tax";

/// One recognized record within a statement row.
///
/// The main earnings/deductions section fills `cur`/`ytd`; the side table's
/// quota sub-section fills `earned`/`used`/`balance` instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Printed description of the line item.
    pub desc: String,

    /// Current-period amount, as printed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cur: Option<String>,

    /// Year-to-date amount, as printed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ytd: Option<String>,

    /// Quota earned this period.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earned: Option<String>,

    /// Quota used this period.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used: Option<String>,

    /// Quota balance remaining.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<String>,
}

impl ItemRecord {
    /// A plain description-only record.
    pub fn desc_only(desc: impl Into<String>) -> Self {
        ItemRecord {
            desc: desc.into(),
            ..ItemRecord::default()
        }
    }
}

/// Appends a parsed row to `rows`, applying the continuation-merge policy.
///
/// A row whose leading description is the continuation marker takes over the
/// previous row's description and replaces that row's leading record, so the
/// marker itself is never emitted as a standalone line item.
pub fn push_row(rows: &mut Vec<Vec<ItemRecord>>, mut row: Vec<ItemRecord>) {
    if row.is_empty() {
        return;
    }

    if row[0].desc == CONTINUATION_MARKER {
        if let Some(prev) = rows.last_mut() {
            row[0].desc = prev[0].desc.clone();
            prev[0] = row.remove(0);
            return;
        }
        // A continuation with nothing before it has no item to extend.
        log::warn!("continuation row with no preceding line item, dropping");
        return;
    }

    rows.push(row);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(desc: &str, cur: Option<&str>) -> ItemRecord {
        ItemRecord {
            desc: desc.to_string(),
            cur: cur.map(str::to_string),
            ..ItemRecord::default()
        }
    }

    #[test]
    fn test_plain_rows_append() {
        let mut rows = Vec::new();
        push_row(&mut rows, vec![record("Regular Salary 80.00", Some("1000.00"))]);
        push_row(&mut rows, vec![record("Bonus", Some("500.00"))]);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_continuation_replaces_previous_record() {
        let mut rows = Vec::new();
        push_row(&mut rows, vec![record("Tax Deductions: Federal", None)]);
        push_row(&mut rows, vec![record(CONTINUATION_MARKER, Some("200.00-"))]);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0].desc, "Tax Deductions: Federal");
        assert_eq!(rows[0][0].cur.as_deref(), Some("200.00-"));
    }

    #[test]
    fn test_continuation_never_emitted_standalone() {
        let mut rows = Vec::new();
        push_row(&mut rows, vec![record(CONTINUATION_MARKER, Some("10.00"))]);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_record_serialization_omits_absent_fields() {
        let json = serde_json::to_string(&record("Bonus", Some("500.00"))).unwrap();
        assert_eq!(json, r#"{"desc":"Bonus","cur":"500.00"}"#);
    }
}
