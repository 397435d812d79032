//! Dividend history mapper for the investors page.

use serde_json::Value;

use crate::content::model::{DividendData, DividendRow};
use crate::content::probe::{self, Precedence};
use crate::content::text::{format_date, parse_cms_date};

const PRECEDENCE: Precedence = Precedence::AttributesFirst;

/// Maps the `DividendHistory` component of the investors single type.
///
/// Rows without a financial year are dropped. Record dates that parse as
/// dates are shown long-form; anything else is shown as entered.
#[must_use]
pub fn map_dividend_data(raw: &Value) -> Option<DividendData> {
    let entity = probe::single(raw)?;
    let table = probe::field_any(
        entity,
        &["DividendHistory", "Dividend", "dividendHistory"],
        PRECEDENCE,
    )?;
    let p = Precedence::FlatFirst;

    let rows: Vec<DividendRow> = probe::list(table, &["Rows", "rows", "Table"], p)
        .into_iter()
        .filter_map(row)
        .collect();
    if rows.is_empty() {
        return None;
    }

    Some(DividendData {
        heading: probe::text(table, &["Heading", "Title", "heading"], p)
            .unwrap_or_else(|| "Dividend History".to_string()),
        note: probe::text(table, &["Note", "Footnote", "note"], p),
        rows,
    })
}

fn row(item: &Value) -> Option<DividendRow> {
    let p = Precedence::FlatFirst;
    let financial_year = probe::text(item, &["FinancialYear", "financialYear", "Year"], p)?;
    let record_date = probe::text(item, &["RecordDate", "recordDate"], p)
        .map(|raw| {
            if parse_cms_date(&raw).is_some() {
                format_date(Some(&raw))
            } else {
                raw
            }
        })
        .unwrap_or_default();
    Some(DividendRow {
        financial_year,
        record_date,
        dividend_per_share: probe::text(item, &["DividendPerShare", "dividendPerShare"], p)
            .unwrap_or_default(),
        dividend_percent: probe::text(
            item,
            &["DividendPercentage", "DividendPercent", "dividendPercentage"],
            p,
        )
        .unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_rows() {
        let raw = json!({"data": {"attributes": {"DividendHistory": {
            "Heading": "Dividend History",
            "Note": "Face value ₹2 per share",
            "Rows": [
                {"FinancialYear": "2024-25", "RecordDate": "2025-07-11", "DividendPerShare": "₹ 12.00", "DividendPercentage": "600%"},
                {"FinancialYear": "2023-24", "RecordDate": "As per AGM notice", "DividendPerShare": 8, "DividendPercentage": "400%"},
                {"RecordDate": "2023-07-01"}
            ]
        }}}});
        let data = map_dividend_data(&raw).unwrap();
        assert_eq!(data.rows.len(), 2);
        assert_eq!(data.rows[0].record_date, "July 11, 2025");
        assert_eq!(data.rows[1].record_date, "As per AGM notice");
        assert_eq!(data.rows[1].dividend_per_share, "8");
        assert_eq!(data.note.as_deref(), Some("Face value ₹2 per share"));
    }

    #[test]
    fn default_heading() {
        let raw = json!({"data": {"DividendHistory": {"Rows": [{"FinancialYear": "2024-25"}]}}});
        assert_eq!(map_dividend_data(&raw).unwrap().heading, "Dividend History");
    }

    #[test]
    fn no_rows_is_none() {
        let raw = json!({"data": {"DividendHistory": {"Rows": []}}});
        assert!(map_dividend_data(&raw).is_none());
        assert!(map_dividend_data(&json!({"data": {"id": 1}})).is_none());
    }
}
