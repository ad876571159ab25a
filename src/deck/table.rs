//! Row validation for table slides.

use crate::common::{Error, Result};
use indexmap::IndexMap;

/// One table row: column name to cell text, in insertion order.
pub type TableRow = IndexMap<String, String>;

/// Split `rows` into headers and cells.
///
/// Headers come from the first row's keys; every row's cells are returned in
/// header order.
///
/// # Errors
/// `InvalidInput` when `rows` is empty or a row's key set differs from the
/// first row's.
pub(crate) fn normalize_rows(rows: &[TableRow]) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let first = rows
        .first()
        .ok_or_else(|| Error::invalid("Table needs at least one row"))?;
    let headers: Vec<String> = first.keys().cloned().collect();

    let mut cells = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        if row.len() != headers.len() {
            return Err(Error::invalid(format!(
                "Table row {} has {} columns, expected {}",
                index,
                row.len(),
                headers.len()
            )));
        }
        let ordered = headers
            .iter()
            .map(|header| {
                row.get(header).cloned().ok_or_else(|| {
                    Error::invalid(format!("Table row {} is missing column {:?}", index, header))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        cells.push(ordered);
    }

    Ok((headers, cells))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> TableRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_later_rows_follow_header_order() {
        let rows = vec![
            row(&[("Plan", "Free"), ("Price", "$0")]),
            row(&[("Price", "$10"), ("Plan", "Pro")]),
        ];
        let (headers, cells) = normalize_rows(&rows).unwrap();
        assert_eq!(headers, vec!["Plan", "Price"]);
        assert_eq!(cells[1], vec!["Pro", "$10"]);
    }

    #[test]
    fn test_rejects_empty_and_mismatched_rows() {
        assert!(normalize_rows(&[]).unwrap_err().is_invalid_input());

        let extra = vec![row(&[("Plan", "Free")]), row(&[("Plan", "Pro"), ("Price", "$1")])];
        assert!(normalize_rows(&extra).unwrap_err().is_invalid_input());

        let renamed = vec![row(&[("Plan", "Free")]), row(&[("Tier", "Pro")])];
        assert!(normalize_rows(&renamed).unwrap_err().is_invalid_input());
    }
}
