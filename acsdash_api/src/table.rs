//! Validated tabular responses.
//!
//! The Census API answers every query with a JSON array of string arrays:
//! the first row carries the ordered header names, each following row is
//! one geographic unit. [`RawTable`] is the validated form of that shape.

use serde_json::Value;

use crate::Error;

/// A parsed and shape-checked API response table.
///
/// Invariant: every row has exactly as many cells as the header row. A
/// response violating this is rejected whole rather than truncated.
#[derive(Clone, Debug)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Parses a response body and validates its shape.
    ///
    /// Rejected with [`Error::Format`]: bodies that are not JSON arrays,
    /// arrays with fewer than two rows (header plus at least one value
    /// row), rows whose width differs from the header row, and cells that
    /// are not strings, numbers, or null. Null cells decode as empty
    /// strings; the API uses them for unavailable values.
    pub fn parse(body: &str) -> Result<Self, Error> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| Error::Format(format!("response is not valid JSON: {}", e)))?;
        let outer = match value {
            Value::Array(rows) => rows,
            _ => return Err(Error::Format("response is not a JSON array".to_string())),
        };
        if outer.len() < 2 {
            return Err(Error::Format(format!(
                "expected a header row and at least one value row, got {} row(s)",
                outer.len()
            )));
        }

        let mut iter = outer.into_iter();
        let headers = parse_row(iter.next().expect("length checked above"), 0)?;
        let mut rows = Vec::new();
        for (i, raw_row) in iter.enumerate() {
            let row = parse_row(raw_row, i + 1)?;
            if row.len() != headers.len() {
                return Err(Error::Format(format!(
                    "row {} has {} cells, header has {}",
                    i + 1,
                    row.len(),
                    headers.len()
                )));
            }
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Index of a column by header name.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell value by row index and header name.
    pub fn cell(&self, row: usize, name: &str) -> Option<&str> {
        let col = self.column(name)?;
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Integer cell value. Unparsable cells read as 0, and so do the
    /// negative sentinels the ACS uses for suppressed estimates
    /// (e.g. -666666666 for medians).
    pub fn count(&self, row: usize, name: &str) -> i64 {
        self.cell(row, name)
            .and_then(|s| s.trim().parse::<i64>().ok())
            .unwrap_or(0)
            .max(0)
    }
}

fn parse_row(raw: Value, index: usize) -> Result<Vec<String>, Error> {
    let cells = match raw {
        Value::Array(cells) => cells,
        _ => {
            return Err(Error::Format(format!("row {} is not an array", index)));
        }
    };
    cells
        .into_iter()
        .map(|cell| match cell {
            Value::String(s) => Ok(s),
            Value::Null => Ok(String::new()),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(Error::Format(format!(
                "row {} contains a non-scalar cell: {}",
                index, other
            ))),
        })
        .collect()
}
