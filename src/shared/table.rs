//! Columnar table payloads.
//!
//! Every ISS block arrives as `{"columns": [...], "data": [[...], ...]}`.
//! [`Table`] keeps that shape addressable by column name, validates it on
//! ingest, and serializes back to the same columnar form for downstream
//! sinks. No async, no network calls.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TableError;

// ─── Wire block ──────────────────────────────────────────────────────────────

/// Raw ISS block as deserialized from the response body.
///
/// The `metadata` key the server also sends is ignored. Row widths are not
/// checked here; conversion into [`Table`] is where the shape is validated.
#[derive(Debug, Clone, Deserialize)]
pub struct TableBlock {
    pub columns: Vec<String>,
    pub data: Vec<Vec<Value>>,
}

// ─── Table ───────────────────────────────────────────────────────────────────

/// A validated columnar table: every row is exactly as wide as `columns`.
///
/// Serializes to the same `{"columns": [...], "data": [[...], ...]}` shape it
/// was read from, so a projected table can be handed to a columnar sink
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    #[serde(rename = "data")]
    rows: Vec<Vec<Value>>,
}

impl TryFrom<TableBlock> for Table {
    type Error = TableError;

    fn try_from(block: TableBlock) -> Result<Self, Self::Error> {
        let expected = block.columns.len();
        for (row, cells) in block.data.iter().enumerate() {
            if cells.len() != expected {
                return Err(TableError::Shape {
                    row,
                    expected,
                    found: cells.len(),
                });
            }
        }
        Ok(Table {
            columns: block.columns,
            rows: block.data,
        })
    }
}

impl Table {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names, in payload order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.index_of(column).is_some()
    }

    fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// View of row `row`, or `None` past the end.
    pub fn row(&self, row: usize) -> Option<RowView<'_>> {
        (row < self.rows.len()).then_some(RowView { table: self, row })
    }

    /// Iterate over all rows in order.
    pub fn rows(&self) -> impl Iterator<Item = RowView<'_>> {
        (0..self.rows.len()).map(move |row| RowView { table: self, row })
    }

    /// New table with only the named columns, in the given order.
    ///
    /// A column absent upstream is an error, never silently padded.
    pub fn project(&self, columns: &[&str]) -> Result<Table, TableError> {
        let mut indices = Vec::with_capacity(columns.len());
        for &column in columns {
            let index = self
                .index_of(column)
                .ok_or_else(|| TableError::UnknownColumn(column.to_string()))?;
            indices.push(index);
        }
        let rows = self
            .rows
            .iter()
            .map(|cells| indices.iter().map(|&i| cells[i].clone()).collect())
            .collect();
        Ok(Table {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        })
    }

    /// New table keeping only the rows for which `keep` returns true.
    pub fn filter<F>(&self, mut keep: F) -> Result<Table, TableError>
    where
        F: FnMut(RowView<'_>) -> Result<bool, TableError>,
    {
        let mut rows = Vec::new();
        for view in self.rows() {
            if keep(view)? {
                rows.push(self.rows[view.row].clone());
            }
        }
        Ok(Table {
            columns: self.columns.clone(),
            rows,
        })
    }

    /// Rows whose string cell in `column` equals `value`.
    ///
    /// Null or non-string cells never match. The column itself must exist.
    pub fn filter_eq(&self, column: &str, value: &str) -> Result<Table, TableError> {
        if !self.has_column(column) {
            return Err(TableError::MissingColumn(column.to_string()));
        }
        self.filter(|row| Ok(row.opt_str(column)? == Some(value)))
    }

    /// Last `n` rows (all of them when `n >= len`).
    pub fn tail(&self, n: usize) -> Table {
        let skip = self.rows.len().saturating_sub(n);
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().skip(skip).cloned().collect(),
        }
    }

    /// Append all rows of `other`. The column lists must match exactly,
    /// by name and order.
    pub fn append(&mut self, other: Table) -> Result<(), TableError> {
        if self.columns != other.columns {
            return Err(TableError::ColumnMismatch {
                expected: self.columns.clone(),
                found: other.columns,
            });
        }
        self.rows.extend(other.rows);
        Ok(())
    }

    /// Convert every row into `T`.
    pub fn typed<T>(&self) -> Result<Vec<T>, TableError>
    where
        T: for<'a> TryFrom<RowView<'a>, Error = TableError>,
    {
        self.rows().map(T::try_from).collect()
    }
}

// ─── Row view ────────────────────────────────────────────────────────────────

/// Borrowed view of one table row, addressed by column name.
///
/// `as_*` accessors treat JSON `null` as an error; `opt_*` accessors map it
/// to `None`. Dates and times are the ISS string forms (`2021-05-04`,
/// `10:58:31`, `2021-05-04 10:58:31`).
#[derive(Clone, Copy)]
pub struct RowView<'a> {
    table: &'a Table,
    row: usize,
}

impl<'a> RowView<'a> {
    /// Zero-based row index, for diagnostics.
    pub fn index(&self) -> usize {
        self.row
    }

    /// Raw JSON cell under `column`.
    pub fn raw(&self, column: &str) -> Result<&'a Value, TableError> {
        let index = self
            .table
            .index_of(column)
            .ok_or_else(|| TableError::MissingColumn(column.to_string()))?;
        Ok(&self.table.rows[self.row][index])
    }

    fn cell_err(&self, column: &str, expected: &'static str) -> TableError {
        TableError::Cell {
            row: self.row,
            column: column.to_string(),
            expected,
        }
    }

    pub fn opt_str(&self, column: &str) -> Result<Option<&'a str>, TableError> {
        match self.raw(column)? {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            _ => Err(self.cell_err(column, "string")),
        }
    }

    pub fn as_str(&self, column: &str) -> Result<&'a str, TableError> {
        self.opt_str(column)?
            .ok_or_else(|| self.cell_err(column, "string"))
    }

    pub fn opt_f64(&self, column: &str) -> Result<Option<f64>, TableError> {
        match self.raw(column)? {
            Value::Null => Ok(None),
            Value::Number(n) => n
                .as_f64()
                .map(Some)
                .ok_or_else(|| self.cell_err(column, "number")),
            _ => Err(self.cell_err(column, "number")),
        }
    }

    pub fn as_f64(&self, column: &str) -> Result<f64, TableError> {
        self.opt_f64(column)?
            .ok_or_else(|| self.cell_err(column, "number"))
    }

    pub fn as_i64(&self, column: &str) -> Result<i64, TableError> {
        match self.raw(column)? {
            Value::Number(n) => n
                .as_i64()
                .ok_or_else(|| self.cell_err(column, "integer")),
            _ => Err(self.cell_err(column, "integer")),
        }
    }

    pub fn opt_u64(&self, column: &str) -> Result<Option<u64>, TableError> {
        match self.raw(column)? {
            Value::Null => Ok(None),
            Value::Number(n) => n
                .as_u64()
                .map(Some)
                .ok_or_else(|| self.cell_err(column, "unsigned integer")),
            _ => Err(self.cell_err(column, "unsigned integer")),
        }
    }

    pub fn as_u64(&self, column: &str) -> Result<u64, TableError> {
        self.opt_u64(column)?
            .ok_or_else(|| self.cell_err(column, "unsigned integer"))
    }

    pub fn opt_date(&self, column: &str) -> Result<Option<NaiveDate>, TableError> {
        match self.opt_str(column)? {
            None => Ok(None),
            Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| self.cell_err(column, "date (YYYY-MM-DD)")),
        }
    }

    pub fn as_date(&self, column: &str) -> Result<NaiveDate, TableError> {
        self.opt_date(column)?
            .ok_or_else(|| self.cell_err(column, "date (YYYY-MM-DD)"))
    }

    pub fn opt_time(&self, column: &str) -> Result<Option<NaiveTime>, TableError> {
        match self.opt_str(column)? {
            None => Ok(None),
            Some(s) => NaiveTime::parse_from_str(s, "%H:%M:%S")
                .map(Some)
                .map_err(|_| self.cell_err(column, "time (HH:MM:SS)")),
        }
    }

    pub fn as_time(&self, column: &str) -> Result<NaiveTime, TableError> {
        self.opt_time(column)?
            .ok_or_else(|| self.cell_err(column, "time (HH:MM:SS)"))
    }

    pub fn as_datetime(&self, column: &str) -> Result<NaiveDateTime, TableError> {
        match self.opt_str(column)? {
            Some(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                .map_err(|_| self.cell_err(column, "datetime (YYYY-MM-DD HH:MM:SS)")),
            None => Err(self.cell_err(column, "datetime (YYYY-MM-DD HH:MM:SS)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn block(columns: &[&str], data: Value) -> TableBlock {
        serde_json::from_value(json!({
            "metadata": {},
            "columns": columns,
            "data": data,
        }))
        .unwrap()
    }

    fn sample() -> Table {
        Table::try_from(block(
            &["BOARDID", "SECID", "LAST", "VOLTODAY", "TRADEDATE"],
            json!([
                ["TQBR", "SBER", 307.5, 1000, "2024-03-01"],
                ["SMAL", "SBER", null, null, "2024-03-01"],
                ["TQBR", "GAZP", 163.2, 500, "2024-03-04"],
            ]),
        ))
        .unwrap()
    }

    #[test]
    fn test_ingest_validates_row_width() {
        let err = Table::try_from(block(
            &["A", "B"],
            json!([[1, 2], [1, 2, 3]]),
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            TableError::Shape {
                row: 1,
                expected: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn test_metadata_key_is_ignored() {
        let t = sample();
        assert_eq!(t.len(), 3);
        assert_eq!(t.columns()[0], "BOARDID");
    }

    #[test]
    fn test_project_keeps_order_and_rejects_unknown() {
        let t = sample();
        let p = t.project(&["LAST", "SECID"]).unwrap();
        assert_eq!(p.columns(), ["LAST", "SECID"]);
        assert_eq!(p.row(0).unwrap().as_str("SECID").unwrap(), "SBER");

        let err = t.project(&["LAST", "BOGUS"]).unwrap_err();
        assert!(matches!(err, TableError::UnknownColumn(c) if c == "BOGUS"));
    }

    #[test]
    fn test_filter_eq_matches_strings_only() {
        let t = sample();
        let tqbr = t.filter_eq("BOARDID", "TQBR").unwrap();
        assert_eq!(tqbr.len(), 2);

        // null cells never match
        let none = t.filter_eq("LAST", "307.5").unwrap();
        assert!(none.is_empty());

        let err = t.filter_eq("NOPE", "x").unwrap_err();
        assert!(matches!(err, TableError::MissingColumn(c) if c == "NOPE"));
    }

    #[test]
    fn test_filter_with_predicate() {
        let t = sample();
        let recent = t
            .filter(|row| {
                Ok(row.opt_date("TRADEDATE")?
                    .is_some_and(|d| d > NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()))
            })
            .unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent.row(0).unwrap().as_str("SECID").unwrap(), "GAZP");
    }

    #[test]
    fn test_tail_keeps_the_last_rows_and_clamps() {
        let t = sample();
        let last = t.tail(1);
        assert_eq!(last.len(), 1);
        assert_eq!(last.row(0).unwrap().as_str("SECID").unwrap(), "GAZP");
        assert_eq!(t.tail(10).len(), 3);
    }

    #[test]
    fn test_append_requires_same_columns() {
        let mut t = sample();
        let more = sample();
        t.append(more).unwrap();
        assert_eq!(t.len(), 6);

        let other = Table::try_from(block(&["X"], json!([[1]]))).unwrap();
        let err = t.append(other).unwrap_err();
        assert!(matches!(err, TableError::ColumnMismatch { .. }));
    }

    #[test]
    fn test_append_reordered_columns_is_a_mismatch() {
        let mut t = Table::try_from(block(
            &["SECID", "LAST"],
            json!([["SBER", 307.5]]),
        ))
        .unwrap();
        let swapped = Table::try_from(block(
            &["LAST", "SECID"],
            json!([[163.2, "GAZP"]]),
        ))
        .unwrap();

        let err = t.append(swapped).unwrap_err();
        assert!(matches!(
            err,
            TableError::ColumnMismatch { ref expected, ref found }
                if expected == &["SECID", "LAST"] && found == &["LAST", "SECID"]
        ));
        // the message shows both lists, not a fake missing column
        assert!(err.to_string().contains(r#"["LAST", "SECID"]"#));
    }

    #[test]
    fn test_scalar_accessors() {
        let t = sample();
        let full = t.row(0).unwrap();
        let sparse = t.row(1).unwrap();

        assert_eq!(full.as_f64("LAST").unwrap(), 307.5);
        assert_eq!(full.as_u64("VOLTODAY").unwrap(), 1000);
        assert_eq!(full.as_i64("VOLTODAY").unwrap(), 1000);
        assert_eq!(
            full.as_date("TRADEDATE").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );

        assert_eq!(sparse.opt_f64("LAST").unwrap(), None);
        assert_eq!(sparse.opt_u64("VOLTODAY").unwrap(), None);
        let err = sparse.as_f64("LAST").unwrap_err();
        assert!(matches!(err, TableError::Cell { row: 1, .. }));
    }

    #[test]
    fn test_time_and_datetime_parsing() {
        let t = Table::try_from(block(
            &["TRADETIME", "begin"],
            json!([["10:58:31", "2024-03-01 10:58:00"]]),
        ))
        .unwrap();
        let row = t.row(0).unwrap();
        assert_eq!(
            row.as_time("TRADETIME").unwrap(),
            NaiveTime::from_hms_opt(10, 58, 31).unwrap()
        );
        assert_eq!(
            row.as_datetime("begin").unwrap().time(),
            NaiveTime::from_hms_opt(10, 58, 0).unwrap()
        );
        let err = row.as_time("begin").unwrap_err();
        assert!(matches!(err, TableError::Cell { .. }));
    }

    #[test]
    fn test_serializes_back_to_columnar_shape() {
        let t = sample().project(&["SECID", "LAST"]).unwrap();
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v["columns"], json!(["SECID", "LAST"]));
        assert_eq!(v["data"][0], json!(["SBER", 307.5]));
    }

    #[test]
    fn test_typed_conversion() {
        struct Pair {
            secid: String,
            last: Option<f64>,
        }
        impl TryFrom<RowView<'_>> for Pair {
            type Error = TableError;
            fn try_from(row: RowView<'_>) -> Result<Self, TableError> {
                Ok(Pair {
                    secid: row.as_str("SECID")?.to_string(),
                    last: row.opt_f64("LAST")?,
                })
            }
        }

        let pairs: Vec<Pair> = sample().typed().unwrap();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0].secid, "SBER");
        assert_eq!(pairs[1].last, None);
    }
}
