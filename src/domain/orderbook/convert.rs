//! Conversions from table rows to order book levels.

use chrono::NaiveDateTime;

use crate::domain::orderbook::OrderLevel;
use crate::error::TableError;
use crate::shared::{RowView, Side};

/// Build a level from one `orderbook` row, stamped with the caller's clock.
///
/// The stamp is taken once per snapshot, not per row, so every level of one
/// response carries the same time.
pub(crate) fn level_from_row(
    row: RowView<'_>,
    stamp: NaiveDateTime,
) -> Result<OrderLevel, TableError> {
    let code = row.as_str("BUYSELL")?;
    let side = Side::from_code(code).ok_or_else(|| TableError::Cell {
        row: row.index(),
        column: "BUYSELL".to_string(),
        expected: "side code B or S",
    })?;
    Ok(OrderLevel {
        board: row.as_str("BOARDID")?.to_string(),
        secid: row.as_str("SECID")?.to_string(),
        side,
        price: row.as_f64("PRICE")?,
        quantity: row.as_u64("QUANTITY")?,
        update_time: stamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{Table, TableBlock};
    use chrono::NaiveDate;
    use serde_json::json;

    fn orderbook(data: serde_json::Value) -> Table {
        let block: TableBlock = serde_json::from_value(json!({
            "columns": ["BOARDID", "SECID", "BUYSELL", "PRICE", "QUANTITY"],
            "data": data,
        }))
        .unwrap();
        Table::try_from(block).unwrap()
    }

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(14, 58, 0)
            .unwrap()
    }

    #[test]
    fn test_level_converts_with_stamp() {
        let table = orderbook(json!([["TQBR", "SBER", "B", 307.4, 120]]));
        let level = level_from_row(table.row(0).unwrap(), stamp()).unwrap();
        assert_eq!(level.side, Side::Buy);
        assert_eq!(level.price, 307.4);
        assert_eq!(level.quantity, 120);
        assert_eq!(level.update_time, stamp());
    }

    #[test]
    fn test_unknown_side_code_is_a_cell_error() {
        let table = orderbook(json!([["TQBR", "SBER", "X", 307.4, 120]]));
        let err = level_from_row(table.row(0).unwrap(), stamp()).unwrap_err();
        assert!(matches!(err, TableError::Cell { column, .. } if column == "BUYSELL"));
    }
}
