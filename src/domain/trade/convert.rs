//! Conversions from table rows to trade domain types.

use crate::domain::trade::Trade;
use crate::error::TableError;
use crate::shared::{RowView, Side, TradingSession};

impl TryFrom<RowView<'_>> for Trade {
    type Error = TableError;

    fn try_from(row: RowView<'_>) -> Result<Self, TableError> {
        let side_code = row.as_str("BUYSELL")?;
        let side = Side::from_code(side_code).ok_or_else(|| TableError::Cell {
            row: row.index(),
            column: "BUYSELL".to_string(),
            expected: "side code B or S",
        })?;
        let session_code = row.as_u64("TRADINGSESSION")?;
        let session = u8::try_from(session_code)
            .ok()
            .and_then(TradingSession::from_code)
            .ok_or_else(|| TableError::Cell {
                row: row.index(),
                column: "TRADINGSESSION".to_string(),
                expected: "session code 1, 2 or 3",
            })?;
        Ok(Trade {
            tradeno: row.as_i64("TRADENO")?,
            trade_time: row.as_time("TRADETIME")?,
            secid: row.as_str("SECID")?.to_string(),
            price: row.as_f64("PRICE")?,
            quantity: row.as_u64("QUANTITY")?,
            value: row.as_f64("VALUE")?,
            side,
            session,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{Table, TableBlock};
    use chrono::NaiveTime;
    use serde_json::json;

    fn trades(data: serde_json::Value) -> Table {
        let block: TableBlock = serde_json::from_value(json!({
            "columns": [
                "TRADENO", "TRADETIME", "SECID", "PRICE", "QUANTITY",
                "VALUE", "BUYSELL", "TRADINGSESSION"
            ],
            "data": data,
        }))
        .unwrap();
        Table::try_from(block).unwrap()
    }

    #[test]
    fn test_row_converts() {
        let table = trades(json!([
            [12345678901i64, "10:58:31", "SBER", 307.5, 40, 12300.0, "S", 1]
        ]));
        let trade = Trade::try_from(table.row(0).unwrap()).unwrap();
        assert_eq!(trade.tradeno, 12345678901);
        assert_eq!(
            trade.trade_time,
            NaiveTime::from_hms_opt(10, 58, 31).unwrap()
        );
        assert_eq!(trade.side, Side::Sell);
        assert_eq!(trade.session, TradingSession::Day);
        assert_eq!(trade.quantity, 40);
    }

    #[test]
    fn test_bad_session_code_is_a_cell_error() {
        let table = trades(json!([
            [1, "10:58:31", "SBER", 307.5, 40, 12300.0, "B", 9]
        ]));
        let err = Trade::try_from(table.row(0).unwrap()).unwrap_err();
        assert!(matches!(err, TableError::Cell { column, .. } if column == "TRADINGSESSION"));
    }
}
