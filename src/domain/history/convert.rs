//! Conversions from table rows to history domain types.

use crate::domain::history::DailyCandle;
use crate::error::TableError;
use crate::shared::RowView;

impl TryFrom<RowView<'_>> for DailyCandle {
    type Error = TableError;

    fn try_from(row: RowView<'_>) -> Result<Self, TableError> {
        Ok(DailyCandle {
            trade_date: row.as_date("TRADEDATE")?,
            open: row.opt_f64("OPEN")?,
            high: row.opt_f64("HIGH")?,
            low: row.opt_f64("LOW")?,
            close: row.opt_f64("CLOSE")?,
            volume: row.opt_u64("VOLUME")?,
        })
    }
}
