//! Row conversion for the candles block.

use crate::domain::candle::Candle;
use crate::error::TableError;
use crate::shared::RowView;

impl TryFrom<RowView<'_>> for Candle {
    type Error = TableError;

    fn try_from(row: RowView<'_>) -> Result<Self, Self::Error> {
        Ok(Candle {
            open: row.as_f64("open")?,
            close: row.as_f64("close")?,
            high: row.as_f64("high")?,
            low: row.as_f64("low")?,
            value: row.as_f64("value")?,
            volume: row.as_f64("volume")?,
            begin: row.as_datetime("begin")?,
            end: row.as_datetime("end")?,
        })
    }
}
