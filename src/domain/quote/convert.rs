//! Conversions from table rows to quote domain types.

use crate::domain::quote::Quote;
use crate::error::TableError;
use crate::shared::RowView;

impl TryFrom<RowView<'_>> for Quote {
    type Error = TableError;

    fn try_from(row: RowView<'_>) -> Result<Self, TableError> {
        Ok(Quote {
            secid: row.as_str("SECID")?.to_string(),
            board: row.as_str("BOARDID")?.to_string(),
            bid: row.opt_f64("BID")?,
            offer: row.opt_f64("OFFER")?,
            open: row.opt_f64("OPEN")?,
            low: row.opt_f64("LOW")?,
            high: row.opt_f64("HIGH")?,
            last: row.opt_f64("LAST")?,
            vol_today: row.opt_u64("VOLTODAY")?,
            val_today: row.opt_f64("VALTODAY")?,
            issue_capitalization: row.opt_f64("ISSUECAPITALIZATION")?,
            update_time: row.opt_time("UPDATETIME")?,
        })
    }
}
