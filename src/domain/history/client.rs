//! History sub-client — ranged daily results with 50-day windowing.

use chrono::{Duration, NaiveDate};

use crate::client::MoexClient;
use crate::domain::history::{DailyCandle, HistoryRequest};
use crate::error::SdkError;
use crate::shared::{iss_date, Security, Table, TradingSession};

/// Block key for the history endpoint family.
const BLOCK: &str = "history";

/// Upstream cap on one history fetch, in calendar days.
const WINDOW_DAYS: i64 = 50;

pub struct History<'a> {
    pub(crate) client: &'a MoexClient,
}

impl<'a> History<'a> {
    /// Daily rows for the request's range, oldest first.
    pub async fn range(
        &self,
        security: &Security,
        request: &HistoryRequest,
    ) -> Result<Vec<DailyCandle>, SdkError> {
        let table = self.range_rows(security, request).await?;
        Ok(table.typed()?)
    }

    /// Same range as [`Self::range`], projected to the caller's columns.
    ///
    /// The result serializes back to the columnar `{columns, data}` shape,
    /// ready for a downstream sink. Unknown columns are an error.
    pub async fn range_table(
        &self,
        security: &Security,
        request: &HistoryRequest,
        columns: &[&str],
    ) -> Result<Table, SdkError> {
        let table = self.range_rows(security, request).await?;
        Ok(table.project(columns)?)
    }

    async fn range_rows(
        &self,
        security: &Security,
        request: &HistoryRequest,
    ) -> Result<Table, SdkError> {
        // No explicit start: one window ending at `till`, truncated to its
        // last row — the nearest trading day at or before `till`.
        let Some(from) = request.from else {
            let start = request.till - Duration::days(WINDOW_DAYS);
            let table = self
                .window(security, start, request.till, request.session)
                .await?;
            if table.is_empty() {
                return Err(self.no_rows(security, start, request.till));
            }
            return Ok(table.tail(1));
        };

        let mut acc: Option<Table> = None;
        for (start, end) in split_range(from, request.till, WINDOW_DAYS) {
            match self.window(security, start, end, request.session).await {
                Ok(window) => {
                    acc = Some(match acc.take() {
                        None => window,
                        Some(mut table) => {
                            table.append(window)?;
                            table
                        }
                    });
                }
                // Keep what already accumulated; the tail of the range is
                // unreachable right now and partial data beats none.
                Err(err) if acc.is_some() => {
                    tracing::warn!(
                        error = %err, %start, %end,
                        "window fetch failed, returning partial range"
                    );
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        let mut table = match acc {
            Some(table) if !table.is_empty() => table,
            _ => return Err(self.no_rows(security, from, request.till)),
        };

        if request.include_prior_close {
            table = self.prepend_anchor(security, request, from, table).await?;
        }
        Ok(table)
    }

    /// Prepend the nearest trading day before `from`, unless the range
    /// already starts on `from` itself. An unreachable or empty anchor
    /// window leaves the range as is.
    async fn prepend_anchor(
        &self,
        security: &Security,
        request: &HistoryRequest,
        from: NaiveDate,
        table: Table,
    ) -> Result<Table, SdkError> {
        let first_date = match table.row(0) {
            Some(row) => row.as_date("TRADEDATE")?,
            None => return Ok(table),
        };
        if first_date <= from {
            return Ok(table);
        }

        let anchor_start = from - Duration::days(WINDOW_DAYS);
        match self
            .window(security, anchor_start, from, request.session)
            .await
        {
            Ok(anchor) if !anchor.is_empty() => {
                let mut anchored = anchor.tail(1);
                anchored.append(table)?;
                Ok(anchored)
            }
            Ok(_) => {
                tracing::debug!(secid = %security.secid, "no prior trading day to anchor with");
                Ok(table)
            }
            Err(err) => {
                tracing::warn!(error = %err, "anchor fetch failed, returning range without it");
                Ok(table)
            }
        }
    }

    /// One fetch of `[start, end]`, filtered to the board and to the literal
    /// window bounds regardless of what ISS returned.
    ///
    /// History is served from the public delayed feed, so the fetch carries
    /// no credential.
    async fn window(
        &self,
        security: &Security,
        start: NaiveDate,
        end: NaiveDate,
        session: TradingSession,
    ) -> Result<Table, SdkError> {
        let url = format!(
            "{}.json?from={}&till={}&tradingsession={}",
            security.history_url(self.client.http.iss_url()),
            iss_date(start),
            iss_date(end),
            session.as_code(),
        );
        let table = self
            .client
            .http
            .get_table(&url, BLOCK, false, self.client.http.policy())
            .await?;
        let board = table.filter_eq("BOARDID", &security.board)?;
        let bounded = board.filter(|row| {
            Ok(row
                .opt_date("TRADEDATE")?
                .is_some_and(|date| date >= start && date <= end))
        })?;
        tracing::debug!(
            secid = %security.secid, %start, %end, rows = bounded.len(),
            "history window"
        );
        Ok(bounded)
    }

    fn no_rows(&self, security: &Security, from: NaiveDate, till: NaiveDate) -> SdkError {
        SdkError::NoData(format!(
            "no history rows for {} on {} between {} and {}",
            security.secid, security.board, from, till
        ))
    }
}

/// Consecutive windows of at most `max_days` calendar days covering
/// `[from, till]` exactly, in chronological order. Empty when the range is
/// inverted.
fn split_range(from: NaiveDate, till: NaiveDate, max_days: i64) -> Vec<(NaiveDate, NaiveDate)> {
    let mut windows = Vec::new();
    let mut start = from;
    while start <= till {
        let end = (start + Duration::days(max_days - 1)).min(till);
        windows.push((start, end));
        start = end + Duration::days(1);
    }
    windows
}
