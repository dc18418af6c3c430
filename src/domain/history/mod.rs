//! History domain — daily results from the `/history` endpoint family.

pub mod client;
mod convert;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::TradingSession;

/// One daily result row.
///
/// OHLC and volume are null for days the board recorded no trades; the row
/// itself still exists, so the fields stay optional rather than dropping
/// the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCandle {
    pub trade_date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<u64>,
}

/// Parameters for a historical range query.
#[derive(Debug, Clone)]
pub struct HistoryRequest {
    /// Last date of the interval, inclusive. When it is not a trading day
    /// the result ends at the nearest trading day before it.
    pub till: NaiveDate,
    /// First date of the interval, inclusive. `None` asks for the single
    /// nearest trading day at or before `till`.
    pub from: Option<NaiveDate>,
    pub session: TradingSession,
    /// Prepend the nearest trading day before `from`, so the first day of
    /// the range has a prior close to compare against.
    pub include_prior_close: bool,
}

impl HistoryRequest {
    pub fn new(till: NaiveDate) -> Self {
        Self {
            till,
            from: None,
            session: TradingSession::default(),
            include_prior_close: false,
        }
    }

    pub fn from(mut self, from: NaiveDate) -> Self {
        self.from = Some(from);
        self
    }

    pub fn session(mut self, session: TradingSession) -> Self {
        self.session = session;
        self
    }

    pub fn include_prior_close(mut self) -> Self {
        self.include_prior_close = true;
        self
    }
}
