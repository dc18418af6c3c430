//! Candle domain — aggregated OHLCV bars from the candles endpoint.

pub mod client;
mod convert;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One aggregated bar. Unlike the daily history block, the candles block
/// names its columns in lowercase and always fills every cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candle {
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    /// Traded value over the bar, in roubles.
    pub value: f64,
    /// Traded volume over the bar, in units of the security.
    pub volume: f64,
    /// Bar open timestamp, exchange local time.
    pub begin: NaiveDateTime,
    /// Bar close timestamp, exchange local time.
    pub end: NaiveDateTime,
}
