//! Trade domain — the intraday tick feed from the `trades` block.

pub mod client;
mod convert;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::shared::{Side, TradingSession};

/// One executed trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Exchange-assigned trade number, strictly increasing within a session.
    pub tradeno: i64,
    pub trade_time: NaiveTime,
    pub secid: String,
    pub price: f64,
    pub quantity: u64,
    /// Turnover of this trade in rubles.
    pub value: f64,
    pub side: Side,
    pub session: TradingSession,
}
