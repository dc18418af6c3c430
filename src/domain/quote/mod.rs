//! Quote domain — realtime snapshots from the `marketdata` block.

pub mod client;
mod convert;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Realtime snapshot of one instrument on one board.
///
/// Numeric fields are optional: outside the trading session ISS serves the
/// row with nulls, and that is still a snapshot, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub secid: String,
    pub board: String,
    pub bid: Option<f64>,
    pub offer: Option<f64>,
    pub open: Option<f64>,
    pub low: Option<f64>,
    pub high: Option<f64>,
    pub last: Option<f64>,
    pub vol_today: Option<u64>,
    pub val_today: Option<f64>,
    pub issue_capitalization: Option<f64>,
    pub update_time: Option<NaiveTime>,
}
