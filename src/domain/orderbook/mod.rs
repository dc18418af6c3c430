//! Order book domain — aggregated level snapshots from the `orderbook` block.

pub mod client;
mod convert;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::shared::Side;

/// One aggregated price level of the visible book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLevel {
    pub board: String,
    pub secid: String,
    pub side: Side,
    pub price: f64,
    pub quantity: u64,
    /// When this snapshot was received (client clock); the block itself
    /// carries no timestamp.
    pub update_time: NaiveDateTime,
}
