//! Domain modules organized as vertical slices.
//!
//! Each sub-module covers one ISS endpoint family and contains:
//! - `mod.rs` — Rich domain types (validated, business-logic-ready)
//! - `convert.rs` — `TryFrom<RowView>` conversions with validation
//! - `client.rs` — Sub-client borrowing the top-level [`crate::MoexClient`]
//!
//! All slices read the same columnar envelope through
//! [`crate::shared::Table`]; there is no per-slice wire layer.

pub mod candle;
pub mod history;
pub mod orderbook;
pub mod quote;
pub mod trade;
