//! # MOEX ISS SDK
//!
//! A Rust SDK for the Moscow Exchange ISS market-data API.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Shared types, the columnar [`shared::Table`], domain models
//! 2. **Auth** — MOEX Passport exchange and credential lifecycle
//! 3. **HTTP** — `IssHttp` executor with retry and reactive refresh
//! 4. **High-Level Client** — `MoexClient` with nested sub-clients
//!
//! Without credentials every call still works against the delayed public
//! feed; a passport login upgrades the same client to real-time data.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use moex_sdk::prelude::*;
//!
//! let client = MoexClient::builder()
//!     .credentials("login", "password")
//!     .build()?;
//! client.passport().authenticate().await;
//!
//! let sber = Security::new("SBER");
//! let quote = client.quotes().latest(&sber).await?;
//! let book = client.orderbooks().depth(&sber, 10).await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared types used across all domains, including the columnar table.
pub mod shared;

/// Domain modules (vertical slices): types, conversions, sub-clients.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: Auth ────────────────────────────────────────────────────────────

/// Authentication: passport exchange, credential cell, persistence.
pub mod auth;

// ── Layer 3: HTTP ────────────────────────────────────────────────────────────

/// Request executor with retry policies.
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `MoexClient` — the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared types
    pub use crate::shared::{RowView, Security, Side, Table, Timeframe, TradingSession};

    // Domain types
    pub use crate::domain::candle::Candle;
    pub use crate::domain::history::{DailyCandle, HistoryRequest};
    pub use crate::domain::orderbook::OrderLevel;
    pub use crate::domain::quote::Quote;
    pub use crate::domain::trade::Trade;

    // Errors
    pub use crate::error::SdkError;

    // Network
    pub use crate::network::{DEFAULT_ISS_URL, DEFAULT_PASSPORT_URL};

    // Auth
    pub use crate::auth::AuthState;

    // Client + sub-clients
    pub use crate::client::{
        CandlesClient, HistoryClient, MoexClient, MoexClientBuilder, OrderbooksClient,
        PassportClient, QuotesClient, TradesClient,
    };
    pub use crate::http::{RetryConfig, RetryPolicy};
}
