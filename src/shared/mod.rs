//! Shared types and utilities used across all domain modules.

pub mod table;

pub use table::{RowView, Table, TableBlock};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default trade engine.
pub const DEFAULT_ENGINE: &str = "stock";

/// Default market within the engine.
pub const DEFAULT_MARKET: &str = "shares";

/// Default board id (main equity board).
pub const DEFAULT_BOARD: &str = "TQBR";

// ─── Security ────────────────────────────────────────────────────────────────

/// Selector for one instrument on one venue segment.
///
/// ISS addresses instruments by engine / market / security id, and most
/// payloads carry rows for several boards at once — `board` picks the one the
/// caller wants (e.g. `TQBR` for main-board equities, `RTSI` for the RTS
/// index on `engine: stock, market: index`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Security {
    pub secid: String,
    pub engine: String,
    pub market: String,
    pub board: String,
}

impl Security {
    /// A stock-market selector with the default engine/market/board.
    pub fn new(secid: impl Into<String>) -> Self {
        Self {
            secid: secid.into(),
            engine: DEFAULT_ENGINE.to_string(),
            market: DEFAULT_MARKET.to_string(),
            board: DEFAULT_BOARD.to_string(),
        }
    }

    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = market.into();
        self
    }

    pub fn with_board(mut self, board: impl Into<String>) -> Self {
        self.board = board.into();
        self
    }

    /// `{iss}/engines/{engine}/markets/{market}/securities/{secid}`
    /// (no `.json` suffix — callers append the endpoint tail).
    pub(crate) fn securities_url(&self, iss: &str) -> String {
        format!(
            "{}/engines/{}/markets/{}/securities/{}",
            iss,
            urlencoding::encode(&self.engine),
            urlencoding::encode(&self.market),
            urlencoding::encode(&self.secid),
        )
    }

    /// Same coordinates under the `/history` prefix.
    pub(crate) fn history_url(&self, iss: &str) -> String {
        format!(
            "{}/history/engines/{}/markets/{}/securities/{}",
            iss,
            urlencoding::encode(&self.engine),
            urlencoding::encode(&self.market),
            urlencoding::encode(&self.secid),
        )
    }
}

// ─── Side ────────────────────────────────────────────────────────────────────

/// Trade/order direction as ISS encodes it in `BUYSELL` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "B")]
    Buy,
    #[serde(rename = "S")]
    Sell,
}

impl Side {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "B" => Some(Side::Buy),
            "S" => Some(Side::Sell),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Side::Buy => "B",
            Side::Sell => "S",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "Buy"),
            Side::Sell => write!(f, "Sell"),
        }
    }
}

// ─── TradingSession ──────────────────────────────────────────────────────────

/// Trading-session selector for history queries, and the session tag ISS puts
/// on trade and history rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradingSession {
    /// Main daytime session.
    Day,
    /// Evening session.
    Evening,
    /// Both sessions combined.
    #[default]
    Combined,
}

impl TradingSession {
    /// The numeric code ISS uses (`tradingsession` query parameter and the
    /// `TRADINGSESSION` column).
    pub fn as_code(&self) -> u8 {
        match self {
            TradingSession::Day => 1,
            TradingSession::Evening => 2,
            TradingSession::Combined => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(TradingSession::Day),
            2 => Some(TradingSession::Evening),
            3 => Some(TradingSession::Combined),
            _ => None,
        }
    }
}

impl std::fmt::Display for TradingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradingSession::Day => write!(f, "day"),
            TradingSession::Evening => write!(f, "evening"),
            TradingSession::Combined => write!(f, "combined"),
        }
    }
}

// ─── Timeframe ───────────────────────────────────────────────────────────────

/// Intraday/interval candle resolution.
///
/// Only the intervals ISS actually serves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1m")]
    Min1,
    #[serde(rename = "10m")]
    Min10,
    #[serde(rename = "1h")]
    Hour1,
    #[default]
    #[serde(rename = "D")]
    Day,
    #[serde(rename = "W")]
    Week,
    #[serde(rename = "M")]
    Month,
    #[serde(rename = "Q")]
    Quarter,
}

impl Timeframe {
    /// The `interval` query-parameter value ISS expects.
    pub fn as_interval(&self) -> u32 {
        match self {
            Timeframe::Min1 => 1,
            Timeframe::Min10 => 10,
            Timeframe::Hour1 => 60,
            Timeframe::Day => 24,
            Timeframe::Week => 7,
            Timeframe::Month => 31,
            Timeframe::Quarter => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Min1 => "1m",
            Timeframe::Min10 => "10m",
            Timeframe::Hour1 => "1h",
            Timeframe::Day => "D",
            Timeframe::Week => "W",
            Timeframe::Month => "M",
            Timeframe::Quarter => "Q",
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── Utilities ───────────────────────────────────────────────────────────────

/// Format a date the way ISS query parameters expect it.
pub(crate) fn iss_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_security_defaults() {
        let sec = Security::new("SBER");
        assert_eq!(sec.engine, "stock");
        assert_eq!(sec.market, "shares");
        assert_eq!(sec.board, "TQBR");
    }

    #[test]
    fn test_security_urls() {
        let sec = Security::new("MOEX");
        assert_eq!(
            sec.securities_url("https://iss.moex.com/iss"),
            "https://iss.moex.com/iss/engines/stock/markets/shares/securities/MOEX"
        );
        assert_eq!(
            sec.history_url("https://iss.moex.com/iss"),
            "https://iss.moex.com/iss/history/engines/stock/markets/shares/securities/MOEX"
        );
    }

    #[test]
    fn test_security_index_board() {
        let sec = Security::new("RTSI").with_market("index").with_board("RTSI");
        assert_eq!(
            sec.securities_url("http://x"),
            "http://x/engines/stock/markets/index/securities/RTSI"
        );
    }

    #[test]
    fn test_side_codes() {
        assert_eq!(Side::from_code("B"), Some(Side::Buy));
        assert_eq!(Side::from_code("S"), Some(Side::Sell));
        assert_eq!(Side::from_code("X"), None);
        assert_eq!(Side::Buy.as_code(), "B");
    }

    #[test]
    fn test_session_codes() {
        assert_eq!(TradingSession::default(), TradingSession::Combined);
        assert_eq!(TradingSession::Combined.as_code(), 3);
        assert_eq!(TradingSession::from_code(1), Some(TradingSession::Day));
        assert_eq!(TradingSession::from_code(9), None);
    }

    #[test]
    fn test_timeframe_intervals() {
        assert_eq!(Timeframe::Min1.as_interval(), 1);
        assert_eq!(Timeframe::Hour1.as_interval(), 60);
        assert_eq!(Timeframe::Day.as_interval(), 24);
        assert_eq!(Timeframe::Quarter.as_interval(), 4);
        assert_eq!(Timeframe::default(), Timeframe::Day);
    }

    #[test]
    fn test_iss_date_format() {
        let d = NaiveDate::from_ymd_opt(2021, 5, 4).unwrap();
        assert_eq!(iss_date(d), "2021-05-04");
    }
}
