//! High-level client — `MoexClient` with nested sub-client accessors.
//!
//! Each endpoint family has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder and the accessor methods.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::client::Passport;
use crate::auth::manager::TokenManager;
use crate::auth::store::TokenStore;
use crate::domain::candle::client::Candles;
use crate::domain::history::client::History;
use crate::domain::orderbook::client::Orderbooks;
use crate::domain::quote::client::Quotes;
use crate::domain::trade::client::Trades;
use crate::error::{HttpError, SdkError};
use crate::http::{IssHttp, RetryPolicy};

// Re-export sub-client types for convenience.
pub use crate::auth::client::Passport as PassportClient;
pub use crate::domain::candle::client::Candles as CandlesClient;
pub use crate::domain::history::client::History as HistoryClient;
pub use crate::domain::orderbook::client::Orderbooks as OrderbooksClient;
pub use crate::domain::quote::client::Quotes as QuotesClient;
pub use crate::domain::trade::client::Trades as TradesClient;

/// The primary entry point for the MOEX ISS SDK.
///
/// Provides nested sub-client accessors for each endpoint family:
/// `client.quotes()`, `client.history()`, etc. Every accessor borrows the
/// client, so one `MoexClient` serves any number of concurrent calls.
pub struct MoexClient {
    pub(crate) http: IssHttp,
}

impl MoexClient {
    pub fn builder() -> MoexClientBuilder {
        MoexClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn passport(&self) -> Passport<'_> {
        Passport { client: self }
    }

    pub fn quotes(&self) -> Quotes<'_> {
        Quotes { client: self }
    }

    pub fn orderbooks(&self) -> Orderbooks<'_> {
        Orderbooks { client: self }
    }

    pub fn trades(&self) -> Trades<'_> {
        Trades { client: self }
    }

    pub fn history(&self) -> History<'_> {
        History { client: self }
    }

    pub fn candles(&self) -> Candles<'_> {
        Candles { client: self }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct MoexClientBuilder {
    iss_url: String,
    passport_url: String,
    login: Option<String>,
    password: Option<String>,
    token_path: Option<PathBuf>,
    timeout: Duration,
    retry: RetryPolicy,
}

impl Default for MoexClientBuilder {
    fn default() -> Self {
        Self {
            iss_url: crate::network::DEFAULT_ISS_URL.to_string(),
            passport_url: crate::network::DEFAULT_PASSPORT_URL.to_string(),
            login: None,
            password: None,
            token_path: None,
            timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }
}

impl MoexClientBuilder {
    pub fn iss_url(mut self, url: &str) -> Self {
        self.iss_url = url.to_string();
        self
    }

    pub fn passport_url(mut self, url: &str) -> Self {
        self.passport_url = url.to_string();
        self
    }

    /// Passport login and password. Without these the client runs
    /// anonymously against the delayed public feed.
    pub fn credentials(mut self, login: &str, password: &str) -> Self {
        self.login = Some(login.to_string());
        self.password = Some(password.to_string());
        self
    }

    /// File to seed the credential from at startup and to persist renewals
    /// into. Load and save failures are logged, never fatal.
    pub fn token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = Some(path.into());
        self
    }

    /// Per-request timeout. Defaults to 10 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Retry behavior for data fetches. Defaults to [`RetryPolicy::Standard`].
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn build(self) -> Result<MoexClient, SdkError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(HttpError::Transport)?;

        let store = self.token_path.map(TokenStore::new);
        let tokens = Arc::new(TokenManager::new(
            client.clone(),
            &self.passport_url,
            &self.iss_url,
            self.login,
            self.password,
            store,
        ));
        Ok(MoexClient {
            http: IssHttp::new(&self.iss_url, client, tokens, self.retry),
        })
    }
}
