//! Credential lifecycle — passport exchange, reactive refresh, persistence.

use async_lock::RwLock;
use reqwest::header::COOKIE;
use reqwest::{Client, StatusCode};

use crate::auth::store::TokenStore;
use crate::auth::{marker_granted, renewed_credential, AuthState, Credential};
use crate::error::AuthError;

/// Probe attempts before a refresh falls back to the full passport exchange.
pub(crate) const PROBE_ATTEMPTS: u32 = 5;

/// Low-privilege endpoint used to test whether a credential is still honored.
const PROBE_PATH: &str = "/engines/stock/markets/shares/securities/SBER.json";

/// Owns the shared credential cell and everything that mutates it.
///
/// Readers snapshot the cell per request; a refresh swaps it atomically, so
/// concurrent fetches either keep the old credential for the attempt in
/// flight or pick up the new one on their next attempt.
pub(crate) struct TokenManager {
    passport_url: String,
    probe_url: String,
    login: Option<String>,
    password: Option<String>,
    credential: RwLock<Option<Credential>>,
    store: Option<TokenStore>,
    client: Client,
}

impl TokenManager {
    pub(crate) fn new(
        client: Client,
        passport_url: &str,
        iss_url: &str,
        login: Option<String>,
        password: Option<String>,
        store: Option<TokenStore>,
    ) -> Self {
        let credential = store
            .as_ref()
            .and_then(|store| store.load())
            .map(Credential::new);
        if credential.is_some() {
            tracing::debug!("seeded credential from token file");
        }
        Self {
            passport_url: passport_url.trim_end_matches('/').to_string(),
            probe_url: format!("{}{}", iss_url.trim_end_matches('/'), PROBE_PATH),
            login,
            password,
            credential: RwLock::new(credential),
            store,
            client,
        }
    }

    /// Snapshot of the current credential.
    pub(crate) async fn current(&self) -> Option<Credential> {
        self.credential.read().await.clone()
    }

    /// Seed the cell directly, bypassing the passport round-trip.
    pub(crate) async fn set(&self, credential: Credential) {
        self.install(credential).await;
    }

    /// Exchange the configured login/password for a fresh credential.
    ///
    /// Any rejection or transport failure degrades to
    /// [`AuthState::Anonymous`]. A rejection also drops the held credential;
    /// a transport failure leaves it in place.
    pub(crate) async fn authenticate(&self) -> AuthState {
        match self.passport_exchange().await {
            Ok(credential) => {
                self.install(credential).await;
                tracing::info!("authenticated with passport");
                AuthState::Authenticated
            }
            Err(AuthError::NoCredentials) => {
                tracing::debug!("no login configured, staying anonymous");
                AuthState::Anonymous
            }
            Err(err) => {
                tracing::warn!(error = %err, "authentication failed, continuing anonymously");
                if matches!(err, AuthError::Rejected) {
                    *self.credential.write().await = None;
                }
                AuthState::Anonymous
            }
        }
    }

    /// Re-validate or replace the credential after ISS denied it.
    ///
    /// First probes the low-privilege endpoint with the current credential: a
    /// `granted` marker means the denial was not about the session, and any
    /// renewal delivered via `Set-Cookie` is installed. Otherwise one full
    /// passport exchange is attempted. `None` means the caller is effectively
    /// anonymous from here on.
    pub(crate) async fn refresh(&self) -> Option<Credential> {
        if let Some(credential) = self.current().await {
            match self.probe(&credential).await {
                Some(headers) if marker_granted(&headers) => {
                    if let Some(renewed) = renewed_credential(&headers) {
                        tracing::debug!("probe renewed the credential");
                        self.install(renewed.clone()).await;
                        return Some(renewed);
                    }
                    tracing::debug!("credential still honored by the probe");
                    return Some(credential);
                }
                Some(_) => tracing::debug!("probe marker denied the credential"),
                None => tracing::debug!("probe got no answer"),
            }
        }

        match self.passport_exchange().await {
            Ok(credential) => {
                self.install(credential.clone()).await;
                tracing::info!("re-authenticated with passport");
                Some(credential)
            }
            Err(err) => {
                tracing::warn!(error = %err, "credential refresh failed");
                *self.credential.write().await = None;
                None
            }
        }
    }

    /// GET `{passport}/authenticate` with HTTP Basic auth. The body is the
    /// credential; success is status 200 plus a body longer than 10 bytes
    /// (shorter answers are error pages, not certificates).
    async fn passport_exchange(&self) -> Result<Credential, AuthError> {
        let (login, password) = match (self.login.as_deref(), self.password.as_deref()) {
            (Some(login), Some(password)) if !login.is_empty() && !password.is_empty() => {
                (login, password)
            }
            _ => return Err(AuthError::NoCredentials),
        };

        let url = format!("{}/authenticate", self.passport_url);
        tracing::debug!(url = %url, "passport exchange");
        let response = self
            .client
            .get(&url)
            .basic_auth(login, Some(password))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK || body.len() <= 10 {
            tracing::warn!(status = status.as_u16(), "passport rejected the login");
            return Err(AuthError::Rejected);
        }
        Ok(Credential::new(body.trim()))
    }

    /// Probe the marker endpoint with `credential`, retrying transport
    /// failures up to [`PROBE_ATTEMPTS`] times. The first answer wins.
    async fn probe(&self, credential: &Credential) -> Option<reqwest::header::HeaderMap> {
        for attempt in 1..=PROBE_ATTEMPTS {
            let request = self
                .client
                .get(&self.probe_url)
                .header(COOKIE, credential.cookie());
            match request.send().await {
                Ok(response) => return Some(response.headers().clone()),
                Err(err) => {
                    tracing::debug!(attempt, error = %err, "probe transport failure")
                }
            }
        }
        None
    }

    async fn install(&self, credential: Credential) {
        if let Some(store) = &self.store {
            store.save(credential.as_str());
        }
        *self.credential.write().await = Some(credential);
    }
}
