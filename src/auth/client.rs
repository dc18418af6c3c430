//! Passport sub-client — authentication and credential control.

use crate::auth::manager::PROBE_ATTEMPTS;
use crate::auth::{AuthState, Credential};
use crate::client::MoexClient;
use crate::error::{AuthError, SdkError};

/// Sub-client for passport operations.
pub struct Passport<'a> {
    pub(crate) client: &'a MoexClient,
}

impl<'a> Passport<'a> {
    /// Exchange the configured login/password for a session credential.
    ///
    /// Never fails: a rejection or unreachable passport degrades to
    /// [`AuthState::Anonymous`] and the public delayed feed keeps working.
    /// Calling this up front is optional — the executor refreshes reactively
    /// on the first denial anyway.
    pub async fn authenticate(&self) -> AuthState {
        self.client.http.tokens().authenticate().await
    }

    /// Force a credential refresh without waiting for ISS to deny one.
    pub async fn refresh(&self) -> Result<(), SdkError> {
        match self.client.http.tokens().refresh().await {
            Some(_) => Ok(()),
            None => Err(AuthError::RefreshExhausted {
                attempts: PROBE_ATTEMPTS,
            }
            .into()),
        }
    }

    /// Inject a credential obtained elsewhere, skipping the passport
    /// round-trip. Same effect as loading one from the token file.
    pub async fn set_token(&self, raw: impl Into<String>) {
        self.client.http.tokens().set(Credential::new(raw)).await;
    }

    /// Whether a credential is currently held.
    ///
    /// Held is not the same as honored — ISS may still deny it, which
    /// triggers the reactive refresh.
    pub async fn is_authenticated(&self) -> bool {
        self.client.http.tokens().current().await.is_some()
    }
}
