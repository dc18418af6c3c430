//! Authentication — passport exchange, credential lifecycle, persistence.
//!
//! ## Session model
//!
//! - The credential is the raw `MicexPassportCert` cookie value issued by
//!   `passport.moex.com`; ISS honors it until the passport side expires it.
//! - Validity is signalled only by the `X-MicexPassport-Marker` response
//!   header: `granted` means honored, anything else (including no header at
//!   all) means denied. The response body says nothing about auth state.
//! - Anonymous operation is first-class: with no login/password configured
//!   every endpoint still serves the public delayed feed, and nothing here
//!   turns that into an error.
//!
//! Use `client.passport().authenticate()` to exchange the configured
//! login/password for a credential up front; otherwise the executor refreshes
//! reactively on the first denial.

pub mod client;
pub(crate) mod manager;
pub(crate) mod store;

use reqwest::header::{HeaderMap, SET_COOKIE};

/// Cookie name ISS expects the credential under.
pub const PASSPORT_COOKIE: &str = "MicexPassportCert";

/// Response header carrying the grant/deny marker.
pub const PASSPORT_MARKER_HEADER: &str = "X-MicexPassport-Marker";

/// Where the session stands after an authentication exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// Passport issued a credential; data requests carry the cookie.
    Authenticated,
    /// No credential held — public delayed data only.
    Anonymous,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated)
    }
}

/// Session credential (the raw `MicexPassportCert` value).
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub(crate) fn new(raw: impl Into<String>) -> Self {
        Credential(raw.into())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    /// Cookie header value carrying this credential.
    pub(crate) fn cookie(&self) -> String {
        format!("{}={}", PASSPORT_COOKIE, self.0)
    }
}

/// The value grants elevated data access; keep it out of logs.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Credential(***)")
    }
}

/// True when the response marker says the credential was honored.
pub(crate) fn marker_granted(headers: &HeaderMap) -> bool {
    headers
        .get(PASSPORT_MARKER_HEADER)
        .and_then(|value| value.to_str().ok())
        == Some("granted")
}

/// Renewed credential from a `Set-Cookie: MicexPassportCert=…` header, if any.
pub(crate) fn renewed_credential(headers: &HeaderMap) -> Option<Credential> {
    headers.get_all(SET_COOKIE).iter().find_map(|value| {
        let raw = value.to_str().ok()?;
        let rest = raw.strip_prefix(PASSPORT_COOKIE)?.strip_prefix('=')?;
        let token = rest.split(';').next()?.trim();
        (!token.is_empty()).then(|| Credential::new(token))
    })
}
