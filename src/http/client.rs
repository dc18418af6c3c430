//! Request executor — `IssHttp`.
//!
//! One job: GET an ISS URL and hand back the named columnar block as a
//! [`Table`]. Attaches the passport cookie, retries transport and status
//! failures with immediate re-issues, and triggers at most one credential
//! refresh per fetch when ISS signals a denial. Internal to the SDK — the
//! domain sub-clients wrap this.

use std::sync::Arc;

use reqwest::header::COOKIE;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::auth::manager::TokenManager;
use crate::auth::marker_granted;
use crate::error::HttpError;
use crate::http::retry::RetryPolicy;
use crate::shared::{Table, TableBlock};

/// Executor for ISS data requests.
pub struct IssHttp {
    iss_url: String,
    client: Client,
    tokens: Arc<TokenManager>,
    policy: RetryPolicy,
}

impl IssHttp {
    pub(crate) fn new(
        iss_url: &str,
        client: Client,
        tokens: Arc<TokenManager>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            iss_url: iss_url.trim_end_matches('/').to_string(),
            client,
            tokens,
            policy,
        }
    }

    /// ISS base URL, without a trailing slash.
    pub(crate) fn iss_url(&self) -> &str {
        &self.iss_url
    }

    pub(crate) fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// The client-wide retry policy.
    pub(crate) fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Fetch `url` and extract the named block.
    ///
    /// `auth` controls whether the credential cookie is attached (when one is
    /// held) and whether a denial triggers the refresh path. The credential
    /// cell is re-read on every attempt, so a refresh triggered by a
    /// concurrent fetch is picked up mid-loop.
    pub(crate) async fn get_table(
        &self,
        url: &str,
        block: &str,
        auth: bool,
        policy: &RetryPolicy,
    ) -> Result<Table, HttpError> {
        let max_attempts = policy.max_attempts();
        let mut refreshed = false;
        let mut attempt: u32 = 0;
        let mut last: Option<HttpError> = None;

        while attempt < max_attempts {
            let credential = if auth { self.tokens.current().await } else { None };

            tracing::debug!(url, attempt = attempt + 1, max = max_attempts, "loading url");
            let mut request = self.client.get(url);
            if let Some(credential) = credential.as_ref() {
                request = request.header(COOKIE, credential.cookie());
            }

            let response = match request.send().await {
                Ok(response) => response,
                Err(err) => {
                    tracing::debug!(url, error = %err, "transport failure");
                    last = Some(HttpError::Transport(err));
                    attempt += 1;
                    continue;
                }
            };

            let status = response.status();
            let denied = auth
                && (status == StatusCode::FORBIDDEN
                    || (credential.is_some() && !marker_granted(response.headers())));
            if denied {
                if !refreshed {
                    refreshed = true;
                    tracing::warn!(url, "credential not honored, refreshing");
                    if self.tokens.refresh().await.is_some() {
                        // fresh credential; this round did not consume an attempt
                        continue;
                    }
                }
                last = Some(HttpError::Unauthorized {
                    url: url.to_string(),
                });
                attempt += 1;
                continue;
            }

            if !status.is_success() {
                tracing::debug!(url, status = status.as_u16(), "non-success status");
                last = Some(HttpError::Status {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
                attempt += 1;
                continue;
            }

            // The server answered; a broken body is not worth re-fetching.
            let body: Value = response
                .json()
                .await
                .map_err(|err| HttpError::Payload(err.to_string()))?;
            return extract_block(&body, block);
        }

        match last {
            Some(denied @ HttpError::Unauthorized { .. }) => {
                tracing::error!(url, attempts = max_attempts, "denied on every attempt");
                Err(denied)
            }
            Some(err) => {
                tracing::error!(url, attempts = max_attempts, error = %err, "no response");
                Err(HttpError::NoResponse {
                    attempts: max_attempts,
                    last: err.to_string(),
                })
            }
            None => Err(HttpError::NoResponse {
                attempts: max_attempts,
                last: "no attempts made".to_string(),
            }),
        }
    }
}

/// Pull `block` out of a response body and validate its shape.
fn extract_block(body: &Value, block: &str) -> Result<Table, HttpError> {
    let value = body
        .get(block)
        .ok_or_else(|| HttpError::Payload(format!("block '{}' absent from response", block)))?;
    let parsed = TableBlock::deserialize(value)
        .map_err(|err| HttpError::Payload(format!("block '{}': {}", block, err)))?;
    Table::try_from(parsed).map_err(|err| HttpError::Payload(err.to_string()))
}
