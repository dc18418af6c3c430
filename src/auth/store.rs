//! Plain-text credential persistence.
//!
//! One file, one line: the raw `MicexPassportCert` value. A missing or
//! unreadable file just means starting anonymous; a failed write is logged
//! and otherwise ignored so a read-only home directory never breaks data
//! retrieval.

use std::fs;
use std::path::PathBuf;

#[derive(Debug)]
pub(crate) struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Stored credential, if the file exists and holds one.
    pub(crate) fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(err) => {
                tracing::debug!(path = %self.path.display(), error = %err, "no stored credential");
                None
            }
        }
    }

    /// Best-effort write of the current credential.
    pub(crate) fn save(&self, credential: &str) {
        if let Err(err) = fs::write(&self.path, credential) {
            tracing::warn!(path = %self.path.display(), error = %err, "could not persist credential");
        }
    }
}
