//! Unified SDK error types.
//!
//! Every public operation returns `Result<T, SdkError>`. Call sites that only
//! care about presence can use `Result::ok()` and treat `None` as "no data";
//! the variants below keep the actual cause distinguishable.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("table error: {0}")]
    Table(#[from] TableError),

    /// The query succeeded at the transport level but produced no rows
    /// (empty payload, board filter matched nothing, empty depth window).
    #[error("no data: {0}")]
    NoData(String),
}

impl SdkError {
    /// True when the failure means "nothing there" rather than "broken".
    pub fn is_no_data(&self) -> bool {
        matches!(self, SdkError::NoData(_))
    }
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered {status} for {url}")]
    Status { status: u16, url: String },

    /// Authorization denied (HTTP 403 or a deny marker) after the one
    /// refresh this fetch was allowed.
    #[error("authorization denied for {url}")]
    Unauthorized { url: String },

    /// The body was not the expected columnar JSON shape. Not retried.
    #[error("malformed payload: {0}")]
    Payload(String),

    /// All attempts exhausted.
    #[error("no response after {attempts} attempts: {last}")]
    NoResponse { attempts: u32, last: String },
}

/// Authentication errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("passport exchange failed: {0}")]
    Exchange(#[from] reqwest::Error),

    #[error("passport rejected the login")]
    Rejected,

    #[error("credential refresh exhausted after {attempts} probes")]
    RefreshExhausted { attempts: u32 },

    #[error("no credentials configured")]
    NoCredentials,
}

/// Columnar-table errors (projection, extraction).
#[derive(Error, Debug)]
pub enum TableError {
    /// A requested projection column does not exist upstream. Never padded.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// A column the row shape requires is absent from the payload.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// Concatenated tables must share one column list, by name and order.
    #[error("column lists differ: expected {expected:?}, found {found:?}")]
    ColumnMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("row {row}, column {column}: expected {expected}")]
    Cell {
        row: usize,
        column: String,
        expected: &'static str,
    },

    /// A data row is wider or narrower than the column list.
    #[error("row {row} has {found} cells, expected {expected}")]
    Shape {
        row: usize,
        expected: usize,
        found: usize,
    },
}
