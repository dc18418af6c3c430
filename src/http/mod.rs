//! HTTP executor layer — `IssHttp` with fixed-count retry policies.

pub mod client;
pub mod retry;

pub use client::IssHttp;
pub use retry::{RetryConfig, RetryPolicy, DEFAULT_ATTEMPTS};
