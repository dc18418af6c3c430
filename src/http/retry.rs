//! Retry policies for HTTP requests.

/// Attempts made under [`RetryPolicy::Standard`].
pub const DEFAULT_ATTEMPTS: u32 = 5;

/// Retry policy for an HTTP request.
///
/// Every retry is an immediate re-issue. The ISS endpoints are read-only, so
/// the bound alone caps the damage; there is no backoff or jitter.
#[derive(Debug, Clone)]
pub enum RetryPolicy {
    /// Single attempt, no retries.
    None,
    /// Fixed bound of [`DEFAULT_ATTEMPTS`] attempts. Default for all
    /// data endpoints.
    Standard,
    /// User-provided bound.
    Custom(RetryConfig),
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::Standard
    }
}

impl RetryPolicy {
    /// Total attempts allowed under this policy (including the first).
    pub fn max_attempts(&self) -> u32 {
        match self {
            RetryPolicy::None => 1,
            RetryPolicy::Standard => DEFAULT_ATTEMPTS,
            RetryPolicy::Custom(config) => config.max_attempts.max(1),
        }
    }
}

/// Configuration for [`RetryPolicy::Custom`].
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the initial request.
    /// Values below 1 are treated as 1.
    pub max_attempts: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_ATTEMPTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_standard() {
        assert!(matches!(RetryPolicy::default(), RetryPolicy::Standard));
        assert_eq!(RetryPolicy::default().max_attempts(), 5);
    }

    #[test]
    fn test_none_means_single_attempt() {
        assert_eq!(RetryPolicy::None.max_attempts(), 1);
    }

    #[test]
    fn test_custom_bound_floors_at_one() {
        let policy = RetryPolicy::Custom(RetryConfig { max_attempts: 0 });
        assert_eq!(policy.max_attempts(), 1);
        let policy = RetryPolicy::Custom(RetryConfig { max_attempts: 2 });
        assert_eq!(policy.max_attempts(), 2);
    }
}
