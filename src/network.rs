//! Network URL constants for the MOEX SDK.

/// Default ISS REST base URL.
pub const DEFAULT_ISS_URL: &str = "https://iss.moex.com/iss";

/// Default MOEX Passport base URL (session authentication).
pub const DEFAULT_PASSPORT_URL: &str = "https://passport.moex.com";
