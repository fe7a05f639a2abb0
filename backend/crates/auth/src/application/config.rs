//! Application Configuration
//!
//! Configuration for the Auth application layer. Built once at startup and
//! shared read-only behind an `Arc`.

use std::fmt;
use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::password::{DEFAULT_ITERATION_ROUNDS, PasswordHasher};
use platform::rate_limit::RateLimitConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

pub const ACCESS_COOKIE_NAME: &str = "access_token";
pub const REFRESH_COOKIE_NAME: &str = "refresh_token";

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC key for access tokens
    pub access_secret: Vec<u8>,
    /// HMAC key for refresh tokens; must differ from `access_secret`
    pub refresh_secret: Vec<u8>,
    /// Access token lifetime (15 minutes)
    pub access_ttl: Duration,
    /// Refresh token lifetime (7 days)
    pub refresh_ttl: Duration,
    /// PBKDF2 iteration count
    pub password_rounds: u32,
    pub access_cookie_name: String,
    pub refresh_cookie_name: String,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Per-caller request budget on auth routes; `None` disables throttling
    pub rate_limit: Option<RateLimitConfig>,
}

impl AuthConfig {
    /// Config with the given secrets and default lifetimes
    pub fn new(access_secret: impl Into<Vec<u8>>, refresh_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            access_ttl: Duration::from_secs(15 * 60),
            refresh_ttl: Duration::from_secs(7 * 24 * 3600),
            password_rounds: DEFAULT_ITERATION_ROUNDS,
            access_cookie_name: ACCESS_COOKIE_NAME.to_string(),
            refresh_cookie_name: REFRESH_COOKIE_NAME.to_string(),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            rate_limit: Some(RateLimitConfig::default()),
        }
    }

    /// Create config with random secrets (tokens do not survive a restart)
    pub fn with_random_secrets() -> Self {
        use rand::RngCore;
        let mut access = [0u8; 32];
        let mut refresh = [0u8; 32];
        let mut rng = rand::thread_rng();
        rng.fill_bytes(&mut access);
        rng.fill_bytes(&mut refresh);
        Self::new(access.to_vec(), refresh.to_vec())
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secrets()
        }
    }

    pub fn with_password_rounds(mut self, rounds: u32) -> Self {
        self.password_rounds = rounds;
        self
    }

    pub fn with_rate_limit(mut self, rate_limit: Option<RateLimitConfig>) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    pub fn password_hasher(&self) -> PasswordHasher {
        PasswordHasher::new(self.password_rounds)
    }

    /// Cookie carrying the access token; Max-Age follows the token lifetime
    pub fn access_cookie(&self) -> CookieConfig {
        self.cookie(&self.access_cookie_name, self.access_ttl)
    }

    /// Cookie carrying the refresh token
    pub fn refresh_cookie(&self) -> CookieConfig {
        self.cookie(&self.refresh_cookie_name, self.refresh_ttl)
    }

    fn cookie(&self, name: &str, ttl: Duration) -> CookieConfig {
        CookieConfig::new(name, ttl.as_secs())
            .with_secure(self.cookie_secure)
            .with_same_site(self.cookie_same_site)
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_secret", &"[REDACTED]")
            .field("refresh_secret", &"[REDACTED]")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("password_rounds", &self.password_rounds)
            .field("access_cookie_name", &self.access_cookie_name)
            .field("refresh_cookie_name", &self.refresh_cookie_name)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("rate_limit", &self.rate_limit)
            .finish()
    }
}
