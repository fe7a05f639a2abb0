//! Request throttling
//!
//! Each caller gets a request budget per window. Authenticated callers are
//! tracked by user id, everyone else by client IP.

use std::net::{IpAddr, SocketAddr};

use axum::extract::ConnectInfo;
use axum::http::{Extensions, HeaderMap};
use chrono::Utc;
use platform::client::ClientInfo;
use platform::rate_limit::{InMemoryRateLimitStore, RateLimitConfig, RateLimitStore};

use crate::application::validate_access_token::CurrentUser;
use crate::error::{AuthError, AuthResult};

/// Counter store plus the budget it enforces
#[derive(Debug, Clone)]
pub struct Throttle {
    store: InMemoryRateLimitStore,
    config: RateLimitConfig,
}

impl Throttle {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            store: InMemoryRateLimitStore::new(),
            config,
        }
    }

    /// Count one request for `key`
    ///
    /// A failing store lets the request through.
    pub async fn check(&self, key: &str) -> AuthResult<()> {
        match self.store.check_and_increment(key, &self.config).await {
            Ok(result) if result.allowed => Ok(()),
            Ok(result) => Err(AuthError::TooManyRequests {
                retry_after_secs: result.retry_after_secs(Utc::now().timestamp_millis()),
            }),
            Err(e) => {
                tracing::warn!(error = %e, key, "Rate limit store unavailable");
                Ok(())
            }
        }
    }
}

/// Tracker for a request: `user:<id>` once authenticated, else `ip:<addr>`
pub fn throttle_key(user: Option<&CurrentUser>, headers: &HeaderMap, extensions: &Extensions) -> String {
    if let Some(user) = user {
        return format!("user:{}", user.user_id);
    }

    let direct_ip: Option<IpAddr> = extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    format!("ip:{}", ClientInfo::from_headers(headers, direct_ip).ip_display())
}
