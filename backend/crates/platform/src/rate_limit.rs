//! Rate Limiting Infrastructure
//!
//! Fixed-window request counters keyed by caller. The store is a trait so a
//! shared backend can stand in for the in-process one.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::Mutex;

/// Windows are swept once the map grows past this many keys
const PURGE_THRESHOLD: usize = 10_000;

/// Rate limit configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    /// 10 requests per second
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(1),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }

    pub fn window_ms(&self) -> i64 {
        i64::try_from(self.window.as_millis()).unwrap_or(i64::MAX)
    }
}

/// Rate limit check result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

impl RateLimitResult {
    /// Whole seconds until the window resets, at least 1
    pub fn retry_after_secs(&self, now_ms: i64) -> u64 {
        let wait_ms = u64::try_from(self.reset_at_ms.saturating_sub(now_ms)).unwrap_or(0);
        wait_ms.div_ceil(1_000).max(1)
    }
}

#[derive(Debug, Error)]
pub enum RateLimitError {
    #[error("Rate limit store failed: {0}")]
    Store(String),
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Count one request against `key` and report whether it may proceed
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, RateLimitError>;
}

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    reset_at_ms: i64,
}

/// In-process store; counters are lost on restart and not shared across
/// instances
#[derive(Debug, Clone, Default)]
pub struct InMemoryRateLimitStore {
    windows: Arc<Mutex<HashMap<String, Window>>>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// [`RateLimitStore::check_and_increment`] at an explicit clock reading
    pub async fn check_at(&self, key: &str, config: &RateLimitConfig, now_ms: i64) -> RateLimitResult {
        let mut windows = self.windows.lock().await;

        if windows.len() >= PURGE_THRESHOLD {
            windows.retain(|_, window| window.reset_at_ms > now_ms);
        }

        let fresh = Window {
            count: 0,
            reset_at_ms: now_ms.saturating_add(config.window_ms()),
        };
        let window = windows.entry(key.to_string()).or_insert(fresh);
        if window.reset_at_ms <= now_ms {
            *window = fresh;
        }

        if window.count >= config.max_requests {
            return RateLimitResult {
                allowed: false,
                remaining: 0,
                reset_at_ms: window.reset_at_ms,
            };
        }

        window.count += 1;
        RateLimitResult {
            allowed: true,
            remaining: config.max_requests - window.count,
            reset_at_ms: window.reset_at_ms,
        }
    }

    pub async fn len(&self) -> usize {
        self.windows.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.windows.lock().await.is_empty()
    }
}

impl RateLimitStore for InMemoryRateLimitStore {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, RateLimitError> {
        Ok(self.check_at(key, config, Utc::now().timestamp_millis()).await)
    }
}
