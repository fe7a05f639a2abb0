//! Process configuration
//!
//! Read once from the environment at startup. Any invalid value aborts the
//! process before the listener is bound.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use auth::AuthConfig;
use platform::duration::{DurationParseError, parse_duration};
use platform::rate_limit::RateLimitConfig;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_ACCESS_EXPIRE: &str = "15m";
const DEFAULT_REFRESH_EXPIRE: &str = "7d";
const DEFAULT_RATE_LIMIT_WINDOW: &str = "1s";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("{name} is not a valid duration: {source}")]
    Duration {
        name: &'static str,
        source: DurationParseError,
    },

    #[error("JWT_ACCESS_SECRET_KEY and JWT_REFRESH_SECRET_KEY must differ")]
    SharedSecret,
}

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnv {
    #[default]
    Local,
    Development,
    Staging,
    Production,
}

impl AppEnv {
    /// Deployed environments are served over TLS
    pub fn requires_secure_cookies(self) -> bool {
        matches!(self, Self::Staging | Self::Production)
    }
}

impl FromStr for AppEnv {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "development" | "dev" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            other => Err(ConfigError::Invalid {
                name: "APP_ENV",
                reason: format!("unknown environment `{other}`"),
            }),
        }
    }
}

impl fmt::Display for AppEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Local => "local",
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        })
    }
}

/// Everything the server needs to start
#[derive(Debug)]
pub struct AppConfig {
    pub env: AppEnv,
    pub port: u16,
    pub database_url: String,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let env = match get("APP_ENV") {
            Some(value) => value.parse()?,
            None => AppEnv::default(),
        };

        let port = match get("PORT") {
            Some(value) => value.trim().parse().map_err(|e| ConfigError::Invalid {
                name: "PORT",
                reason: format!("{e}"),
            })?,
            None => DEFAULT_PORT,
        };

        let database_url = require("DATABASE_URL")?;

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let access_secret = require("JWT_ACCESS_SECRET_KEY")?;
        let refresh_secret = require("JWT_REFRESH_SECRET_KEY")?;
        if access_secret == refresh_secret {
            return Err(ConfigError::SharedSecret);
        }

        let password_rounds = match get("PASSWORD_ITERATION_ROUNDS") {
            Some(value) => parse_rounds(&value)?,
            None => platform::password::DEFAULT_ITERATION_ROUNDS,
        };

        let access_ttl = expiry(
            "JWT_ACCESS_TOKEN_EXPIRE",
            get("JWT_ACCESS_TOKEN_EXPIRE").as_deref(),
            DEFAULT_ACCESS_EXPIRE,
        )?;
        let refresh_ttl = expiry(
            "JWT_REFRESH_TOKEN_EXPIRE",
            get("JWT_REFRESH_TOKEN_EXPIRE").as_deref(),
            DEFAULT_REFRESH_EXPIRE,
        )?;

        let rate_limit = rate_limit(
            get("RATE_LIMIT_MAX_REQUESTS").as_deref(),
            get("RATE_LIMIT_WINDOW").as_deref(),
        )?;

        let mut auth = AuthConfig::new(access_secret.into_bytes(), refresh_secret.into_bytes())
            .with_password_rounds(password_rounds)
            .with_rate_limit(rate_limit);
        auth.access_ttl = access_ttl;
        auth.refresh_ttl = refresh_ttl;
        auth.cookie_secure = env.requires_secure_cookies();

        Ok(Self {
            env,
            port,
            database_url,
            frontend_origins,
            auth,
        })
    }

    /// Convenience for tests and tooling
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Result<Self, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self::from_lookup(|name| vars.get(name).cloned())
    }
}

fn parse_rounds(value: &str) -> Result<u32, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        name: "PASSWORD_ITERATION_ROUNDS",
        reason,
    };

    let rounds: u32 = value.trim().parse().map_err(|e| invalid(format!("{e}")))?;
    if rounds == 0 {
        return Err(invalid("must be greater than zero".to_string()));
    }
    Ok(rounds)
}

/// `RATE_LIMIT_MAX_REQUESTS=0` turns throttling off
fn rate_limit(max: Option<&str>, window: Option<&str>) -> Result<Option<RateLimitConfig>, ConfigError> {
    let max_requests = match max {
        Some(value) => value.trim().parse().map_err(|e| ConfigError::Invalid {
            name: "RATE_LIMIT_MAX_REQUESTS",
            reason: format!("{e}"),
        })?,
        None => RateLimitConfig::default().max_requests,
    };
    if max_requests == 0 {
        return Ok(None);
    }

    let window = parse_duration(window.unwrap_or(DEFAULT_RATE_LIMIT_WINDOW)).map_err(|source| {
        ConfigError::Duration {
            name: "RATE_LIMIT_WINDOW",
            source,
        }
    })?;
    if window.is_zero() {
        return Err(ConfigError::Invalid {
            name: "RATE_LIMIT_WINDOW",
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(Some(RateLimitConfig::new(max_requests, window)))
}

fn expiry(name: &'static str, value: Option<&str>, default: &str) -> Result<Duration, ConfigError> {
    let ttl = parse_duration(value.unwrap_or(default))
        .map_err(|source| ConfigError::Duration { name, source })?;

    if ttl.is_zero() {
        return Err(ConfigError::Invalid {
            name,
            reason: "must be greater than zero".to_string(),
        });
    }
    platform::token::lifetime(ttl).map_err(|e| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })?;
    Ok(ttl)
}
