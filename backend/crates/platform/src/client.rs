//! Client identification utilities
//!
//! Reads who is calling from request headers, for request spans and logs.

use std::net::IpAddr;

use axum::http::{HeaderMap, header};

/// Caller details attached to request spans
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    /// From X-Forwarded-For or the direct connection
    pub ip: Option<IpAddr>,
    pub user_agent: Option<String>,
}

impl ClientInfo {
    pub fn from_headers(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Self {
        Self {
            ip: extract_client_ip(headers, direct_ip),
            user_agent: headers
                .get(header::USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        }
    }

    /// IP rendered for logging, `-` when unknown
    pub fn ip_display(&self) -> String {
        self.ip.map_or_else(|| "-".to_string(), |ip| ip.to_string())
    }

    pub fn user_agent_display(&self) -> &str {
        self.user_agent.as_deref().unwrap_or("-")
    }
}

/// Extract client IP address from headers
///
/// Checks X-Forwarded-For (first entry) first, then falls back to the
/// direct connection IP.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|xff| xff.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok())
        .or(direct_ip)
}
