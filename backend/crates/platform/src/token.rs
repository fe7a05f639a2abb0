//! Signed Token Codec (JWT, HS256)
//!
//! Tokens carry caller-defined claims plus `iat`, `exp` and a random `jti`.
//! The secret is always chosen by the caller from the token's purpose; nothing
//! in the token selects it.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Token codec errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Signature is valid but `exp` has passed
    #[error("Token has expired")]
    Expired,

    /// Malformed, wrong signature, wrong algorithm or unreadable claims
    #[error("Token is invalid: {0}")]
    Invalid(String),

    #[error("Failed to sign token: {0}")]
    Signing(String),

    /// Lifetime cannot be represented as an expiry timestamp
    #[error("Token lifetime out of range: {0}")]
    Lifetime(String),
}

/// Claims as decoded from a verified token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedClaims<C> {
    #[serde(flatten)]
    pub claims: C,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Serialize)]
struct OutgoingClaims<'a, C> {
    #[serde(flatten)]
    claims: &'a C,
    jti: String,
    iat: i64,
    exp: i64,
}

/// Convert a configured lifetime into the offset `sign` takes
///
/// Fails when the lifetime does not fit a `TimeDelta` or when `now + ttl`
/// would overflow the calendar, so bad settings can be rejected at startup.
pub fn lifetime(ttl: Duration) -> Result<TimeDelta, TokenError> {
    let delta = TimeDelta::from_std(ttl).map_err(|e| TokenError::Lifetime(e.to_string()))?;
    expiry_at(Utc::now(), delta)?;
    Ok(delta)
}

fn expiry_at(now: DateTime<Utc>, expires_in: TimeDelta) -> Result<DateTime<Utc>, TokenError> {
    now.checked_add_signed(expires_in)
        .ok_or_else(|| TokenError::Lifetime(format!("{expires_in} from {now}")))
}

/// Sign `claims` so that the token expires `expires_in` from now
///
/// A negative `expires_in` produces an already-expired token.
///
/// ## Examples
/// ```rust
/// use chrono::TimeDelta;
/// use platform::token::{sign, verify};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Claims { sub: String }
///
/// let token = sign(&Claims { sub: "u1".into() }, b"secret", TimeDelta::minutes(15)).unwrap();
/// let decoded = verify::<Claims>(&token, b"secret").unwrap();
/// assert_eq!(decoded.claims.sub, "u1");
/// ```
pub fn sign<C: Serialize>(
    claims: &C,
    secret: &[u8],
    expires_in: TimeDelta,
) -> Result<String, TokenError> {
    let now = Utc::now();
    let payload = OutgoingClaims {
        claims,
        jti: uuid::Uuid::new_v4().simple().to_string(),
        iat: now.timestamp(),
        exp: expiry_at(now, expires_in)?.timestamp(),
    };

    encode(
        &Header::new(ALGORITHM),
        &payload,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

/// Verify signature and expiry against `secret`
///
/// No clock leeway is applied, so a token is expired as soon as `exp` passes.
pub fn verify<C: DeserializeOwned>(
    token: &str,
    secret: &[u8],
) -> Result<SignedClaims<C>, TokenError> {
    let mut validation = Validation::new(ALGORITHM);
    validation.leeway = 0;
    validation.validate_exp = true;

    decode::<SignedClaims<C>>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            JwtErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(e.to_string()),
        })
}
