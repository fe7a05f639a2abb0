//! Access and refresh token issuance
//!
//! Each purpose signs with its own secret, and the claims also name the
//! purpose, so a token of one kind is never accepted as the other.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use platform::token::{self, TokenError};
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Token purpose, embedded in the claims as `tokenType`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    #[display("ACCESS_TOKEN")]
    AccessToken,
    #[display("REFRESH_TOKEN")]
    RefreshToken,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenClaims {
    user_id: String,
    token_type: TokenKind,
}

/// Freshly minted access and refresh tokens
#[derive(Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

/// Signs and verifies tokens with the secret that belongs to each kind
#[derive(Clone)]
pub struct TokenIssuer {
    config: Arc<AuthConfig>,
}

impl TokenIssuer {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    fn secret(&self, kind: TokenKind) -> &[u8] {
        match kind {
            TokenKind::AccessToken => &self.config.access_secret,
            TokenKind::RefreshToken => &self.config.refresh_secret,
        }
    }

    fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::AccessToken => self.config.access_ttl,
            TokenKind::RefreshToken => self.config.refresh_ttl,
        }
    }

    pub fn issue(&self, kind: TokenKind, user_id: &UserId) -> AuthResult<String> {
        let expires_in =
            token::lifetime(self.ttl(kind)).map_err(|e| AuthError::Internal(e.to_string()))?;

        let claims = TokenClaims {
            user_id: user_id.to_string(),
            token_type: kind,
        };

        token::sign(&claims, self.secret(kind), expires_in)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    pub fn issue_pair(&self, user_id: &UserId) -> AuthResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue(TokenKind::AccessToken, user_id)?,
            refresh_token: self.issue(TokenKind::RefreshToken, user_id)?,
        })
    }

    /// Verify `token` as `kind` and return its owner
    ///
    /// Expiry maps to `TokenExpired`; every other failure is `Unauthorized`.
    pub fn verify(&self, kind: TokenKind, token: &str) -> AuthResult<UserId> {
        let signed = token::verify::<TokenClaims>(token, self.secret(kind)).map_err(|e| match e {
            TokenError::Expired => AuthError::TokenExpired,
            TokenError::Invalid(reason) => {
                tracing::debug!(token_kind = %kind, reason = %reason, "Token rejected");
                AuthError::Unauthorized
            }
            TokenError::Signing(msg) | TokenError::Lifetime(msg) => AuthError::Internal(msg),
        })?;

        if signed.claims.token_type != kind {
            tracing::debug!(
                expected = %kind,
                actual = %signed.claims.token_type,
                "Token type mismatch"
            );
            return Err(AuthError::Unauthorized);
        }

        signed
            .claims
            .user_id
            .parse::<UserId>()
            .map_err(|_| AuthError::Unauthorized)
    }
}
