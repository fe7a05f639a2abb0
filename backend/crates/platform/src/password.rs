//! Password Hashing (PBKDF2-HMAC-SHA512)
//!
//! Stored format: `<derivedKeyHex>.<saltHex>`
//! - derived key: 64 bytes, 128 hex characters
//! - salt: 16 random bytes, 32 hex characters
//!
//! The KDF is fed the salt's hex text rather than its raw bytes, and the
//! iteration count is not part of the stored string. Both are fixed by the
//! format of hashes already at rest; verifying with a different round count
//! than the one used at hash time fails.

use sha2::Sha512;
use thiserror::Error;

use crate::crypto::{constant_time_eq, is_hex, random_hex};

/// Default PBKDF2 iteration count
pub const DEFAULT_ITERATION_ROUNDS: u32 = 100_000;

/// Derived key length in bytes
pub const DERIVED_KEY_LEN: usize = 64;

/// Salt length in bytes (before hex encoding)
pub const SALT_LEN: usize = 16;

const DELIMITER: char = '.';

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Failed to generate salt: {0}")]
    SaltGeneration(#[from] rand::Error),

    #[error("Hashing task failed: {0}")]
    TaskFailed(String),
}

/// PBKDF2 hasher bound to one iteration count
///
/// ## Examples
/// ```rust
/// use platform::password::PasswordHasher;
///
/// let hasher = PasswordHasher::new(1_000);
/// let stored = hasher.hash("Abc@1234").unwrap();
/// assert!(hasher.verify("Abc@1234", &stored));
/// assert!(!hasher.verify("abc@1234", &stored));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    rounds: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATION_ROUNDS)
    }
}

impl PasswordHasher {
    pub fn new(rounds: u32) -> Self {
        Self { rounds }
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Hash with a fresh random salt
    pub fn hash(&self, plain: &str) -> Result<String, PasswordHashError> {
        let salt_hex = random_hex(SALT_LEN)?;
        let key = derive_key(plain, &salt_hex, self.rounds);
        Ok(format!("{}{DELIMITER}{salt_hex}", hex::encode(key)))
    }

    /// Verify `plain` against a stored `<keyHex>.<saltHex>` string
    ///
    /// Malformed stored values return `false` before any KDF work.
    pub fn verify(&self, plain: &str, stored: &str) -> bool {
        let Some((key_hex, salt_hex)) = split_stored(stored) else {
            return false;
        };
        let Ok(expected) = hex::decode(key_hex) else {
            return false;
        };
        if expected.len() != DERIVED_KEY_LEN {
            return false;
        }

        let derived = derive_key(plain, salt_hex, self.rounds);
        constant_time_eq(&derived, &expected)
    }

    /// [`hash`](Self::hash) on the blocking thread pool
    pub async fn hash_blocking(&self, plain: String) -> Result<String, PasswordHashError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&plain))
            .await
            .map_err(|e| PasswordHashError::TaskFailed(e.to_string()))?
    }

    /// [`verify`](Self::verify) on the blocking thread pool
    ///
    /// A panicked or cancelled task counts as a failed verification.
    pub async fn verify_blocking(&self, plain: String, stored: String) -> bool {
        let hasher = *self;
        match tokio::task::spawn_blocking(move || hasher.verify(&plain, &stored)).await {
            Ok(valid) => valid,
            Err(e) => {
                tracing::error!(error = %e, "Password verification task failed");
                false
            }
        }
    }
}

/// Split into `(keyHex, saltHex)`; both must be non-empty hex with a single delimiter
fn split_stored(stored: &str) -> Option<(&str, &str)> {
    let (key_hex, salt_hex) = stored.split_once(DELIMITER)?;
    if !is_hex(key_hex) || !is_hex(salt_hex) {
        return None;
    }
    Some((key_hex, salt_hex))
}

fn derive_key(plain: &str, salt: &str, rounds: u32) -> [u8; DERIVED_KEY_LEN] {
    let mut key = [0u8; DERIVED_KEY_LEN];
    pbkdf2::pbkdf2_hmac::<Sha512>(plain.as_bytes(), salt.as_bytes(), rounds, &mut key);
    key
}
