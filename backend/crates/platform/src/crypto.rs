//! Cryptographic Utilities

use rand::{RngCore, rngs::OsRng};
use subtle::ConstantTimeEq;

/// Generate cryptographically secure random bytes
///
/// Returns an error instead of panicking when the OS RNG is unavailable.
pub fn random_bytes(len: usize) -> Result<Vec<u8>, rand::Error> {
    let mut bytes = vec![0u8; len];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(bytes)
}

/// Random bytes rendered as lowercase hex (`2 * len` characters)
pub fn random_hex(len: usize) -> Result<String, rand::Error> {
    random_bytes(len).map(hex::encode)
}

/// Constant-time comparison
///
/// Unequal lengths return `false` up front; equal-length inputs are compared
/// without short-circuiting on the first differing byte.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// True when `s` is non-empty and every character is an ASCII hex digit
pub fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}
