//! Human-readable duration parsing
//!
//! Accepts `<number><unit>` where unit is one of `ms`, `s`, `m`, `h`, `d`, `w`.
//! A bare number is read as seconds.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    #[error("Duration is empty")]
    Empty,

    #[error("Invalid duration number: {0}")]
    InvalidNumber(String),

    #[error("Unknown duration unit: {0}")]
    UnknownUnit(String),

    #[error("Duration is too large: {0}")]
    Overflow(String),
}

/// Parse `"15m"`, `"7d"`, `"500ms"` or `"30"` into a [`Duration`]
///
/// ```rust
/// use std::time::Duration;
/// use platform::duration::parse_duration;
///
/// assert_eq!(parse_duration("15m").unwrap(), Duration::from_secs(900));
/// assert_eq!(parse_duration("30").unwrap(), Duration::from_secs(30));
/// ```
pub fn parse_duration(input: &str) -> Result<Duration, DurationParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(DurationParseError::Empty);
    }

    let split = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let (number, unit) = input.split_at(split);

    let value: u64 = number
        .parse()
        .map_err(|_| DurationParseError::InvalidNumber(input.to_string()))?;

    let overflow = || DurationParseError::Overflow(input.to_string());
    let secs = |factor: u64| {
        value
            .checked_mul(factor)
            .map(Duration::from_secs)
            .ok_or_else(overflow)
    };

    match unit.trim() {
        "ms" => Ok(Duration::from_millis(value)),
        "" | "s" => Ok(Duration::from_secs(value)),
        "m" => secs(60),
        "h" => secs(60 * 60),
        "d" => secs(24 * 60 * 60),
        "w" => secs(7 * 24 * 60 * 60),
        other => Err(DurationParseError::UnknownUnit(other.to_string())),
    }
}
