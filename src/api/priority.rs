//! Priority conversion
//!
//! The API stores priority inverted relative to what users see:
//!
//! | user | API |
//! |------|-----|
//! | P1 (urgent) | 4 |
//! | P2 | 3 |
//! | P3 | 2 |
//! | P4 (normal) | 1 |
//!
//! These two functions are the only place the inversion happens.

use thiserror::Error;

/// Invalid user-facing priority
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("priority must be 1-4 (1=urgent, 4=normal): {0}")]
pub struct PriorityError(pub String);

/// Parse a user priority (`1`-`4`, optionally written `p1`-`p4`) into the
/// API value.
pub fn parse_priority(input: &str) -> Result<u8, PriorityError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix('p')
        .or_else(|| trimmed.strip_prefix('P'))
        .unwrap_or(trimmed);

    match digits.parse::<u8>() {
        Ok(n @ 1..=4) => Ok(5 - n),
        _ => Err(PriorityError(input.to_string())),
    }
}

/// Render an API priority as the user label (`P1`..`P4`). Unknown values
/// render as `P4`.
#[must_use]
pub const fn format_priority(api_priority: u8) -> &'static str {
    match api_priority {
        4 => "P1",
        3 => "P2",
        2 => "P3",
        _ => "P4",
    }
}
