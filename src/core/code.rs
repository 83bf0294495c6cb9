//! Barcode identifier generation.
//!
//! A code is the low-order nine digits of the current Unix time in
//! milliseconds followed by a three-digit random suffix: always twelve ASCII
//! digits. Collisions are possible by design and merely make a lookup
//! ambiguous, so no uniqueness registry is kept.

use chrono::Utc;
use rand::Rng;

/// Generates a fresh 12-digit barcode value from the current time and a
/// random suffix.
#[must_use]
pub fn generate() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = rand::thread_rng().gen_range(0..1000u16);
    compose(millis, suffix)
}

/// Deterministic composition of a time value and a suffix; the seam tests
/// drive directly.
#[must_use]
pub fn compose(millis: i64, suffix: u16) -> String {
    let time_part = millis.rem_euclid(1_000_000_000);
    format!("{time_part:09}{:03}", suffix % 1000)
}
