//! Remaining-time text for listings that leave the shop.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// How often a visible card should recompute its countdown.
pub const COUNTDOWN_INTERVAL: Duration = Duration::from_secs(1);

pub const UNAVAILABLE_TEXT: &str = "Fecha no disponible";
pub const EXPIRED_TEXT: &str = "Expirado";

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// The expiry could not be parsed.
    Unavailable,
    Expired,
    Remaining(Duration),
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Unavailable => f.write_str(UNAVAILABLE_TEXT),
            Countdown::Expired => f.write_str(EXPIRED_TEXT),
            Countdown::Remaining(left) => {
                let total = left.as_secs();
                let days = total / SECS_PER_DAY;
                let hours = (total % SECS_PER_DAY) / SECS_PER_HOUR;
                let minutes = (total % SECS_PER_HOUR) / SECS_PER_MINUTE;
                let seconds = total % SECS_PER_MINUTE;
                if days > 0 {
                    write!(f, "{days}d {hours}h {minutes}m")
                } else {
                    write!(f, "{hours}h {minutes}m {seconds}s")
                }
            }
        }
    }
}

/// Time left between `now` and `expiry`.
pub fn compute_remaining(now: DateTime<Utc>, expiry: &str) -> Countdown {
    let Some(expiry) = parse_expiry(expiry) else {
        return Countdown::Unavailable;
    };
    match (expiry - now).to_std() {
        Ok(left) if !left.is_zero() => Countdown::Remaining(left),
        _ => Countdown::Expired,
    }
}

/// Countdown text for an optional expiry, as shown on a card.
pub fn remaining_text(now: DateTime<Utc>, expiry: Option<&str>) -> String {
    match expiry {
        Some(raw) => compute_remaining(now, raw).to_string(),
        None => Countdown::Unavailable.to_string(),
    }
}

/// Parse the shop's expiry timestamps.
///
/// Accepts RFC 3339, a naive ISO date-time and a bare ISO date; the naive
/// forms are read as UTC.
pub fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
