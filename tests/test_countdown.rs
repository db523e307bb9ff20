//! Countdown formatting and expiry parsing tests.

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use dropcito_sdk::countdown::{self, Countdown, EXPIRED_TEXT, UNAVAILABLE_TEXT};

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

#[test]
fn under_a_day_shows_seconds() {
    let now = at(2030, 1, 1, 0, 0, 0);
    let text = countdown::remaining_text(now, Some("2030-01-01T05:04:03Z"));
    assert_eq!(text, "5h 4m 3s");
}

#[test]
fn over_a_day_drops_seconds() {
    let now = at(2030, 1, 1, 0, 0, 0);
    let text = countdown::remaining_text(now, Some("2030-01-03T07:30:59Z"));
    assert_eq!(text, "2d 7h 30m");
}

#[test]
fn past_or_equal_expiry_is_expired() {
    let now = at(2030, 1, 1, 12, 0, 0);
    assert_eq!(countdown::remaining_text(now, Some("2030-01-01T11:59:59Z")), EXPIRED_TEXT);
    assert_eq!(countdown::remaining_text(now, Some("2030-01-01T12:00:00Z")), EXPIRED_TEXT);
}

#[test]
fn missing_or_garbage_expiry_is_unavailable() {
    let now = at(2030, 1, 1, 0, 0, 0);
    assert_eq!(countdown::remaining_text(now, None), UNAVAILABLE_TEXT);
    assert_eq!(countdown::remaining_text(now, Some("")), UNAVAILABLE_TEXT);
    assert_eq!(countdown::remaining_text(now, Some("mañana")), UNAVAILABLE_TEXT);
}

#[test]
fn compute_remaining_returns_exact_duration() {
    let now = at(2030, 1, 1, 0, 0, 0);
    assert_eq!(
        countdown::compute_remaining(now, "2030-01-01T00:01:30Z"),
        Countdown::Remaining(Duration::from_secs(90))
    );
    assert_eq!(
        countdown::remaining_text(now, Some("2030-01-01T00:01:30Z")),
        "0h 1m 30s"
    );
}

#[test]
fn offsets_are_normalized_to_utc() {
    let now = at(2030, 1, 1, 0, 0, 0);
    // 2030-01-01T03:00:00Z
    let text = countdown::remaining_text(now, Some("2030-01-01T00:00:00-03:00"));
    assert_eq!(text, "3h 0m 0s");
}

#[test]
fn naive_and_date_only_forms_parse_as_utc() {
    assert_eq!(
        countdown::parse_expiry("2030-01-02T03:04:05.123"),
        Some(at(2030, 1, 2, 3, 4, 5) + chrono::Duration::milliseconds(123))
    );
    assert_eq!(countdown::parse_expiry("2030-01-02"), Some(at(2030, 1, 2, 0, 0, 0)));
    assert_eq!(countdown::parse_expiry("02/01/2030"), None);
}
