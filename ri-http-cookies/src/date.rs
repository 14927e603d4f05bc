//! Rendering of integer `expires` values as cookie dates.

use std::fmt;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime};

/// Integer `expires` values at or beyond this magnitude are Unix timestamps
/// (2000-01-01T00:00:00Z); smaller ones are offsets in seconds from now.
pub const ABSOLUTE_EXPIRES_THRESHOLD: i64 = 946_684_800;

/// Bounds of what the four-digit year in a cookie date can express.
const MIN_TIMESTAMP: i64 = -62_135_596_800;
const MAX_TIMESTAMP: i64 = 253_402_300_799;

/// `Wdy, DD Mon YYYY HH:MM:SS GMT`
const COOKIE_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT");

/// Resolve an integer `expires` value to a point in time.
pub fn expires_at(seconds: i64) -> OffsetDateTime {
    let timestamp = if seconds.unsigned_abs() >= ABSOLUTE_EXPIRES_THRESHOLD.unsigned_abs() {
        seconds
    } else {
        (OffsetDateTime::now_utc() + Duration::seconds(seconds)).unix_timestamp()
    };

    // clamped, so the conversion cannot fail
    OffsetDateTime::from_unix_timestamp(timestamp.clamp(MIN_TIMESTAMP, MAX_TIMESTAMP))
        .unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

/// A UTC point in time displayed as `Wdy, DD Mon YYYY HH:MM:SS GMT`.
///
/// # Examples
///
/// ```
/// use ri_http_cookies::{CookieDate, expires_at};
///
/// assert_eq!(CookieDate(expires_at(1_262_304_000)).to_string(), "Fri, 01 Jan 2010 00:00:00 GMT");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookieDate(pub OffsetDateTime);

impl fmt::Display for CookieDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.format(COOKIE_DATE).map_err(|_| fmt::Error)?)
    }
}
