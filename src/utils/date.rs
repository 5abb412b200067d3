//! UTC datetime utilities without timezone dependencies.
//!
//! Provides a lightweight `DateTimeUtc` struct for `lastmod` handling.
//!
//! # Features
//!
//! - Zero external dependencies for date parsing
//! - RFC 3339 formatting (W3C datetime, as used by sitemaps)
//! - `±hh:mm` offsets are normalized to UTC
//! - Unix-time conversion for file modification times
//!
//! # Examples
//!
//! ```ignore
//! let dt = DateTimeUtc::parse("2024-06-15").unwrap();
//! let dt = DateTimeUtc::parse("2024-06-15T14:30:45+02:00").unwrap();
//! assert_eq!(dt.to_rfc3339(), "2024-06-15T12:30:45Z");
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Result, bail};
use serde::{Serialize, Serializer};

const SECS_PER_DAY: i64 = 86_400;

/// UTC datetime without timezone complexity
///
/// Field order makes the derived `Ord` chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTimeUtc {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTimeUtc {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Parse an ISO 8601 / RFC 3339 date or datetime.
    ///
    /// Accepted shapes:
    /// - `YYYY-MM-DD`
    /// - `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD HH:MM:SS` (taken as UTC)
    /// - either of the above with fractional seconds and a `Z` or `±hh:mm` suffix
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let bytes = s.as_bytes();

        // Minimum: "YYYY-MM-DD" (10 chars)
        if bytes.len() < 10 {
            return None;
        }

        let year = parse_u16(&bytes[0..4])?;
        if bytes[4] != b'-' {
            return None;
        }
        let month = parse_u8(&bytes[5..7])?;
        if bytes[7] != b'-' {
            return None;
        }
        let day = parse_u8(&bytes[8..10])?;

        if bytes.len() == 10 {
            let dt = Self::from_ymd(year, month, day);
            dt.validate().ok()?;
            return Some(dt);
        }

        if bytes.len() < 19 || !matches!(bytes[10], b'T' | b't' | b' ') {
            return None;
        }
        if bytes[13] != b':' || bytes[16] != b':' {
            return None;
        }
        let hour = parse_u8(&bytes[11..13])?;
        let minute = parse_u8(&bytes[14..16])?;
        let second = parse_u8(&bytes[17..19])?;

        let dt = Self::new(year, month, day, hour, minute, second);
        dt.validate().ok()?;

        let offset = parse_offset(&s[19..])?;
        if offset == 0 {
            Some(dt)
        } else {
            Self::from_unix_secs(dt.to_unix_secs() - offset)
        }
    }

    pub fn validate(&self) -> Result<()> {
        let Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        } = *self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }

        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }
        if hour > 23 {
            bail!("hour is invalid: {hour}");
        }
        if minute > 59 {
            bail!("minute is invalid: {minute}");
        }
        if second > 59 {
            bail!("second is invalid: {second}");
        }

        Ok(())
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// Seconds since the unix epoch.
    pub fn to_unix_secs(self) -> i64 {
        let days = days_from_civil(
            i64::from(self.year),
            i64::from(self.month),
            i64::from(self.day),
        );
        days * SECS_PER_DAY
            + i64::from(self.hour) * 3600
            + i64::from(self.minute) * 60
            + i64::from(self.second)
    }

    /// Build from seconds since the unix epoch.
    ///
    /// Returns `None` for instants outside the `u16` year range.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Ranges checked
    pub fn from_unix_secs(secs: i64) -> Option<Self> {
        let days = secs.div_euclid(SECS_PER_DAY);
        let rem = secs.rem_euclid(SECS_PER_DAY);
        let (year, month, day) = civil_from_days(days);
        if !(0..=i64::from(u16::MAX)).contains(&year) {
            return None;
        }
        Some(Self::new(
            year as u16,
            month as u8,
            day as u8,
            (rem / 3600) as u8,
            ((rem % 3600) / 60) as u8,
            (rem % 60) as u8,
        ))
    }

    /// Convert a filesystem timestamp.
    #[allow(clippy::cast_possible_wrap)] // Seconds since 1970 fit in i64
    pub fn from_system_time(time: SystemTime) -> Option<Self> {
        let secs = time.duration_since(UNIX_EPOCH).ok()?.as_secs();
        Self::from_unix_secs(secs as i64)
    }

    /// Format as RFC 3339 (W3C datetime).
    ///
    /// Returns: `YYYY-MM-DDTHH:MM:SSZ`
    pub fn to_rfc3339(self) -> String {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }

    /// Date-only form: `YYYY-MM-DD`.
    pub fn to_date_string(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl std::fmt::Display for DateTimeUtc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl Serialize for DateTimeUtc {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

/// Days since 1970-01-01 for a proleptic Gregorian date.
fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of `days_from_civil`: `(year, month, day)`.
fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

/// Parse the tail after `HH:MM:SS`: fraction and zone. Returns offset seconds.
fn parse_offset(tail: &str) -> Option<i64> {
    let tail = match tail.strip_prefix('.') {
        Some(frac) => {
            let digits = frac.bytes().take_while(u8::is_ascii_digit).count();
            if digits == 0 {
                return None;
            }
            &frac[digits..]
        }
        None => tail,
    };

    match tail {
        "" | "Z" | "z" => Some(0),
        _ => {
            let bytes = tail.as_bytes();
            let sign = match bytes[0] {
                b'+' => 1,
                b'-' => -1,
                _ => return None,
            };
            let rest = &bytes[1..];
            let (h, m) = match rest.len() {
                5 if rest[2] == b':' => (&rest[0..2], &rest[3..5]),
                4 => (&rest[0..2], &rest[2..4]),
                _ => return None,
            };
            let hours = i64::from(parse_u8(h)?);
            let minutes = i64::from(parse_u8(m)?);
            if hours > 23 || minutes > 59 {
                return None;
            }
            Some(sign * (hours * 3600 + minutes * 60))
        }
    }
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + u16::from(d);
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        let dt = DateTimeUtc::parse("2024-06-15").unwrap();
        assert_eq!(dt, DateTimeUtc::from_ymd(2024, 6, 15));
    }

    #[test]
    fn test_parse_datetime_variants() {
        let expected = DateTimeUtc::new(2024, 6, 15, 14, 30, 45);
        assert_eq!(DateTimeUtc::parse("2024-06-15T14:30:45Z"), Some(expected));
        assert_eq!(DateTimeUtc::parse("2024-06-15T14:30:45"), Some(expected));
        assert_eq!(DateTimeUtc::parse("2024-06-15 14:30:45"), Some(expected));
        assert_eq!(DateTimeUtc::parse("2024-06-15T14:30:45.123Z"), Some(expected));
        assert_eq!(DateTimeUtc::parse("2024-06-15T14:30:45+00:00"), Some(expected));
    }

    #[test]
    fn test_parse_offset_normalized_to_utc() {
        let dt = DateTimeUtc::parse("2024-06-15T14:30:45+02:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-06-15T12:30:45Z");

        // Crosses midnight backwards
        let dt = DateTimeUtc::parse("2024-03-01T01:00:00+0200").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-02-29T23:00:00Z");

        let dt = DateTimeUtc::parse("2024-12-31T23:30:00-01:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-01-01T00:30:00Z");
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(DateTimeUtc::parse(""), None);
        assert_eq!(DateTimeUtc::parse("2024/06/15"), None);
        assert_eq!(DateTimeUtc::parse("2024-13-01"), None);
        assert_eq!(DateTimeUtc::parse("2023-02-29"), None);
        assert_eq!(DateTimeUtc::parse("2024-06-15T25:00:00Z"), None);
        assert_eq!(DateTimeUtc::parse("2024-06-15T10:00:00 UTC"), None);
        assert_eq!(DateTimeUtc::parse("yesterday"), None);
    }

    #[test]
    fn test_unix_round_trip_known_instants() {
        assert_eq!(DateTimeUtc::from_ymd(1970, 1, 1).to_unix_secs(), 0);
        assert_eq!(
            DateTimeUtc::new(2000, 3, 1, 0, 0, 0).to_unix_secs(),
            951_868_800
        );
        assert_eq!(
            DateTimeUtc::from_unix_secs(1_718_461_845),
            Some(DateTimeUtc::new(2024, 6, 15, 14, 30, 45))
        );
    }

    #[test]
    fn test_validate_leap_year() {
        assert!(DateTimeUtc::new(2024, 2, 29, 12, 0, 0).validate().is_ok());
        assert!(DateTimeUtc::new(2000, 2, 29, 12, 0, 0).validate().is_ok()); // divisible by 400
        assert!(DateTimeUtc::new(2023, 2, 29, 12, 0, 0).validate().is_err());
        // divisible by 100 but not 400
        assert!(DateTimeUtc::new(1900, 2, 29, 12, 0, 0).validate().is_err());
    }

    #[test]
    fn test_ordering_is_chronological() {
        let older = DateTimeUtc::parse("2023-12-31T23:59:59Z").unwrap();
        let newer = DateTimeUtc::parse("2024-01-01").unwrap();
        assert!(older < newer);
        assert_eq!([older, newer].into_iter().max(), Some(newer));
    }

    #[test]
    fn test_serialize_as_rfc3339() {
        let dt = DateTimeUtc::from_ymd(2024, 1, 2);
        assert_eq!(
            serde_json::to_string(&dt).unwrap(),
            "\"2024-01-02T00:00:00Z\""
        );
        assert_eq!(dt.to_date_string(), "2024-01-02");
    }
}
