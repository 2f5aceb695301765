//! Display helpers: durations, clock readouts, and timezone-aware times.
//!
//! Timezone names are looked up in the IANA database (`America/New_York`,
//! `Europe/Paris`, ...), so daylight saving is applied per instant. Fixed
//! offsets are accepted too: `UTC`, `GMT`, `Z` and `±HH:MM` / `±HHMM` / `±HH`
//! (optionally prefixed with `UTC`). Anything else is shown in UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::clock::Clock;
use crate::log_warn;

const ENABLE_LOGS: bool = true;

/// `"12m 5s"`, as shown next to history entries.
pub fn format_duration(secs: u64) -> String {
    format!("{}m {}s", secs / 60, secs % 60)
}

/// `"MM:SS"` for the live timer. Minutes keep growing past 99.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// A resolved display timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayZone {
    Named(Tz),
    Fixed(FixedOffset),
}

impl DisplayZone {
    /// Seconds east of UTC in effect at `at`.
    pub fn utc_offset_secs(&self, at: DateTime<Utc>) -> i32 {
        match self {
            DisplayZone::Named(tz) => at.with_timezone(tz).offset().fix().local_minus_utc(),
            DisplayZone::Fixed(offset) => offset.local_minus_utc(),
        }
    }

    /// Wall-clock reading of `at` in this zone.
    pub fn local(&self, at: DateTime<Utc>) -> NaiveDateTime {
        match self {
            DisplayZone::Named(tz) => at.with_timezone(tz).naive_local(),
            DisplayZone::Fixed(offset) => at.with_timezone(offset).naive_local(),
        }
    }

    /// The instant a wall-clock reading names in this zone. An ambiguous
    /// reading takes the earlier instant; one skipped by a DST jump is `None`.
    pub fn instant(&self, local: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            DisplayZone::Named(tz) => tz
                .from_local_datetime(local)
                .earliest()
                .map(|at| at.with_timezone(&Utc)),
            DisplayZone::Fixed(offset) => offset
                .from_local_datetime(local)
                .earliest()
                .map(|at| at.with_timezone(&Utc)),
        }
    }

    fn format(&self, at: DateTime<Utc>, fmt: &str) -> String {
        match self {
            DisplayZone::Named(tz) => at.with_timezone(tz).format(fmt).to_string(),
            DisplayZone::Fixed(offset) => at.with_timezone(offset).format(fmt).to_string(),
        }
    }
}

pub fn resolve_zone(timezone: &str) -> DisplayZone {
    if let Ok(tz) = timezone.trim().parse::<Tz>() {
        return DisplayZone::Named(tz);
    }
    parse_offset(timezone)
        .map(DisplayZone::Fixed)
        .unwrap_or_else(|| {
            log_warn!("unsupported timezone {timezone:?}, displaying in UTC");
            DisplayZone::Fixed(utc_offset())
        })
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}

fn parse_offset(timezone: &str) -> Option<FixedOffset> {
    let tz = timezone.trim();
    let upper = tz.to_ascii_uppercase();
    if matches!(upper.as_str(), "UTC" | "GMT" | "Z" | "ETC/UTC" | "ETC/GMT") {
        return Some(utc_offset());
    }

    let rest = upper
        .strip_prefix("UTC")
        .or_else(|| upper.strip_prefix("GMT"))
        .unwrap_or(&upper);
    let (sign, digits) = match rest.as_bytes().first()? {
        b'+' => (1, &rest[1..]),
        b'-' => (-1, &rest[1..]),
        _ => return None,
    };
    if !digits.is_ascii() {
        return None;
    }

    let (hours, minutes) = match digits.split_once(':') {
        Some((h, m)) => (h, m),
        None if digits.len() == 4 => digits.split_at(2),
        None => (digits, "0"),
    };
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 14 || minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// `"08:05 AM"` in the display timezone.
pub fn format_time(at: DateTime<Utc>, timezone: &str) -> String {
    resolve_zone(timezone).format(at, "%I:%M %p")
}

/// `"Mar 1"` in the display timezone.
pub fn format_date(at: DateTime<Utc>, timezone: &str) -> String {
    resolve_zone(timezone).format(at, "%b %-d")
}

/// Accepts RFC 3339, or a naive `YYYY-MM-DDTHH:MM[:SS]` / `YYYY-MM-DD HH:MM[:SS]`
/// taken as UTC, or a bare date at midnight UTC.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed.with_timezone(&Utc));
    }
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Like [`parse_timestamp`], but an unusable input becomes `clock.now()`.
pub fn parse_timestamp_or_now(input: &str, clock: &impl Clock) -> DateTime<Utc> {
    parse_timestamp(input).unwrap_or_else(|| {
        let now = clock.now();
        log_warn!("invalid date {input:?}, falling back to current time {now}");
        now
    })
}
