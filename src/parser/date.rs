//! Permissive date parsing for header timestamps.
//!
//! Relay hops and `Date:` headers carry dates in whatever shape the
//! producing mail system felt like: RFC 2822 with or without the weekday,
//! ISO-ish `YYYY-M-D H:M:S`, US `M/D/YYYY` with AM/PM, bare `M-D-YYYY`,
//! named timezones, parenthetical zone comments, fractional seconds.
//! A date without an explicit offset is UTC — never local time.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::warn;

use crate::i18n;

/// Formats carrying an explicit UTC offset.
const OFFSET_FORMATS: &[&str] = &[
    "%d %b %Y %H:%M:%S%.f %z",
    "%d %b %Y %H:%M %z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%m/%d/%Y %I:%M:%S %p %z",
    "%m/%d/%Y %H:%M:%S %z",
];

/// Formats without an offset; the result is taken as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%d %b %Y %H:%M:%S%.f",
    "%d %b %Y %H:%M",
    "%b %d %H:%M:%S %Y",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
];

/// Parse a date string in any of the accepted formats.
///
/// Returns `None` on failure — callers must never treat failure as epoch
/// zero, because a missing timestamp and `1970-01-01` mean different things
/// to the delay engine.
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Fast paths chrono handles on its own.
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    // "(UTC)"-style comments and the leading weekday carry nothing chrono
    // wants to see in the format strings below.
    let cleaned = strip_zone_comment(trimmed);
    let cleaned = strip_day_of_week(&cleaned);
    let with_offset_tz = replace_named_tz(&cleaned);

    for candidate in [&cleaned, &with_offset_tz] {
        for fmt in OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(candidate, fmt) {
                return Some(dt.with_timezone(&Utc));
            }
        }
        for fmt in NAIVE_FORMATS {
            if let Ok(ndt) = NaiveDateTime::parse_from_str(candidate, fmt) {
                return Some(Utc.from_utc_datetime(&ndt));
            }
        }
    }

    // Bare M-D-YYYY, seen in stripped-down vendor traces.
    if let Ok(d) = NaiveDate::parse_from_str(&cleaned, "%m-%d-%Y") {
        let ndt = d.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&ndt));
    }

    // Last resort: let mail-parser chew on it as a Date: header.
    if let Some(dt) = mail_parser_date(trimmed) {
        return Some(dt);
    }

    warn!(date = trimmed, "could not parse date");
    None
}

/// Locale-formatted display form of a timestamp.
pub fn display_date(dt: &DateTime<Utc>) -> String {
    dt.format(i18n::date_pattern()).to_string()
}

/// Attempt to parse using `mail-parser`'s own date parser.
fn mail_parser_date(input: &str) -> Option<DateTime<Utc>> {
    use mail_parser::MessageParser;

    // Wrap the value in a minimal message so mail-parser will look at it.
    let fake_msg = format!("Date: {input}\n\n");
    let parsed = MessageParser::default().parse(fake_msg.as_bytes())?;
    let rfc3339 = parsed.date()?.to_rfc3339();
    DateTime::parse_from_rfc3339(&rfc3339)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

/// Drop trailing parenthetical comments: `"… +0000 (UTC)"` → `"… +0000"`.
fn strip_zone_comment(s: &str) -> String {
    let mut result = s.trim().to_string();
    while result.ends_with(')') {
        match result.rfind('(') {
            Some(open) => result.truncate(open),
            None => break,
        }
        result.truncate(result.trim_end().len());
    }
    result
}

/// Strip a leading day-of-week prefix (e.g. "Thu, " or "Thu ").
fn strip_day_of_week(s: &str) -> String {
    let days = [
        "Mon,", "Tue,", "Wed,", "Thu,", "Fri,", "Sat,", "Sun,", "Mon ", "Tue ", "Wed ", "Thu ",
        "Fri ", "Sat ", "Sun ",
    ];
    for day in &days {
        if let Some(rest) = s.strip_prefix(day) {
            return rest.trim().to_string();
        }
    }
    s.to_string()
}

/// Replace well-known timezone abbreviations with numeric offsets.
fn replace_named_tz(s: &str) -> String {
    let tzs = [
        ("EST", "-0500"),
        ("EDT", "-0400"),
        ("CST", "-0600"),
        ("CDT", "-0500"),
        ("MST", "-0700"),
        ("MDT", "-0600"),
        ("PST", "-0800"),
        ("PDT", "-0700"),
        ("GMT", "+0000"),
        ("UTC", "+0000"),
        ("CET", "+0100"),
        ("CEST", "+0200"),
        ("JST", "+0900"),
    ];
    let mut result = s.to_string();
    for (name, offset) in &tzs {
        if result.ends_with(name) {
            let pos = result.len() - name.len();
            result.replace_range(pos.., offset);
            return result;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc2822() {
        let dt = parse_date("Sat, 21 Apr 2018 03:01:32 +0000").unwrap();
        assert_eq!(dt.timestamp_millis(), 1_524_279_692_000);
    }

    #[test]
    fn test_parse_without_weekday() {
        let dt = parse_date("21 Apr 2018 03:01:32 +0000").unwrap();
        assert_eq!(dt.timestamp_millis(), 1_524_279_692_000);
    }

    #[test]
    fn test_parse_with_zone_comment() {
        let dt = parse_date("Sat, 21 Apr 2018 03:01:32 +0000 (UTC)").unwrap();
        assert_eq!(dt.timestamp_millis(), 1_524_279_692_000);
    }

    #[test]
    fn test_parse_fractional_seconds() {
        let dt = parse_date("Sat, 21 Apr 2018 03:01:32.123 +0000").unwrap();
        assert_eq!(dt.timestamp_millis(), 1_524_279_692_123);
    }

    #[test]
    fn test_parse_iso_space_separator() {
        let dt = parse_date("2018-4-21 3:01:32").unwrap();
        assert_eq!(dt.timestamp_millis(), 1_524_279_692_000);
    }

    #[test]
    fn test_parse_iso_with_millis() {
        let dt = parse_date("2018-04-21 03:01:32.500").unwrap();
        assert_eq!(dt.timestamp_millis(), 1_524_279_692_500);
    }

    #[test]
    fn test_parse_us_am_pm() {
        let dt = parse_date("4/21/2018 3:01:32 AM").unwrap();
        assert_eq!(dt.timestamp_millis(), 1_524_279_692_000);
    }

    #[test]
    fn test_parse_bare_month_day_year() {
        let dt = parse_date("4-21-2018").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2018-04-21 00:00:00");
    }

    #[test]
    fn test_missing_offset_is_utc() {
        let naive = parse_date("21 Apr 2018 03:01:32").unwrap();
        let explicit = parse_date("21 Apr 2018 03:01:32 +0000").unwrap();
        assert_eq!(naive, explicit);
    }

    #[test]
    fn test_parse_named_tz() {
        let est = parse_date("Thu, 04 Jan 2024 10:00:00 EST").unwrap();
        let utc = parse_date("Thu, 04 Jan 2024 15:00:00 +0000").unwrap();
        assert_eq!(est, utc);
    }

    #[test]
    fn test_unparseable_is_none_not_epoch() {
        assert!(parse_date("").is_none());
        assert!(parse_date("not a date").is_none());
        assert!(parse_date("by mail.example.com").is_none());
    }
}
