//! Timestamp parsing and display formatting.

use std::fmt::Display;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Display format for every timestamp on the page.
pub const DISPLAY_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Shown in place of a timestamp that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a raw timestamp into the given zone.
///
/// RFC 3339 values carry their own offset. Date-times without an offset are taken as wall
/// clock time in `tz`, bare dates as midnight UTC, and bare integers as milliseconds since
/// the Unix epoch.
pub fn parse_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();

    if is_integer(raw) {
        let millis = raw.parse::<i64>().ok()?;
        return Utc
            .timestamp_millis_opt(millis)
            .single()
            .map(|dt| dt.with_timezone(tz));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return tz.from_local_datetime(&naive).earliest();
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive).with_timezone(tz))
}

fn is_integer(raw: &str) -> bool {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

pub fn format_instant<Tz: TimeZone>(instant: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    instant.format(DISPLAY_FORMAT).to_string()
}

/// Parse and format a raw timestamp, or [`INVALID_DATE`] when it cannot be parsed.
pub fn format_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    parse_timestamp(raw, tz)
        .map(|dt| format_instant(&dt))
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn formats_rfc3339_in_target_zone() {
        assert_eq!(format_timestamp("2024-05-01T08:30:00Z", &Utc), "2024/05/01 08:30:00");

        let taipei = FixedOffset::east_opt(8 * 3600).unwrap();
        assert_eq!(format_timestamp("2024-05-01T20:30:00Z", &taipei), "2024/05/02 04:30:00");
    }

    #[test]
    fn naive_datetime_is_local_wall_clock() {
        let taipei = FixedOffset::east_opt(8 * 3600).unwrap();
        assert_eq!(format_timestamp("2024-05-01T09:15:00", &taipei), "2024/05/01 09:15:00");
        assert_eq!(format_timestamp("2024-05-01 09:15:00", &Utc), "2024/05/01 09:15:00");
    }

    #[test]
    fn bare_date_is_midnight_utc() {
        let taipei = FixedOffset::east_opt(8 * 3600).unwrap();
        assert_eq!(format_timestamp("2024-05-01", &taipei), "2024/05/01 08:00:00");
    }

    #[test]
    fn integers_are_epoch_milliseconds() {
        assert_eq!(format_timestamp("1714552200000", &Utc), "2024/05/01 08:30:00");
        assert_eq!(format_timestamp("0", &Utc), "1970/01/01 00:00:00");
        assert_eq!(format_timestamp("-1000", &Utc), "1969/12/31 23:59:59");
        assert_eq!(format_timestamp("99999999999999999999", &Utc), INVALID_DATE);
    }

    #[test]
    fn garbage_is_invalid_date() {
        assert_eq!(format_timestamp("yesterday", &Utc), INVALID_DATE);
        assert_eq!(format_timestamp("", &Utc), INVALID_DATE);
    }
}
