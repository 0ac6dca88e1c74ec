/// Utilities for date handling in tables and filters
///
/// Order timestamps arrive in UTC; everything the user sees or filters by is
/// the calendar day in the viewer's time zone.
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

/// Calendar day of `timestamp` in time zone `tz`
pub fn calendar_day<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    timestamp.with_timezone(tz).date_naive()
}

/// Parse the `date` filter value.
///
/// `2024-03-01` is taken as that calendar day; an RFC 3339 timestamp is
/// converted to its day in `tz`. Anything else is no date at all.
pub fn parse_filter_date<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(day) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(day);
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| calendar_day(&dt.with_timezone(&Utc), tz))
}

/// Format a timestamp as DD.MM.YYYY HH:MM in time zone `tz`
/// Example: 2024-03-15T14:02:26Z (UTC) -> "15.03.2024 14:02"
pub fn format_datetime<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.with_timezone(tz).format("%d.%m.%Y %H:%M").to_string()
}

pub fn format_local_datetime(timestamp: &DateTime<Utc>) -> String {
    format_datetime(timestamp, &Local)
}

/// Format a date field (`YYYY-MM-DD` or RFC 3339) as DD.MM.YYYY in `tz`.
/// Values that are neither are shown as they came.
pub fn format_day<Tz: TimeZone>(value: &str, tz: &Tz) -> String {
    match parse_filter_date(value, tz) {
        Some(day) => day.format("%d.%m.%Y").to_string(),
        None => value.to_string(),
    }
}

pub fn format_local_day(value: &str) -> String {
    format_day(value, &Local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_calendar_day_uses_viewer_zone() {
        let ts = utc("2024-03-01T23:30:00Z");
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(calendar_day(&ts, &Utc), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(calendar_day(&ts, &plus_two), NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
    }

    #[test]
    fn test_parse_filter_date() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(
            parse_filter_date("2024-03-01", &tz),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(
            parse_filter_date("2024-03-01T02:00:00Z", &tz),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(parse_filter_date("", &tz), None);
        assert_eq!(parse_filter_date("yesterday", &tz), None);
    }

    #[test]
    fn test_format_datetime() {
        let ts = utc("2024-03-15T14:02:26.123Z");
        assert_eq!(format_datetime(&ts, &Utc), "15.03.2024 14:02");
    }

    #[test]
    fn test_format_day() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(format_day("2024-03-04", &Utc), "04.03.2024");
        assert_eq!(format_day("2024-03-04T23:00:00Z", &plus_two), "05.03.2024");
        assert_eq!(format_day("soon", &Utc), "soon");
        assert_eq!(format_day("", &Utc), "");
    }
}
