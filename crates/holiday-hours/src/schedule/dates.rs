use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

const DATE_FORMAT: &str = "%Y-%m-%d";
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses the calendar day a holiday falls on.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 date-times (the day as written in their own offset)
/// and naive `YYYY-MM-DDTHH:MM[:SS]` date-times.
pub fn parse_holiday_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(moment) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(moment.date_naive());
    }
    parse_naive_datetime(trimmed).map(|moment| moment.date())
}

/// Point in time used to order holidays, normalised to UTC.
///
/// Date-only values sit at midnight UTC. Returns `None` for input no supported format
/// recognises.
///
/// Ordering and display use different clocks for offset date-times: this key is the
/// UTC instant, while [`parse_holiday_date`] (behind formatting and the upcoming
/// filter) keeps the day as written in the value's own offset. So
/// `"2024-11-28T01:00:00+03:00"` sorts before `"2024-11-28"` (it is 22:00 UTC on the
/// 27th) yet is shown and counted as upcoming on November 28.
pub fn date_sort_key(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(moment) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(moment.naive_utc());
    }
    parse_naive_datetime(trimmed)
}

fn parse_naive_datetime(raw: &str) -> Option<NaiveDateTime> {
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

/// True when the holiday falls on or after the reference day. Time of day is ignored
/// on both sides, so a holiday dated today is still upcoming.
pub fn is_upcoming(date: &str, reference: NaiveDateTime) -> bool {
    is_upcoming_on(date, reference.date())
}

/// Day-granularity form of [`is_upcoming`]. Unparsable dates are never upcoming.
pub fn is_upcoming_on(date: &str, today: NaiveDate) -> bool {
    parse_holiday_date(date).is_some_and(|day| day >= today)
}

/// [`is_upcoming`] against the local clock.
pub fn is_upcoming_now(date: &str) -> bool {
    is_upcoming(date, Local::now().naive_local())
}
