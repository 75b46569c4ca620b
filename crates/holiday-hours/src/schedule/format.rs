use super::dates::parse_holiday_date;

/// Rendering used when a date cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

const LONG_DATE_FORMAT: &str = "%A, %B %-d, %Y";

/// Renders a 24-hour `HH:MM` time on a 12-hour clock, e.g. `"13:30"` → `"1:30 PM"`.
///
/// Midnight and noon both show as `12`. Minutes are copied as given. Empty input
/// yields an empty string; an hour that does not parse counts as midnight and a
/// missing minute field renders as `00`. A signed hour keeps its sign, so `"-1:00"`
/// renders as `"-1:00 AM"`.
pub fn format_time(time: &str) -> String {
    if time.is_empty() {
        return String::new();
    }

    let mut parts = time.split(':');
    let hour = parts.next().map(parse_leading_hour).unwrap_or(0);
    let minutes = parts.next().unwrap_or("00");

    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        other => other,
    };

    format!("{display_hour}:{minutes} {meridiem}")
}

fn parse_leading_hour(raw: &str) -> i64 {
    let raw = raw.trim_start();
    let (negative, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let digits: String = unsigned.chars().take_while(char::is_ascii_digit).collect();
    let hour = digits.parse::<i64>().unwrap_or(0);
    if negative {
        -hour
    } else {
        hour
    }
}

/// Long US-English rendering of a holiday date, e.g. `"Thursday, November 28, 2024"`.
///
/// The calendar day is rendered as written; no timezone conversion is applied.
/// Malformed input yields [`INVALID_DATE`].
pub fn format_date(date: &str) -> String {
    match parse_holiday_date(date) {
        Some(day) => day.format(LONG_DATE_FORMAT).to_string(),
        None => INVALID_DATE.to_string(),
    }
}
