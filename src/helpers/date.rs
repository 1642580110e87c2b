//! Date formatting helpers

use chrono::{Datelike, NaiveDate};

/// Format a date using a Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_moment(&date, "MMMM Do YYYY") // -> "June 3rd 2024"
/// ```
pub fn format_moment(date: &NaiveDate, format: &str) -> String {
    // `Do` has no chrono equivalent; substitute the rendered ordinal day
    // before the token translation pass
    let format = format.replace("Do", &ordinal_day(date));
    let chrono_format = moment_to_chrono_format(&format);
    date.format(&chrono_format).to_string()
}

/// Render the day of month with its ordinal suffix ("1st", "22nd", "13th")
pub fn ordinal_day(date: &NaiveDate) -> String {
    let day = date.day();
    format!("{}{}", day, ordinal_suffix(day))
}

fn ordinal_suffix(day: u32) -> &'static str {
    match day % 100 {
        11 | 12 | 13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

/// Convert Moment.js date tokens to chrono format specifiers
fn moment_to_chrono_format(format: &str) -> String {
    // Longest patterns first within each category
    let replacements = [
        // Year
        ("YYYY", "%Y"),
        ("YY", "%y"),
        // Month
        ("MMMM", "%B"), // Full month name
        ("MMM", "%b"),  // Abbreviated month name
        ("MM", "%m"),   // Two-digit month
        // Day of month
        ("DD", "%d"),  // Two-digit day
        ("D", "%-d"),  // Day without padding
        // Day of week
        ("dddd", "%A"), // Full weekday name
        ("ddd", "%a"),  // Abbreviated weekday name
    ];

    let mut result = format.to_string();
    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}
