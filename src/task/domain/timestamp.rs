//! Platform timestamp formatting.
//!
//! The platform sends timestamps as fixed-width digit strings such as
//! `20240115093000`. Anything shorter than a date, or anything that is not a
//! valid calendar value, formats as an empty string.

use chrono::{NaiveDate, NaiveDateTime};

const DATE_TIME_WIDTH: usize = 14;
const DATE_WIDTH: usize = 8;

/// Formats a platform timestamp.
///
/// Inputs of 14 or more characters render as `YYYY-MM-DD HH:MM:SS`, inputs
/// of 8 to 13 characters as `YYYY-MM-DD`. Trailing characters past the
/// recognised width are ignored.
#[must_use]
pub fn format_timestamp(raw: &str) -> String {
    let digits = raw.trim();
    if digits.len() >= DATE_TIME_WIDTH {
        return digits
            .get(..DATE_TIME_WIDTH)
            .and_then(|prefix| NaiveDateTime::parse_from_str(prefix, "%Y%m%d%H%M%S").ok())
            .map(|value| value.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();
    }
    if digits.len() >= DATE_WIDTH {
        return digits
            .get(..DATE_WIDTH)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y%m%d").ok())
            .map(|value| value.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::format_timestamp;
    use rstest::rstest;

    #[rstest]
    #[case("20240115093000", "2024-01-15 09:30:00")]
    #[case("20240115093000123", "2024-01-15 09:30:00")]
    #[case("20240115", "2024-01-15")]
    #[case("2024011509", "2024-01-15")]
    #[case("", "")]
    #[case("202", "")]
    #[case("2024-01-", "")]
    #[case("20241345", "")]
    #[case("20240115256100", "")]
    fn formats_platform_timestamps(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(format_timestamp(raw), expected);
    }
}
