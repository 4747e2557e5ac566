//! Number and date formatting for tables and tooltips.

use chrono::DateTime;

/// Rounded integer with space separated thousands, `1234567` → `"1 234 567"`.
pub fn format_int(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut groups = Vec::new();
    let mut end = digits.len();
    while end > 3 {
        groups.push(&digits[end - 3..end]);
        end -= 3;
    }
    groups.push(&digits[..end]);
    groups.reverse();

    let joined = groups.join(" ");
    if rounded < 0 {
        format!("-{joined}")
    } else {
        joined
    }
}

/// Share of `total` as `"(12.34%)"`; an empty total shows as zero.
pub fn format_percent(count: f64, total: f64) -> String {
    format!("({:.2}%)", share(count, total))
}

/// Percentage of `total`, 0 when the total is 0.
pub fn share(count: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        count * 100.0 / total
    }
}

/// UTC calendar date of a POSIX timestamp.
pub fn format_date(data_time: i64) -> String {
    DateTime::from_timestamp(data_time, 0)
        .map(|time| time.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| data_time.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_int() {
        assert_eq!(format_int(0.0), "0");
        assert_eq!(format_int(999.0), "999");
        assert_eq!(format_int(1000.0), "1 000");
        assert_eq!(format_int(1_234_567.0), "1 234 567");
        assert_eq!(format_int(123_456.4), "123 456");
        assert_eq!(format_int(-12_345.0), "-12 345");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(1.0, 3.0), "(33.33%)");
        assert_eq!(format_percent(10.0, 10.0), "(100.00%)");
        assert_eq!(format_percent(5.0, 0.0), "(0.00%)");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(1_468_281_600), "2016-07-12");
    }
}
