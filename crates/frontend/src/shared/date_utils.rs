/// Utilities for date and time formatting
///
/// Provides consistent date/time formatting across the application
use chrono::{DateTime, Utc};

/// Format timestamp to DD.MM.YYYY HH:MM:SS, `-` when absent
/// Example: 2024-03-15T14:02:26Z -> "15.03.2024 14:02:26"
pub fn format_datetime(dt: Option<&DateTime<Utc>>) -> String {
    dt.map(|d| d.format("%d.%m.%Y %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Current time from the browser clock
pub fn now_utc() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        let dt: DateTime<Utc> = "2024-03-15T14:02:26.123Z".parse().unwrap();
        assert_eq!(format_datetime(Some(&dt)), "15.03.2024 14:02:26");
        assert_eq!(format_datetime(None), "-");
    }
}
