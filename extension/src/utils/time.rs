use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// Returns the current time in the configured timezone.
pub fn now_in_timezone(tz: &Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(tz)
}

/// Calendar date of an instant as seen in `tz`.
pub fn local_date<Z: TimeZone>(instant: &DateTime<Z>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// Weekday number with Sunday as 0 through Saturday as 6.
pub fn weekday_number(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

pub fn weekday_name(number: u8) -> Option<&'static str> {
    const NAMES: [&str; 7] = [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ];
    NAMES.get(number as usize).copied()
}

/// German weekday name, same numbering as [`weekday_number`].
pub fn weekday_name_de(number: u8) -> Option<&'static str> {
    const NAMES: [&str; 7] = [
        "Sonntag",
        "Montag",
        "Dienstag",
        "Mittwoch",
        "Donnerstag",
        "Freitag",
        "Samstag",
    ];
    NAMES.get(number as usize).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::Berlin;

    #[test]
    fn now_in_timezone_returns_datetime_in_tz() {
        let result = now_in_timezone(&Berlin);
        assert_eq!(result.timezone(), Berlin);
    }

    #[test]
    fn local_date_shifts_across_midnight() {
        // 2024-03-25 23:30 UTC is already 2024-03-26 in Berlin (CET, +01:00).
        let instant = Utc.with_ymd_and_hms(2024, 3, 25, 23, 30, 0).unwrap();
        assert_eq!(
            local_date(&instant, &Berlin),
            NaiveDate::from_ymd_opt(2024, 3, 26).unwrap()
        );
        assert_eq!(
            local_date(&instant, &chrono_tz::UTC),
            NaiveDate::from_ymd_opt(2024, 3, 25).unwrap()
        );
    }

    #[test]
    fn sunday_is_index_zero() {
        // 2025-12-28 is a Sunday.
        let sunday = NaiveDate::from_ymd_opt(2025, 12, 28).unwrap();
        assert_eq!(weekday_number(sunday), 0);
        assert_eq!(weekday_number(sunday.succ_opt().unwrap()), 1);
        assert_eq!(weekday_number(NaiveDate::from_ymd_opt(2026, 1, 3).unwrap()), 6);
    }

    #[test]
    fn weekday_name_covers_valid_numbers_only() {
        assert_eq!(weekday_name(0), Some("Sunday"));
        assert_eq!(weekday_name(2), Some("Tuesday"));
        assert_eq!(weekday_name(6), Some("Saturday"));
        assert_eq!(weekday_name(7), None);
    }

    #[test]
    fn weekday_name_de_uses_same_numbering() {
        assert_eq!(weekday_name_de(0), Some("Sonntag"));
        assert_eq!(weekday_name_de(2), Some("Dienstag"));
        assert_eq!(weekday_name_de(5), Some("Freitag"));
        assert_eq!(weekday_name_de(7), None);
    }
}
