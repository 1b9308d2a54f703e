use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

pub fn get_current_date(offset: FixedOffset) -> NaiveDate {
    get_current_datetime(offset).date_naive()
}

pub fn get_current_datetime(offset: FixedOffset) -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&offset)
}

/// "12.5 h", "13 h", "0 h".
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{:.0} h", hours)
    } else {
        format!("{:.1} h", hours)
    }
}

/// "3 Października 2026 (Sobota)".
pub fn format_day_title(day: u32, month_label: &str, year: i32, weekday_label: &str) -> String {
    format!("{} {} {} ({})", day, month_label, year, weekday_label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(0.0), "0 h");
        assert_eq!(format_hours(13.0), "13 h");
        assert_eq!(format_hours(12.5), "12.5 h");
        assert_eq!(format_hours(98.5), "98.5 h");
    }

    #[test]
    fn test_format_day_title() {
        assert_eq!(
            format_day_title(3, "Października", 2026, "Sobota"),
            "3 Października 2026 (Sobota)"
        );
    }

    #[test]
    fn test_current_date_uses_offset() {
        let east = FixedOffset::east_opt(14 * 3600).unwrap();
        let west = FixedOffset::west_opt(12 * 3600).unwrap();
        let diff = get_current_date(east).signed_duration_since(get_current_date(west)).num_days();
        assert!((1..=2).contains(&diff));
    }
}
