use crate::schedule::models::DayRecord;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Hours per ISO week above which the rest counts as overtime.
pub const WEEKLY_OVERTIME_THRESHOLD: f64 = 45.0;

/// Lower bound for the per-day chart scale.
const MIN_CHART_HOURS: f64 = 12.0;

/// Statistics derived from a schedule. Always recomputed from the full list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScheduleStats {
    pub total_hours: f64,
    /// ISO week number -> hours. Weeks without logged hours have no entry.
    pub weekly_hours: BTreeMap<u32, f64>,
    pub current_week_hours: f64,
    pub overtime_hours: f64,
    pub work_day_count: usize,
    pub off_day_count: usize,
}

/// Rounds half-up to one decimal place. Used for every displayed hour sum.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// ISO-8601 week number: the week containing the date's Thursday, counted
/// from the week containing January 4th of that Thursday's year.
pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

pub fn aggregate(records: &[DayRecord], today: NaiveDate) -> ScheduleStats {
    let mut weekly_hours: BTreeMap<u32, f64> = BTreeMap::new();
    let mut total = 0.0;
    let mut work_day_count = 0;

    for record in records {
        total += record.hours_worked;

        if record.is_work_day() {
            work_day_count += 1;
        }

        if record.hours_worked > 0.0 {
            *weekly_hours.entry(iso_week_number(record.iso_date)).or_insert(0.0) += record.hours_worked;
        }
    }

    let overtime: f64 = weekly_hours
        .values()
        .map(|week| (week - WEEKLY_OVERTIME_THRESHOLD).max(0.0))
        .sum();

    let current_week_hours = weekly_hours
        .get(&iso_week_number(today))
        .copied()
        .unwrap_or(0.0);

    ScheduleStats {
        total_hours: round_to_tenth(total),
        weekly_hours,
        current_week_hours,
        overtime_hours: round_to_tenth(overtime),
        work_day_count,
        off_day_count: records.len() - work_day_count,
    }
}

/// Largest logged day, but never below 12 h, for scaling per-day bars.
pub fn max_hours(records: &[DayRecord]) -> f64 {
    records
        .iter()
        .map(|r| r.hours_worked)
        .fold(MIN_CHART_HOURS, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::generator::{GeneratorConfig, generate};
    use crate::schedule::models::ShiftCode;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(d: NaiveDate, hours: f64) -> DayRecord {
        let mut r = DayRecord::new(d, ShiftCode::Day, false);
        r.hours_worked = hours;
        r
    }

    #[test]
    fn test_empty_input() {
        let stats = aggregate(&[], date(2026, 10, 18));
        assert_eq!(stats, ScheduleStats::default());
        assert_eq!(stats.total_hours, 0.0);
        assert!(stats.weekly_hours.is_empty());
        assert_eq!(stats.current_week_hours, 0.0);
        assert_eq!(stats.overtime_hours, 0.0);
        assert_eq!(stats.work_day_count, 0);
        assert_eq!(stats.off_day_count, 0);
    }

    #[test]
    fn test_iso_week_year_boundaries() {
        // 2024-12-31 is a Tuesday in week 1 of 2025
        assert_eq!(iso_week_number(date(2024, 12, 31)), 1);
        assert_eq!(iso_week_number(date(2025, 1, 1)), 1);
        assert_eq!(iso_week_number(date(2024, 12, 29)), 52);
        // 2021-01-01 is a Friday in week 53 of 2020
        assert_eq!(iso_week_number(date(2021, 1, 1)), 53);
        assert_eq!(iso_week_number(date(2021, 1, 4)), 1);
        // 2026 starts on a Thursday and has 53 weeks
        assert_eq!(iso_week_number(date(2026, 12, 31)), 53);
        assert_eq!(iso_week_number(date(2027, 1, 3)), 53);
        assert_eq!(iso_week_number(date(2027, 1, 4)), 1);
    }

    #[test]
    fn test_year_boundary_buckets() {
        let records = vec![record(date(2024, 12, 30), 8.0), record(date(2024, 12, 31), 8.0)];
        let stats = aggregate(&records, date(2025, 1, 2));
        assert_eq!(stats.weekly_hours.get(&1), Some(&16.0));
        assert_eq!(stats.weekly_hours.get(&53), None);
        assert_eq!(stats.current_week_hours, 16.0);
    }

    #[test]
    fn test_totals_and_weeks() {
        // 2026-10-05 is a Monday, ISO week 41
        let records = vec![
            record(date(2026, 10, 2), 12.5),
            record(date(2026, 10, 3), 13.0),
            record(date(2026, 10, 5), 10.5),
            record(date(2026, 10, 6), 0.0),
        ];
        let stats = aggregate(&records, date(2026, 10, 6));
        assert_eq!(stats.total_hours, 36.0);
        assert_eq!(stats.weekly_hours.len(), 2);
        assert_eq!(stats.weekly_hours[&40], 25.5);
        assert_eq!(stats.weekly_hours[&41], 10.5);
        assert_eq!(stats.current_week_hours, 10.5);
        assert_eq!(stats.overtime_hours, 0.0);
    }

    #[test]
    fn test_zero_hour_days_create_no_bucket() {
        let records = vec![record(date(2026, 10, 12), 0.0), record(date(2026, 10, 13), 0.0)];
        let stats = aggregate(&records, date(2026, 10, 12));
        assert!(stats.weekly_hours.is_empty());
        assert_eq!(stats.work_day_count, 2);
    }

    #[test]
    fn test_overtime_threshold() {
        // Mon 2026-10-05 .. Fri 2026-10-09, 10 h each = 50 h
        let fifty: Vec<DayRecord> = (5..=9).map(|d| record(date(2026, 10, d), 10.0)).collect();
        assert_eq!(aggregate(&fifty, date(2026, 10, 5)).overtime_hours, 5.0);

        // 9 h each = 45 h, exactly at the threshold
        let forty_five: Vec<DayRecord> = (5..=9).map(|d| record(date(2026, 10, d), 9.0)).collect();
        assert_eq!(aggregate(&forty_five, date(2026, 10, 5)).overtime_hours, 0.0);
    }

    #[test]
    fn test_overtime_sums_across_weeks() {
        let mut records: Vec<DayRecord> = (5..=9).map(|d| record(date(2026, 10, d), 10.0)).collect();
        records.extend((12..=16).map(|d| record(date(2026, 10, d), 9.5)));
        records.push(record(date(2026, 10, 17), 1.0));
        let stats = aggregate(&records, date(2026, 10, 1));
        // 50 - 45 = 5, 48.5 - 45 = 3.5
        assert_eq!(stats.overtime_hours, 8.5);
        assert_eq!(stats.current_week_hours, 0.0);
    }

    #[test]
    fn test_work_and_off_counts() {
        let records = generate(2026, 9, date(2026, 9, 1), &GeneratorConfig::default());
        let stats = aggregate(&records, date(2026, 9, 1));
        assert_eq!(stats.work_day_count, 26);
        assert_eq!(stats.off_day_count, 4);
    }

    #[test]
    fn test_idempotent() {
        let config = GeneratorConfig::default().with_demo_seed();
        let records = generate(2026, 10, date(2026, 10, 18), &config);
        let first = aggregate(&records, date(2026, 10, 18));
        let second = aggregate(&records, date(2026, 10, 18));
        assert_eq!(first, second);
        assert_eq!(first.total_hours.to_bits(), second.total_hours.to_bits());
        assert_eq!(first.total_hours, 48.5);
    }

    #[test]
    fn test_increase_moves_total_and_one_bucket() {
        let config = GeneratorConfig::default().with_demo_seed();
        let mut records = generate(2026, 10, date(2026, 10, 18), &config);
        let before = aggregate(&records, date(2026, 10, 18));

        records[13].hours_worked += 1.5;
        let after = aggregate(&records, date(2026, 10, 18));

        assert_eq!(after.total_hours, round_to_tenth(before.total_hours + 1.5));

        let week = iso_week_number(records[13].iso_date);
        let mut changed = 0;
        for (key, hours) in &after.weekly_hours {
            let old = before.weekly_hours.get(key).copied().unwrap_or(0.0);
            if *hours != old {
                changed += 1;
                assert_eq!(*key, week);
                assert_eq!(*hours, old + 1.5);
            }
        }
        assert_eq!(changed, 1);
    }

    #[test]
    fn test_rounding_half_up() {
        assert_eq!(round_to_tenth(0.25), 0.3);
        assert_eq!(round_to_tenth(12.04), 12.0);
        assert_eq!(round_to_tenth(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_max_hours() {
        assert_eq!(max_hours(&[]), 12.0);
        assert_eq!(max_hours(&[record(date(2026, 10, 1), 13.5)]), 13.5);
        assert_eq!(max_hours(&[record(date(2026, 10, 1), 4.0)]), 12.0);
    }
}
