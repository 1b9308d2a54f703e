use crate::schedule::calendar::days_in_month;
use crate::schedule::models::{DayRecord, ShiftCode};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

/// Days off used when no explicit configuration is given.
pub const DEFAULT_DAYS_OFF: [u32; 4] = [1, 8, 12, 19];

/// Fixed hours/note override for one day of a freshly generated schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedEntry {
    pub day: u32,
    pub hours: f64,
    pub note: &'static str,
}

/// Demo values applied to new schedules when seeding is enabled.
pub const DEMO_SEED: [SeedEntry; 4] = [
    SeedEntry { day: 2, hours: 12.5, note: "" },
    SeedEntry { day: 3, hours: 13.0, note: "12h 46min" },
    SeedEntry { day: 4, hours: 12.5, note: "12h 38min" },
    SeedEntry { day: 5, hours: 10.5, note: "" },
];

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Day numbers that become off days in every generated month.
    pub days_off: BTreeSet<u32>,
    pub seed: Vec<SeedEntry>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            days_off: DEFAULT_DAYS_OFF.into_iter().collect(),
            seed: Vec::new(),
        }
    }
}

impl GeneratorConfig {
    pub fn with_days_off(mut self, days_off: BTreeSet<u32>) -> Self {
        self.days_off = days_off;
        self
    }

    pub fn with_demo_seed(mut self) -> Self {
        self.seed = DEMO_SEED.to_vec();
        self
    }

    fn shift_for(&self, day: u32) -> ShiftCode {
        if self.days_off.contains(&day) {
            ShiftCode::Off
        } else {
            ShiftCode::Day
        }
    }
}

/// Builds the day list for `year`/`month`, one record per calendar day in order.
///
/// `today` only decides which record (if any) is flagged as today. An invalid
/// month yields an empty list.
pub fn generate(year: i32, month: u32, today: NaiveDate, config: &GeneratorConfig) -> Vec<DayRecord> {
    let Some(days) = days_in_month(year, month) else {
        return Vec::new();
    };

    (1..=days)
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .map(|date| {
            let mut record = DayRecord::new(date, config.shift_for(date.day()), date == today);

            if let Some(seed) = config.seed.iter().find(|s| s.day == record.day_number) {
                record.hours_worked = seed.hours;
                record.note = seed.note.to_string();
            }

            record
        })
        .collect()
}
