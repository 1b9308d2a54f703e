use crate::schedule::calendar::{month_label, weekday_label};
use crate::schedule::error::ScheduleError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Shift classification of a single day.
///
/// Only `Day` and `Off` are ever generated. `Night` and `Other` are kept so that
/// schedules persisted by older versions still load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftCode {
    #[serde(rename = "D")]
    Day,
    #[serde(rename = "N")]
    Night,
    #[serde(rename = "O")]
    Other,
    #[serde(rename = "W")]
    Off,
}

impl ShiftCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftCode::Day => "D",
            ShiftCode::Night => "N",
            ShiftCode::Other => "O",
            ShiftCode::Off => "W",
        }
    }

    pub fn is_work_day(&self) -> bool {
        !matches!(self, ShiftCode::Off)
    }

    pub fn description(&self) -> &'static str {
        if self.is_work_day() {
            "Praca"
        } else {
            "Dzień wolny"
        }
    }
}

/// One calendar day of a user's schedule.
///
/// Whether the day is a work day is derived from `shift_code`, so the two can
/// never disagree in memory. The persisted form still carries `isWorking` and is
/// checked against the code on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "StoredDayRecord", try_from = "StoredDayRecord")]
pub struct DayRecord {
    pub id: String,
    pub day_number: u32,
    pub month_label: String,
    pub weekday_label: String,
    pub iso_date: NaiveDate,
    pub shift_code: ShiftCode,
    pub is_today: bool,
    pub hours_worked: f64,
    pub note: String,
}

impl DayRecord {
    /// Builds a fresh record for `date` with no hours and an empty note.
    pub fn new(date: NaiveDate, shift_code: ShiftCode, is_today: bool) -> Self {
        let day_number = date.day();
        Self {
            id: format!("day-{}", day_number),
            day_number,
            month_label: month_label(date.month()).to_string(),
            weekday_label: weekday_label(date).to_string(),
            iso_date: date,
            shift_code,
            is_today,
            hours_worked: 0.0,
            note: String::new(),
        }
    }

    pub fn is_work_day(&self) -> bool {
        self.shift_code.is_work_day()
    }

    pub fn has_note(&self) -> bool {
        !self.note.trim().is_empty()
    }
}

/// Checks list-level invariants of a loaded schedule: days numbered 1..N in
/// order with unique ids, all within one month. An empty list is valid.
pub fn validate_schedule(records: &[DayRecord]) -> Result<(), ScheduleError> {
    let Some(first) = records.first() else {
        return Ok(());
    };
    let month = (first.iso_date.year(), first.iso_date.month());

    let mut seen_days = HashSet::new();
    let mut seen_ids = HashSet::new();
    for (index, record) in records.iter().enumerate() {
        if !seen_days.insert(record.day_number) {
            return Err(ScheduleError::DuplicateDay(record.day_number));
        }
        if !seen_ids.insert(record.id.as_str()) {
            return Err(ScheduleError::DuplicateId(record.id.clone()));
        }
        if (record.iso_date.year(), record.iso_date.month()) != month {
            return Err(ScheduleError::MixedMonth {
                day: record.day_number,
                date: record.iso_date,
            });
        }
        let expected = index as u32 + 1;
        if record.day_number != expected {
            return Err(ScheduleError::MissingDay(expected));
        }
    }
    Ok(())
}

/// Wire shape of a day, shared with schedules written by the web client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredDayRecord {
    id: String,
    day: u32,
    month_str: String,
    full_date: String,
    day_of_week: String,
    code: ShiftCode,
    #[serde(default)]
    description: String,
    is_working: bool,
    #[serde(default)]
    is_today: bool,
    hours_worked: f64,
    #[serde(default)]
    note: Option<String>,
}

impl From<DayRecord> for StoredDayRecord {
    fn from(record: DayRecord) -> Self {
        StoredDayRecord {
            id: record.id,
            day: record.day_number,
            month_str: record.month_label,
            full_date: record.iso_date.format("%Y-%m-%d").to_string(),
            day_of_week: record.weekday_label,
            code: record.shift_code,
            description: record.shift_code.description().to_string(),
            is_working: record.shift_code.is_work_day(),
            is_today: record.is_today,
            hours_worked: record.hours_worked,
            note: Some(record.note),
        }
    }
}

impl TryFrom<StoredDayRecord> for DayRecord {
    type Error = ScheduleError;

    fn try_from(stored: StoredDayRecord) -> Result<Self, Self::Error> {
        let iso_date = NaiveDate::parse_from_str(&stored.full_date, "%Y-%m-%d")
            .map_err(|_| ScheduleError::InvalidDate(stored.full_date.clone()))?;

        if iso_date.day() != stored.day {
            return Err(ScheduleError::DayMismatch {
                day: stored.day,
                date: iso_date,
            });
        }

        if !stored.hours_worked.is_finite() || stored.hours_worked < 0.0 {
            return Err(ScheduleError::InvalidHours(stored.hours_worked));
        }

        if stored.is_working != stored.code.is_work_day() {
            return Err(ScheduleError::ShiftMismatch {
                day: stored.day,
                code: stored.code.as_str(),
            });
        }

        Ok(DayRecord {
            id: stored.id,
            day_number: stored.day,
            month_label: stored.month_str,
            weekday_label: stored.day_of_week,
            iso_date,
            shift_code: stored.code,
            is_today: stored.is_today,
            hours_worked: stored.hours_worked,
            note: stored.note.unwrap_or_default(),
        })
    }
}
