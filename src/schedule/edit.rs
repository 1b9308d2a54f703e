use crate::schedule::error::ScheduleError;
use crate::schedule::models::DayRecord;

/// Hours change in steps of half an hour.
pub const HOURS_STEP: f64 = 0.5;
pub const MAX_HOURS_PER_DAY: f64 = 24.0;
pub const MAX_NOTE_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoursChange {
    Increment,
    Decrement,
}

impl HoursChange {
    pub fn as_str(&self) -> &'static str {
        match self {
            HoursChange::Increment => "inc",
            HoursChange::Decrement => "dec",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "inc" => Some(HoursChange::Increment),
            "dec" => Some(HoursChange::Decrement),
            _ => None,
        }
    }
}

pub fn validate_hours(hours: f64) -> Result<f64, ScheduleError> {
    if !hours.is_finite() || hours < 0.0 {
        return Err(ScheduleError::InvalidHours(hours));
    }
    if hours > MAX_HOURS_PER_DAY {
        return Err(ScheduleError::HoursTooLarge(hours));
    }
    if (hours / HOURS_STEP).fract() != 0.0 {
        return Err(ScheduleError::HoursNotInStep(hours));
    }
    Ok(hours)
}

pub fn find_day_mut(records: &mut [DayRecord], day: u32) -> Result<&mut DayRecord, ScheduleError> {
    records
        .iter_mut()
        .find(|r| r.day_number == day)
        .ok_or(ScheduleError::DayNotFound(day))
}

/// Moves the day's hours one step up or down and returns the new value.
///
/// Decrementing never goes below zero; decrementing an empty day is a no-op.
pub fn adjust_hours(records: &mut [DayRecord], day: u32, change: HoursChange) -> Result<f64, ScheduleError> {
    let record = find_day_mut(records, day)?;

    let next = match change {
        HoursChange::Increment => record.hours_worked + HOURS_STEP,
        HoursChange::Decrement => (record.hours_worked - HOURS_STEP).max(0.0),
    };

    if next > MAX_HOURS_PER_DAY {
        return Err(ScheduleError::HoursTooLarge(next));
    }

    record.hours_worked = next;
    Ok(next)
}

pub fn set_hours(records: &mut [DayRecord], day: u32, hours: f64) -> Result<(), ScheduleError> {
    let hours = validate_hours(hours)?;
    find_day_mut(records, day)?.hours_worked = hours;
    Ok(())
}

/// Replaces the day's note. Surrounding whitespace is dropped; an empty note clears it.
pub fn set_note(records: &mut [DayRecord], day: u32, note: &str) -> Result<(), ScheduleError> {
    let note = note.trim();
    let chars = note.chars().count();
    if chars > MAX_NOTE_CHARS {
        return Err(ScheduleError::NoteTooLong(chars));
    }
    find_day_mut(records, day)?.note = note.to_string();
    Ok(())
}
