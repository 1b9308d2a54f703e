use crate::schedule::models::DayRecord;
use chrono::{Datelike, NaiveDate};

/// Month names as used in "3 Października".
pub const MONTH_NAMES_GENITIVE: [&str; 12] = [
    "Stycznia", "Lutego", "Marca", "Kwietnia", "Maja", "Czerwca",
    "Lipca", "Sierpnia", "Września", "Października", "Listopada", "Grudnia",
];

/// Month names for headers.
pub const MONTH_NAMES_NOMINATIVE: [&str; 12] = [
    "Styczeń", "Luty", "Marzec", "Kwiecień", "Maj", "Czerwiec",
    "Lipiec", "Sierpień", "Wrzesień", "Październik", "Listopad", "Grudzień",
];

/// Month names as used in "w Październiku".
pub const MONTH_NAMES_LOCATIVE: [&str; 12] = [
    "Styczniu", "Lutym", "Marcu", "Kwietniu", "Maju", "Czerwcu",
    "Lipcu", "Sierpniu", "Wrześniu", "Październiku", "Listopadzie", "Grudniu",
];

/// Sunday first, matching `Weekday::num_days_from_sunday`.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Niedziela", "Poniedziałek", "Wtorek", "Środa", "Czwartek", "Piątek", "Sobota",
];

/// Monday first, for the calendar grid.
pub const WEEKDAY_HEADERS: [&str; 7] = ["Pn", "Wt", "Śr", "Cz", "Pt", "Sb", "Nd"];

fn month_index(month: u32) -> usize {
    (month.clamp(1, 12) - 1) as usize
}

pub fn month_label(month: u32) -> &'static str {
    MONTH_NAMES_GENITIVE[month_index(month)]
}

pub fn month_locative(month: u32) -> &'static str {
    MONTH_NAMES_LOCATIVE[month_index(month)]
}

/// Header title such as "Październik 2026".
pub fn month_title(year: i32, month: u32) -> String {
    format!("{} {}", MONTH_NAMES_NOMINATIVE[month_index(month)], year)
}

pub fn weekday_label(date: NaiveDate) -> &'static str {
    WEEKDAY_NAMES[date.weekday().num_days_from_sunday() as usize]
}

/// Number of days in the given month, or `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next.signed_duration_since(first).num_days() as u32)
}

/// Column of the 1st of the month in a Monday-first grid (Monday = 0, Sunday = 6).
pub fn start_day_offset(year: i32, month: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|first| first.weekday().num_days_from_monday())
}

/// Renders a Monday-first month grid for a monospace code block.
///
/// Off days are suffixed with `-`, today with `*`. Records are laid out in the
/// order given, which is calendar order for any generated schedule.
pub fn render_grid(records: &[DayRecord], year: i32, month: u32) -> String {
    let offset = start_day_offset(year, month).unwrap_or(0) as usize;

    let mut grid = String::new();
    let header: Vec<String> = WEEKDAY_HEADERS.iter().map(|h| format!("{:<4}", h)).collect();
    grid.push_str(header.concat().trim_end());
    grid.push('\n');

    let mut line = "    ".repeat(offset);
    let mut column = offset;

    for record in records {
        let marker = if record.is_today {
            '*'
        } else if !record.is_work_day() {
            '-'
        } else {
            ' '
        };
        line.push_str(&format!("{:>2}{} ", record.day_number, marker));
        column += 1;

        if column == 7 {
            grid.push_str(line.trim_end());
            grid.push('\n');
            line.clear();
            column = 0;
        }
    }

    if !line.trim().is_empty() {
        grid.push_str(line.trim_end());
        grid.push('\n');
    }

    grid
}
