use crate::schedule::aggregator::{ScheduleStats, aggregate, round_to_tenth};
use crate::schedule::models::DayRecord;
use chrono::NaiveDate;

/// A stored schedule together with the owner's identity. `schedule` holds the
/// load error instead when the stored document could not be read.
#[derive(Debug, Clone)]
pub struct UserSchedule {
    pub user_id: i64,
    pub discord_id: String,
    pub display_name: String,
    pub email: Option<String>,
    pub schedule: Result<Vec<DayRecord>, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    pub user_id: i64,
    pub discord_id: String,
    pub display_name: String,
    pub email: Option<String>,
    pub stats: Result<ScheduleStats, String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdminSummary {
    pub users: Vec<UserStats>,
    pub user_count: usize,
    pub unreadable_count: usize,
    pub total_hours: f64,
    pub average_hours: f64,
    pub total_overtime: f64,
}

/// Aggregates every user's schedule and combines the per-user results.
/// Users whose schedule could not be read are listed but left out of the
/// totals and the average.
pub fn summarize(schedules: &[UserSchedule], today: NaiveDate) -> AdminSummary {
    let users: Vec<UserStats> = schedules
        .iter()
        .map(|s| UserStats {
            user_id: s.user_id,
            discord_id: s.discord_id.clone(),
            display_name: s.display_name.clone(),
            email: s.email.clone(),
            stats: s
                .schedule
                .as_ref()
                .map(|records| aggregate(records, today))
                .map_err(Clone::clone),
        })
        .collect();

    let readable: Vec<&ScheduleStats> = users.iter().filter_map(|u| u.stats.as_ref().ok()).collect();
    let total: f64 = readable.iter().map(|s| s.total_hours).sum();
    let overtime: f64 = readable.iter().map(|s| s.overtime_hours).sum();
    let user_count = users.len();
    let unreadable_count = user_count - readable.len();

    let average_hours = if readable.is_empty() {
        0.0
    } else {
        round_to_tenth(total / readable.len() as f64)
    };

    AdminSummary {
        users,
        user_count,
        unreadable_count,
        total_hours: round_to_tenth(total),
        average_hours,
        total_overtime: round_to_tenth(overtime),
    }
}
