use crate::database::queries;
use crate::schedule::edit::{self, HoursChange};
use crate::schedule::error::ScheduleError;
use crate::schedule::generator::{GeneratorConfig, generate};
use crate::schedule::models::DayRecord;
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use sqlx::SqlitePool;

/// Loads, generates and persists user schedules. Every mutation is a
/// read-modify-write of the whole list; the last write wins.
#[derive(Clone)]
pub struct ScheduleManager {
    pool: SqlitePool,
    generator: GeneratorConfig,
}

impl ScheduleManager {
    pub fn new(pool: SqlitePool, generator: GeneratorConfig) -> Self {
        Self { pool, generator }
    }

    /// Returns the stored schedule, generating and saving the current month if there is none.
    pub async fn load_or_generate(&self, user_id: i64, today: NaiveDate) -> Result<Vec<DayRecord>> {
        if let Some(records) = queries::load_schedule(&self.pool, user_id).await? {
            return Ok(records);
        }

        let records = self.generate_for(today);
        queries::save_schedule(&self.pool, user_id, &records).await?;

        tracing::info!(
            "Generated schedule for user_id={}: {}-{:02}, {} days",
            user_id,
            today.year(),
            today.month(),
            records.len()
        );

        Ok(records)
    }

    /// Discards the stored schedule and generates the current month afresh.
    pub async fn regenerate(&self, user_id: i64, today: NaiveDate) -> Result<Vec<DayRecord>> {
        let records = self.generate_for(today);
        queries::save_schedule(&self.pool, user_id, &records).await?;

        tracing::info!("Regenerated schedule for user_id={}", user_id);
        Ok(records)
    }

    pub async fn adjust_hours(
        &self,
        user_id: i64,
        today: NaiveDate,
        day: u32,
        change: HoursChange,
    ) -> Result<Vec<DayRecord>> {
        self.update(user_id, today, |records| edit::adjust_hours(records, day, change).map(|_| ()))
            .await
    }

    pub async fn set_hours(&self, user_id: i64, today: NaiveDate, day: u32, hours: f64) -> Result<Vec<DayRecord>> {
        self.update(user_id, today, |records| edit::set_hours(records, day, hours))
            .await
    }

    pub async fn set_note(&self, user_id: i64, today: NaiveDate, day: u32, note: &str) -> Result<Vec<DayRecord>> {
        self.update(user_id, today, |records| edit::set_note(records, day, note))
            .await
    }

    /// Applies `apply` and saves the result. A rejected edit saves nothing.
    async fn update<F>(&self, user_id: i64, today: NaiveDate, apply: F) -> Result<Vec<DayRecord>>
    where
        F: FnOnce(&mut [DayRecord]) -> Result<(), ScheduleError>,
    {
        let mut records = self.load_or_generate(user_id, today).await?;

        if let Err(e) = apply(records.as_mut_slice()) {
            tracing::warn!("Rejected schedule edit: user_id={}, reason={}", user_id, e);
            return Err(e.into());
        }

        queries::save_schedule(&self.pool, user_id, &records).await?;
        Ok(records)
    }

    fn generate_for(&self, today: NaiveDate) -> Vec<DayRecord> {
        generate(today.year(), today.month(), today, &self.generator)
    }
}
