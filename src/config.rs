use crate::schedule::generator::{DEFAULT_DAYS_OFF, GeneratorConfig};
use anyhow::Result;
use chrono::FixedOffset;
use std::collections::BTreeSet;
use std::env;

const DEFAULT_UTC_OFFSET_HOURS: i32 = 1;

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub database_url: String,
    pub admin_user_ids: Vec<String>,
    pub days_off: BTreeSet<u32>,
    pub demo_seed: bool,
    pub utc_offset: FixedOffset,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let discord_token = env::var("DISCORD_TOKEN")
            .map_err(|_| anyhow::anyhow!("DISCORD_TOKEN environment variable is required"))?;

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:schedule.db".to_string());

        let admin_user_ids = env::var("ADMIN_USER_IDS")
            .map(|raw| parse_id_list(&raw))
            .unwrap_or_default();

        let days_off = match env::var("SCHEDULE_DAYS_OFF") {
            Ok(raw) => parse_days_off(&raw)?,
            Err(_) => DEFAULT_DAYS_OFF.into_iter().collect(),
        };

        let demo_seed = match env::var("SCHEDULE_DEMO_SEED") {
            Ok(raw) => parse_bool(&raw)?,
            Err(_) => false,
        };

        let utc_offset = match env::var("UTC_OFFSET_HOURS") {
            Ok(raw) => parse_utc_offset(&raw)?,
            Err(_) => offset_from_hours(DEFAULT_UTC_OFFSET_HOURS)?,
        };

        Ok(Config {
            discord_token,
            database_url,
            admin_user_ids,
            days_off,
            demo_seed,
            utc_offset,
        })
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        let config = GeneratorConfig::default().with_days_off(self.days_off.clone());
        if self.demo_seed {
            config.with_demo_seed()
        } else {
            config
        }
    }

    pub fn is_admin(&self, discord_id: &str) -> bool {
        self.admin_user_ids.iter().any(|id| id == discord_id)
    }
}

fn parse_id_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_days_off(raw: &str) -> Result<BTreeSet<u32>> {
    raw.split(',')
        .map(str::trim)
        .filter(|day| !day.is_empty())
        .map(|day| -> Result<u32> {
            let value: u32 = day
                .parse()
                .map_err(|_| anyhow::anyhow!("SCHEDULE_DAYS_OFF: '{}' is not a day number", day))?;
            if !(1..=31).contains(&value) {
                return Err(anyhow::anyhow!("SCHEDULE_DAYS_OFF: day {} is out of range 1-31", value));
            }
            Ok(value)
        })
        .collect()
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(anyhow::anyhow!("Invalid boolean value: {}", other)),
    }
}

fn parse_utc_offset(raw: &str) -> Result<FixedOffset> {
    let hours: i32 = raw
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("UTC_OFFSET_HOURS: '{}' is not a whole number", raw))?;
    offset_from_hours(hours)
}

fn offset_from_hours(hours: i32) -> Result<FixedOffset> {
    if !(-12..=14).contains(&hours) {
        return Err(anyhow::anyhow!("UTC_OFFSET_HOURS must be between -12 and 14, got {}", hours));
    }
    FixedOffset::east_opt(hours * 3600)
        .ok_or_else(|| anyhow::anyhow!("Invalid UTC offset: {}", hours))
}
