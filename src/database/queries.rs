use crate::database::models::{User, UserScheduleRow};
use crate::schedule::admin::UserSchedule;
use crate::schedule::models::{DayRecord, validate_schedule};
use anyhow::{Context, Result};
use sqlx::SqlitePool;

const USER_COLUMNS: &str = "id, discord_id, display_name, email, created_at, updated_at";

// User queries
pub async fn create_or_get_user(
    pool: &SqlitePool,
    discord_id: &str,
    display_name: &str,
    email: Option<&str>,
) -> Result<User> {
    // Try to get existing user first
    if let Some(user) = get_user_by_discord_id(pool, discord_id).await? {
        if user.display_name != display_name {
            sqlx::query(
                "UPDATE users SET display_name = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?"
            )
            .bind(display_name)
            .bind(user.id)
            .execute(pool)
            .await?;

            return get_user_by_id(pool, user.id).await;
        }
        return Ok(user);
    }

    // Create new user if not exists
    let result = sqlx::query(
        "INSERT INTO users (discord_id, display_name, email) VALUES (?, ?, ?)"
    )
    .bind(discord_id)
    .bind(display_name)
    .bind(email)
    .execute(pool)
    .await?;

    let user_id = result.last_insert_rowid();
    get_user_by_id(pool, user_id).await
}

pub async fn get_user_by_discord_id(pool: &SqlitePool, discord_id: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE discord_id = ?",
        USER_COLUMNS
    ))
    .bind(discord_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn get_user_by_id(pool: &SqlitePool, user_id: i64) -> Result<User> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    Ok(user)
}

// Schedule queries

/// Loads the user's schedule. `None` means nothing usable is stored yet.
///
/// A stored document that fails to parse or violates record invariants is an
/// error; it is never replaced implicitly.
pub async fn load_schedule(pool: &SqlitePool, user_id: i64) -> Result<Option<Vec<DayRecord>>> {
    let raw: Option<Option<String>> = sqlx::query_scalar("SELECT schedule FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    match raw.flatten() {
        Some(json) => {
            let records = parse_schedule(&json)
                .with_context(|| format!("Stored schedule of user_id={} is invalid", user_id))?;
            if records.is_empty() {
                Ok(None)
            } else {
                Ok(Some(records))
            }
        }
        None => Ok(None),
    }
}

pub async fn save_schedule(pool: &SqlitePool, user_id: i64, records: &[DayRecord]) -> Result<()> {
    let json = serde_json::to_string(records)?;

    let result = sqlx::query(
        "UPDATE users SET schedule = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?"
    )
    .bind(json)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(anyhow::anyhow!("User not found: user_id={}", user_id));
    }

    Ok(())
}

/// Every user with their schedule, ordered by registration. Users without a
/// stored schedule come back with an empty list; a stored document that cannot
/// be read is reported on that user alone.
pub async fn list_user_schedules(pool: &SqlitePool) -> Result<Vec<UserSchedule>> {
    let rows = sqlx::query_as::<_, UserScheduleRow>(
        "SELECT id, discord_id, display_name, email, schedule FROM users ORDER BY id ASC"
    )
    .fetch_all(pool)
    .await?;

    let schedules = rows
        .into_iter()
        .map(|row| {
            let schedule = match row.schedule.as_deref() {
                Some(json) => parse_schedule(json).map_err(|e| {
                    tracing::warn!("Stored schedule of user_id={} is invalid: {:#}", row.id, e);
                    format!("{:#}", e)
                }),
                None => Ok(Vec::new()),
            };

            UserSchedule {
                user_id: row.id,
                discord_id: row.discord_id,
                display_name: row.display_name,
                email: row.email,
                schedule,
            }
        })
        .collect();

    Ok(schedules)
}

fn parse_schedule(json: &str) -> Result<Vec<DayRecord>> {
    let records: Vec<DayRecord> = serde_json::from_str(json)?;
    validate_schedule(&records)?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::create_test_pool;
    use crate::schedule::generator::{GeneratorConfig, generate};
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[tokio::test]
    async fn test_create_or_get_user() {
        let pool = create_test_pool().await;

        let user = create_or_get_user(&pool, "42", "Ania", None).await.unwrap();
        assert_eq!(user.discord_id, "42");
        assert_eq!(user.display_name, "Ania");
        assert_eq!(user.email, None);

        let again = create_or_get_user(&pool, "42", "Ania", None).await.unwrap();
        assert_eq!(again.id, user.id);

        let renamed = create_or_get_user(&pool, "42", "Anna", None).await.unwrap();
        assert_eq!(renamed.id, user.id);
        assert_eq!(renamed.display_name, "Anna");

        assert!(get_user_by_discord_id(&pool, "43").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_schedule_round_trip() {
        let pool = create_test_pool().await;
        let user = create_or_get_user(&pool, "7", "Marek", Some("marek@example.com")).await.unwrap();

        assert!(load_schedule(&pool, user.id).await.unwrap().is_none());

        let mut records = generate(2026, 10, today(), &GeneratorConfig::default().with_demo_seed());
        records[6].note = "nadgodziny".to_string();
        save_schedule(&pool, user.id, &records).await.unwrap();

        let loaded = load_schedule(&pool, user.id).await.unwrap().unwrap();
        assert_eq!(loaded, records);
    }

    #[tokio::test]
    async fn test_empty_stored_schedule_counts_as_missing() {
        let pool = create_test_pool().await;
        let user = create_or_get_user(&pool, "8", "Ola", None).await.unwrap();
        save_schedule(&pool, user.id, &[]).await.unwrap();
        assert!(load_schedule(&pool, user.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_schedule_is_an_error() {
        let pool = create_test_pool().await;
        let healthy = create_or_get_user(&pool, "8", "Ola", None).await.unwrap();
        let user = create_or_get_user(&pool, "9", "Piotr", None).await.unwrap();
        let records = generate(2026, 10, today(), &GeneratorConfig::default());
        save_schedule(&pool, healthy.id, &records).await.unwrap();

        sqlx::query("UPDATE users SET schedule = ? WHERE id = ?")
            .bind(r#"[{"id":"day-1","day":1,"monthStr":"X","fullDate":"not-a-date","dayOfWeek":"X","code":"D","isWorking":true,"hoursWorked":0}]"#)
            .bind(user.id)
            .execute(&pool)
            .await
            .unwrap();

        assert!(load_schedule(&pool, user.id).await.is_err());

        // The other users are still listed
        let all = list_user_schedules(&pool).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].user_id, healthy.id);
        assert_eq!(all[0].schedule.as_ref().map(Vec::len), Ok(31));
        assert_eq!(all[1].user_id, user.id);
        assert!(all[1].schedule.as_ref().unwrap_err().contains("not-a-date"));
    }

    #[tokio::test]
    async fn test_save_for_unknown_user_fails() {
        let pool = create_test_pool().await;
        assert!(save_schedule(&pool, 999, &[]).await.is_err());
    }

    #[tokio::test]
    async fn test_list_user_schedules() {
        let pool = create_test_pool().await;
        let first = create_or_get_user(&pool, "1", "A", None).await.unwrap();
        let second = create_or_get_user(&pool, "2", "B", Some("b@example.com")).await.unwrap();

        let records = generate(2026, 10, today(), &GeneratorConfig::default());
        save_schedule(&pool, first.id, &records).await.unwrap();

        let all = list_user_schedules(&pool).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].user_id, first.id);
        assert_eq!(all[0].schedule.as_ref().map(Vec::len), Ok(31));
        assert_eq!(all[1].user_id, second.id);
        assert_eq!(all[1].email.as_deref(), Some("b@example.com"));
        assert_eq!(all[1].schedule, Ok(Vec::new()));
    }
}
