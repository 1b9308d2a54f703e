use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub discord_id: String,
    pub display_name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw user row including the serialized schedule document.
#[derive(Debug, Clone, FromRow)]
pub struct UserScheduleRow {
    pub id: i64,
    pub discord_id: String,
    pub display_name: String,
    pub email: Option<String>,
    pub schedule: Option<String>,
}
