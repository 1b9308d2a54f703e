use crate::bot::{Context, Data};
use crate::database::models::User;
use crate::database::queries;
use anyhow::Result;
use poise::serenity_prelude as serenity;

/// The caller of a command, as far as the schedule logic cares.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionUser {
    pub id: String,
    pub email: Option<String>,
    pub display_name: String,
}

impl SessionUser {
    pub fn from_discord(user: &serenity::User) -> Self {
        Self {
            id: user.id.to_string(),
            // Discord does not share e-mail addresses with bots
            email: None,
            display_name: user.global_name.clone().unwrap_or_else(|| user.name.clone()),
        }
    }

    /// Registers the user on first contact and returns the stored row.
    pub async fn ensure_registered(&self, data: &Data) -> Result<User> {
        queries::create_or_get_user(&data.pool, &self.id, &self.display_name, self.email.as_deref()).await
    }
}

pub fn current_user(ctx: Context<'_>) -> SessionUser {
    SessionUser::from_discord(ctx.author())
}

pub fn is_admin(data: &Data, user: &SessionUser) -> bool {
    data.config.is_admin(&user.id)
}
