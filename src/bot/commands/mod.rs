pub mod admin;
pub mod hours;
pub mod schedule;
pub mod stats;

use crate::bot::session::{SessionUser, current_user};
use crate::bot::{Context, Error};
use crate::database::models::User;
use crate::schedule::models::DayRecord;
use crate::utils::format::create_error_embed;
use chrono::{Datelike, NaiveDate};

pub(crate) async fn send_error(ctx: Context<'_>, message: &str) -> Result<(), Error> {
    let embed = create_error_embed("Błąd", message);
    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;
    Ok(())
}

/// Registers the caller and loads their schedule. On failure the error is shown and `None` returned.
pub(crate) async fn load_caller_schedule(
    ctx: Context<'_>,
) -> Result<Option<(SessionUser, User, Vec<DayRecord>)>, Error> {
    let session = current_user(ctx);
    let data = ctx.data();

    let user = match session.ensure_registered(data).await {
        Ok(user) => user,
        Err(e) => {
            send_error(ctx, &format!("Nie udało się pobrać danych użytkownika: {}", e)).await?;
            return Ok(None);
        }
    };

    match data.schedules.load_or_generate(user.id, data.today()).await {
        Ok(records) => Ok(Some((session, user, records))),
        Err(e) => {
            tracing::error!("Failed to load schedule for user_id={}: {:?}", user.id, e);
            send_error(ctx, &format!("Nie udało się wczytać grafiku: {}", e)).await?;
            Ok(None)
        }
    }
}

/// Year and month a stored schedule covers; falls back to `today` for an empty list.
pub(crate) fn schedule_month(records: &[DayRecord], today: NaiveDate) -> (i32, u32) {
    let date = records.first().map(|r| r.iso_date).unwrap_or(today);
    (date.year(), date.month())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::generator::{GeneratorConfig, generate};

    #[test]
    fn test_schedule_month() {
        let today = NaiveDate::from_ymd_opt(2026, 11, 2).unwrap();
        let october = generate(2026, 10, today, &GeneratorConfig::default());
        assert_eq!(schedule_month(&october, today), (2026, 10));
        assert_eq!(schedule_month(&[], today), (2026, 11));
    }
}
