use crate::bot::commands::send_error;
use crate::bot::session::current_user;
use crate::bot::{Context, Error};
use crate::utils::format::{create_day_embed, format_success_message};
use crate::utils::time::format_hours;

/// Ustawia liczbę przepracowanych godzin (co 0.5 h)
#[poise::command(slash_command)]
pub async fn hours(
    ctx: Context<'_>,
    #[description = "Dzień miesiąca"]
    #[min = 1]
    #[max = 31]
    day: u32,
    #[description = "Liczba godzin, np. 12.5"] hours: f64,
) -> Result<(), Error> {
    let session = current_user(ctx);
    let data = ctx.data();

    let user = match session.ensure_registered(data).await {
        Ok(user) => user,
        Err(e) => {
            send_error(ctx, &format!("Nie udało się pobrać danych użytkownika: {}", e)).await?;
            return Ok(());
        }
    };

    match data.schedules.set_hours(user.id, data.today(), day, hours).await {
        Ok(records) => {
            let mut builder = poise::CreateReply::default().content(format_success_message(&format!(
                "Dzień {}: zapisano {}",
                day,
                format_hours(hours)
            )));
            if let Some(record) = records.iter().find(|r| r.day_number == day) {
                builder = builder.embed(create_day_embed(record));
            }
            ctx.send(builder).await?;
        }
        Err(e) => {
            send_error(ctx, &e.to_string()).await?;
        }
    }

    Ok(())
}

/// Ustawia notatkę dla dnia (pusta notatka usuwa obecną)
#[poise::command(slash_command)]
pub async fn note(
    ctx: Context<'_>,
    #[description = "Dzień miesiąca"]
    #[min = 1]
    #[max = 31]
    day: u32,
    #[description = "Treść notatki"] text: Option<String>,
) -> Result<(), Error> {
    let session = current_user(ctx);
    let data = ctx.data();

    let user = match session.ensure_registered(data).await {
        Ok(user) => user,
        Err(e) => {
            send_error(ctx, &format!("Nie udało się pobrać danych użytkownika: {}", e)).await?;
            return Ok(());
        }
    };

    let text = text.unwrap_or_default();
    match data.schedules.set_note(user.id, data.today(), day, &text).await {
        Ok(records) => {
            let message = if text.trim().is_empty() {
                format!("Dzień {}: usunięto notatkę", day)
            } else {
                format!("Dzień {}: zapisano notatkę", day)
            };
            let mut builder = poise::CreateReply::default().content(format_success_message(&message));
            if let Some(record) = records.iter().find(|r| r.day_number == day) {
                builder = builder.embed(create_day_embed(record));
            }
            ctx.send(builder).await?;
        }
        Err(e) => {
            send_error(ctx, &e.to_string()).await?;
        }
    }

    Ok(())
}
