use crate::bot::commands::{load_caller_schedule, schedule_month, send_error};
use crate::bot::interactions::day_buttons::day_buttons;
use crate::bot::session::current_user;
use crate::bot::{Context, Error};
use crate::schedule::aggregator::aggregate;
use crate::schedule::calendar::{month_title, render_grid};
use crate::utils::format::{create_calendar_embed, create_day_embed, create_schedule_embed, create_success_embed};

/// Pokazuje Twój grafik na bieżący miesiąc
#[poise::command(slash_command)]
pub async fn schedule(ctx: Context<'_>) -> Result<(), Error> {
    let Some((session, _user, records)) = load_caller_schedule(ctx).await? else {
        return Ok(());
    };

    let (year, month) = schedule_month(&records, ctx.data().today());
    let embed = create_schedule_embed(&session.display_name, &month_title(year, month), &records);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Pokazuje jeden dzień z przyciskami do zmiany godzin i notatki
#[poise::command(slash_command)]
pub async fn day(
    ctx: Context<'_>,
    #[description = "Dzień miesiąca"]
    #[min = 1]
    #[max = 31]
    day: u32,
) -> Result<(), Error> {
    let Some((session, _user, records)) = load_caller_schedule(ctx).await? else {
        return Ok(());
    };

    let Some(record) = records.iter().find(|r| r.day_number == day) else {
        send_error(ctx, &format!("Brak dnia {} w grafiku", day)).await?;
        return Ok(());
    };

    let builder = poise::CreateReply::default()
        .embed(create_day_embed(record))
        .components(vec![day_buttons(&session.id, day)]);

    ctx.send(builder).await?;
    Ok(())
}

/// Pokazuje kalendarz miesiąca z dniami wolnymi
#[poise::command(slash_command)]
pub async fn calendar(ctx: Context<'_>) -> Result<(), Error> {
    let Some((_session, _user, records)) = load_caller_schedule(ctx).await? else {
        return Ok(());
    };

    let today = ctx.data().today();
    let (year, month) = schedule_month(&records, today);
    let grid = render_grid(&records, year, month);
    let stats = aggregate(&records, today);

    let embed = create_calendar_embed(&month_title(year, month), &grid, &stats);
    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Tworzy od nowa grafik na bieżący miesiąc (usuwa zapisane godziny i notatki)
#[poise::command(slash_command)]
pub async fn reset(ctx: Context<'_>) -> Result<(), Error> {
    let session = current_user(ctx);
    let data = ctx.data();

    let user = match session.ensure_registered(data).await {
        Ok(user) => user,
        Err(e) => {
            send_error(ctx, &format!("Nie udało się pobrać danych użytkownika: {}", e)).await?;
            return Ok(());
        }
    };

    let today = data.today();
    match data.schedules.regenerate(user.id, today).await {
        Ok(records) => {
            let (year, month) = schedule_month(&records, today);
            let embed = create_success_embed(
                "Nowy grafik",
                &format!("Utworzono grafik na {} ({} dni)", month_title(year, month), records.len()),
            );
            ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
                .await?;
        }
        Err(e) => {
            tracing::error!("Failed to regenerate schedule for user_id={}: {:?}", user.id, e);
            send_error(ctx, &format!("Nie udało się utworzyć grafiku: {}", e)).await?;
        }
    }

    Ok(())
}
