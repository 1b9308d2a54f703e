use crate::bot::commands::{schedule_month, send_error};
use crate::bot::session::{SessionUser, current_user, is_admin};
use crate::bot::{Context, Error};
use crate::database::models::User;
use crate::database::queries;
use crate::schedule::admin::summarize;
use crate::schedule::aggregator::aggregate;
use crate::schedule::calendar::month_title;
use crate::utils::format::{
    create_admin_embed, create_day_embed, create_schedule_embed, create_success_embed,
    format_stats_summary, format_success_message,
};
use crate::utils::time::format_hours;
use poise::serenity_prelude as serenity;

/// Shows an error and returns false unless the caller is an admin.
async fn ensure_admin(ctx: Context<'_>) -> Result<bool, Error> {
    let session = current_user(ctx);
    if is_admin(ctx.data(), &session) {
        return Ok(true);
    }

    tracing::warn!("Non-admin user {} tried an admin command", session.id);
    send_error(ctx, "Ta komenda jest dostępna tylko dla administratora").await?;
    Ok(false)
}

/// Looks up the stored row of `target`, registering them on first use.
async fn resolve_target(ctx: Context<'_>, target: &serenity::User) -> Result<Option<User>, Error> {
    let session = SessionUser::from_discord(target);
    match session.ensure_registered(ctx.data()).await {
        Ok(user) => Ok(Some(user)),
        Err(e) => {
            send_error(ctx, &format!("Nie udało się pobrać danych użytkownika: {}", e)).await?;
            Ok(None)
        }
    }
}

/// [Admin] Lista użytkowników z sumą godzin i nadgodzinami
#[poise::command(slash_command)]
pub async fn admin_users(ctx: Context<'_>) -> Result<(), Error> {
    if !ensure_admin(ctx).await? {
        return Ok(());
    }

    let data = ctx.data();
    match queries::list_user_schedules(&data.pool).await {
        Ok(schedules) => {
            let summary = summarize(&schedules, data.today());
            ctx.send(
                poise::CreateReply::default()
                    .embed(create_admin_embed(&summary))
                    .ephemeral(true),
            )
            .await?;
        }
        Err(e) => {
            tracing::error!("Failed to list user schedules: {:?}", e);
            send_error(ctx, &format!("Nie udało się wczytać użytkowników: {}", e)).await?;
        }
    }

    Ok(())
}

/// [Admin] Pokazuje grafik wybranego użytkownika
#[poise::command(slash_command)]
pub async fn admin_schedule(
    ctx: Context<'_>,
    #[description = "Użytkownik"] user: serenity::User,
) -> Result<(), Error> {
    if !ensure_admin(ctx).await? {
        return Ok(());
    }

    let data = ctx.data();
    let target = match queries::get_user_by_discord_id(&data.pool, &user.id.to_string()).await {
        Ok(Some(target)) => target,
        Ok(None) => {
            send_error(ctx, "Ten użytkownik nie ma jeszcze grafiku").await?;
            return Ok(());
        }
        Err(e) => {
            send_error(ctx, &format!("Nie udało się pobrać danych użytkownika: {}", e)).await?;
            return Ok(());
        }
    };

    let records = match queries::load_schedule(&data.pool, target.id).await {
        Ok(Some(records)) => records,
        Ok(None) => {
            send_error(ctx, "Ten użytkownik nie ma jeszcze grafiku").await?;
            return Ok(());
        }
        Err(e) => {
            tracing::error!("Failed to load schedule for user_id={}: {:?}", target.id, e);
            send_error(ctx, &format!("Nie udało się wczytać grafiku: {}", e)).await?;
            return Ok(());
        }
    };

    let today = data.today();
    let (year, month) = schedule_month(&records, today);
    let stats = aggregate(&records, today);

    let embed = create_schedule_embed(&target.display_name, &month_title(year, month), &records)
        .field("Statystyki", format_stats_summary(&stats), false);

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;
    Ok(())
}

/// [Admin] Ustawia godziny w grafiku wybranego użytkownika
#[poise::command(slash_command)]
pub async fn admin_hours(
    ctx: Context<'_>,
    #[description = "Użytkownik"] user: serenity::User,
    #[description = "Dzień miesiąca"]
    #[min = 1]
    #[max = 31]
    day: u32,
    #[description = "Liczba godzin, np. 12.5"] hours: f64,
) -> Result<(), Error> {
    if !ensure_admin(ctx).await? {
        return Ok(());
    }
    let Some(target) = resolve_target(ctx, &user).await? else {
        return Ok(());
    };

    let data = ctx.data();
    match data.schedules.set_hours(target.id, data.today(), day, hours).await {
        Ok(records) => {
            tracing::info!(
                "Admin {} set hours: user_id={}, day={}, hours={}",
                ctx.author().id,
                target.id,
                day,
                hours
            );
            let mut builder = poise::CreateReply::default()
                .content(format_success_message(&format!(
                    "{}, dzień {}: zapisano {}",
                    target.display_name,
                    day,
                    format_hours(hours)
                )))
                .ephemeral(true);
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

/// [Admin] Ustawia notatkę w grafiku wybranego użytkownika
#[poise::command(slash_command)]
pub async fn admin_note(
    ctx: Context<'_>,
    #[description = "Użytkownik"] user: serenity::User,
    #[description = "Dzień miesiąca"]
    #[min = 1]
    #[max = 31]
    day: u32,
    #[description = "Treść notatki"] text: Option<String>,
) -> Result<(), Error> {
    if !ensure_admin(ctx).await? {
        return Ok(());
    }
    let Some(target) = resolve_target(ctx, &user).await? else {
        return Ok(());
    };

    let data = ctx.data();
    let text = text.unwrap_or_default();
    match data.schedules.set_note(target.id, data.today(), day, &text).await {
        Ok(records) => {
            tracing::info!(
                "Admin {} set note: user_id={}, day={}",
                ctx.author().id,
                target.id,
                day
            );
            let mut builder = poise::CreateReply::default()
                .content(format_success_message(&format!(
                    "{}, dzień {}: zapisano notatkę",
                    target.display_name, day
                )))
                .ephemeral(true);
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

/// [Admin] Tworzy od nowa grafik wybranego użytkownika na bieżący miesiąc
#[poise::command(slash_command)]
pub async fn admin_reset(
    ctx: Context<'_>,
    #[description = "Użytkownik"] user: serenity::User,
) -> Result<(), Error> {
    if !ensure_admin(ctx).await? {
        return Ok(());
    }
    let Some(target) = resolve_target(ctx, &user).await? else {
        return Ok(());
    };

    let data = ctx.data();
    let today = data.today();
    match data.schedules.regenerate(target.id, today).await {
        Ok(records) => {
            tracing::info!(
                "Admin {} reset schedule: user_id={}",
                ctx.author().id,
                target.id
            );
            let (year, month) = schedule_month(&records, today);
            let embed = create_success_embed(
                "Nowy grafik",
                &format!(
                    "{}: utworzono grafik na {} ({} dni)",
                    target.display_name,
                    month_title(year, month),
                    records.len()
                ),
            );
            ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
                .await?;
        }
        Err(e) => {
            tracing::error!("Failed to reset schedule for user_id={}: {:?}", target.id, e);
            send_error(ctx, &format!("Nie udało się utworzyć grafiku: {}", e)).await?;
        }
    }

    Ok(())
}
