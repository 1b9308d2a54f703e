use crate::bot::commands::{load_caller_schedule, schedule_month};
use crate::bot::{Context, Error};
use crate::schedule::aggregator::aggregate;
use crate::schedule::calendar::month_locative;
use crate::utils::format::create_stats_embed;

/// Pokazuje sumę godzin, godziny w tym tygodniu i nadgodziny
#[poise::command(slash_command)]
pub async fn stats(ctx: Context<'_>) -> Result<(), Error> {
    let Some((session, _user, records)) = load_caller_schedule(ctx).await? else {
        return Ok(());
    };

    let today = ctx.data().today();
    let (_, month) = schedule_month(&records, today);
    let stats = aggregate(&records, today);

    let embed = create_stats_embed(&session.display_name, month_locative(month), &stats, &records);
    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
