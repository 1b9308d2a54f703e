pub mod commands;
pub mod handlers;
pub mod interactions;
pub mod session;

use crate::config::Config;
use crate::database;
use crate::utils::schedule_manager::ScheduleManager;
use crate::utils::time::get_current_date;
use anyhow::Result;
use chrono::NaiveDate;
use poise::serenity_prelude as serenity;
use sqlx::SqlitePool;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

#[derive(Clone)]
pub struct Data {
    pub pool: SqlitePool,
    pub config: Config,
    pub schedules: ScheduleManager,
}

impl Data {
    pub fn today(&self) -> NaiveDate {
        get_current_date(self.config.utc_offset)
    }
}

pub async fn create_bot(config: Config) -> Result<serenity::Client> {
    let pool = database::create_connection(&config.database_url).await?;

    let data = Data {
        schedules: ScheduleManager::new(pool.clone(), config.generator_config()),
        pool,
        config: config.clone(),
    };

    let intents = serenity::GatewayIntents::non_privileged();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::schedule::schedule(),
                commands::schedule::day(),
                commands::schedule::calendar(),
                commands::schedule::reset(),
                commands::hours::hours(),
                commands::hours::note(),
                commands::stats::stats(),
                commands::admin::admin_users(),
                commands::admin::admin_schedule(),
                commands::admin::admin_hours(),
                commands::admin::admin_note(),
                commands::admin::admin_reset(),
            ],
            event_handler: |ctx, event, framework, data| {
                Box::pin(handlers::event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(|ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await?;

    Ok(client)
}
