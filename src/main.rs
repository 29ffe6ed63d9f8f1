use std::sync::Arc;

use dioxus_logger::tracing::{self, Level};

use guild_manager::{
    bot, config::Config, error::AppError, manager::GuildManager, policy::WhitelistPolicy,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    if let Err(e) = dioxus_logger::init(Level::INFO) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let mut policy = WhitelistPolicy::new(config.whitelist.iter().copied());
    if let Some(notice) = &config.owner_notice {
        policy = policy.with_owner_notice(notice.clone());
    }
    if let Some(notice) = &config.limit_notice {
        policy = policy.with_limit_notice(notice.clone());
    }

    tracing::info!(
        "Guild manager configured: max_guilds={}, min_members={:?}, max_members={:?}, max_bot_ratio={:?}, whitelisted={}",
        config.manager.max_guilds,
        config.manager.min_members,
        config.manager.max_members,
        config.manager.max_bot_ratio,
        config.whitelist.len()
    );

    let manager = Arc::new(GuildManager::new(config.manager, policy)?);
    let (client, audit) = bot::start::init_bot(&config.discord_bot_token, manager).await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }

        tracing::info!("Shutting down...");
        if let Err(e) = audit.stop().await {
            tracing::error!("Failed to stop guild audit scheduler: {}", e);
        }
        shard_manager.shutdown_all().await;
    });

    bot::start::start_bot(client).await
}
