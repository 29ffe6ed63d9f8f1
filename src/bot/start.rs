use std::sync::Arc;

use dioxus_logger::tracing;
use serenity::all::{Client, GatewayIntents};

use crate::{
    bot::handler::Handler, error::AppError, manager::GuildManager, policy::GuildPolicy,
    scheduler::guild_audit::AuditHandle,
};

/// Builds the Discord client with the guild manager installed.
///
/// # Arguments
/// - `token` - Discord bot token
/// - `manager` - Guild manager to run on guild events
///
/// # Returns
/// - `Ok((Client, AuditHandle))` - Client ready to be started, and a handle
///   to stop the periodic audit the handler starts on `ready`
/// - `Err(AppError)` - Client construction failed (e.g. malformed token)
pub async fn init_bot<P: GuildPolicy + 'static>(
    token: &str,
    manager: Arc<GuildManager<P>>,
) -> Result<(Client, AuditHandle), AppError> {
    // GUILD_MEMBERS is a privileged intent - must be enabled in Discord Developer Portal
    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS;

    let handler = Handler::new(manager);
    let audit = handler.audit_handle();

    let client = Client::builder(token, intents)
        .event_handler(handler)
        .await?;

    Ok((client, audit))
}

/// Starts the Discord bot in a blocking manner
///
/// Runs until the gateway connection shuts down.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
