//! Ready event handler for bot initialization.
//!
//! The ready event fires after every successful gateway connection, including
//! reconnects. It starts the periodic guild audit the first time it fires;
//! later ready events find the scheduler already running and leave it alone.

use std::sync::Arc;

use dioxus_logger::tracing;
use serenity::all::{Context, Ready};

use crate::{
    host::SerenityHost, manager::GuildManager, policy::GuildPolicy,
    scheduler::guild_audit::AuditHandle,
};

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `manager` - Guild manager whose audit frequency decides whether to schedule audits
/// - `audit` - Handle to the audit scheduler, started here at most once
/// - `ctx` - Discord context providing the cache and HTTP client for audits
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready<P: GuildPolicy + 'static>(
    manager: &Arc<GuildManager<P>>,
    audit: &AuditHandle,
    ctx: Context,
    ready: Ready,
) {
    tracing::info!(
        "{} is connected to Discord ({} guilds)",
        ready.user.name,
        ready.guilds.len()
    );

    let Some(frequency) = manager.config().audit_frequency else {
        return;
    };

    let host = Arc::new(SerenityHost::from_context(&ctx));
    match audit.start(manager.clone(), host, frequency).await {
        Ok(true) => {}
        Ok(false) => tracing::debug!("Guild audit scheduler already running"),
        Err(e) => tracing::error!("Failed to start guild audit scheduler: {}", e),
    }
}
