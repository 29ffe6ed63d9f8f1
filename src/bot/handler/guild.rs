//! Guild event handler applying the leave policy to newly joined guilds.
//!
//! `guild_create` fires in several scenarios:
//! - On bot startup for each guild the bot is already in
//! - When the bot joins a new guild
//! - When a guild becomes available after a Discord outage
//!
//! Only the second case is handled here. Guilds the bot was already in are
//! covered by the periodic audit instead.

use std::sync::Arc;

use dioxus_logger::tracing;
use serenity::all::{Context, Guild};

use crate::{
    host::SerenityHost,
    manager::GuildManager,
    model::{Decision, GuildSnapshot},
    policy::GuildPolicy,
};

/// Whether a `guild_create` event is a fresh join rather than a guild becoming
/// available. Serenity reports `None` when the cache is disabled; those are
/// not treated as joins.
fn is_new_join(is_new: Option<bool>) -> bool {
    is_new == Some(true)
}

/// Handles the guild_create event when a guild becomes available or the bot joins a new guild.
///
/// Serenity marks newly joined guilds with `is_new == Some(true)` by comparing
/// against its cache. The guild is snapshotted immediately and handed to
/// `GuildManager::handle_join`, which may leave it again.
///
/// # Arguments
/// - `manager` - Guild manager holding the leave criteria and policy hooks
/// - `ctx` - Discord context providing the cache and HTTP client
/// - `guild` - Guild data from Discord including the initial member list
/// - `is_new` - Whether this is a new guild join
pub async fn handle_guild_create<P: GuildPolicy>(
    manager: &Arc<GuildManager<P>>,
    ctx: Context,
    guild: Guild,
    is_new: Option<bool>,
) {
    let guild_id = guild.id.get();

    if !is_new_join(is_new) {
        tracing::trace!("Guild {} ({}) became available", guild.name, guild_id);
        return;
    }

    tracing::debug!(
        "Joined guild {} ({}) - member_count: {}, cached_members: {}",
        guild.name,
        guild_id,
        guild.member_count,
        guild.members.len()
    );

    let snapshot = GuildSnapshot::from_guild(&guild);
    let host = SerenityHost::from_context(&ctx);

    match manager.handle_join(&host, snapshot).await {
        Ok(Decision::Leave(reason)) => {
            tracing::info!(
                "Left newly joined guild {} ({}): {}",
                guild.name,
                guild_id,
                reason
            );
        }
        Ok(Decision::Keep) => {
            tracing::debug!(
                "Staying in newly joined guild {} ({})",
                guild.name,
                guild_id
            );
        }
        Err(e) => {
            tracing::error!(
                "Failed to leave guild {} ({}): {:?}",
                guild.name,
                guild_id,
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_new_guilds_are_joins() {
        assert!(is_new_join(Some(true)));
        assert!(!is_new_join(Some(false)));
        assert!(!is_new_join(None));
    }
}
