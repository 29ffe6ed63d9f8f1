//! Override points for customising which guilds are left.
//!
//! Implement `GuildPolicy` on your own type and override only the methods you
//! need; every method has a default. The manager calls them in a fixed order
//! for each guild it leaves:
//!
//! 1. `before_leave` (or `on_guild_limit_reached` when a join hit the cap)
//! 2. the leave request
//! 3. `after_leave`
//!
//! Hooks cannot veto a leave. Failures inside hooks are the hook's own
//! concern; log them there.

use std::collections::HashSet;

use dioxus_logger::tracing;
use serenity::async_trait;

use crate::{
    host::GuildHost,
    model::{GuildSnapshot, LeaveOrigin},
};

#[async_trait]
pub trait GuildPolicy: Send + Sync {
    /// Returns `true` for guilds that must never be left, even if they match
    /// every leave criterion. Defaults to `false`.
    async fn is_whitelisted(&self, _guild: &GuildSnapshot) -> bool {
        false
    }

    /// Custom leave criteria, checked after the configured thresholds.
    /// Defaults to `false`.
    async fn extra_criteria(&self, _guild: &GuildSnapshot) -> bool {
        false
    }

    /// Called right before a guild that matched the leave criteria is left.
    async fn before_leave(
        &self,
        _host: &dyn GuildHost,
        _guild: &GuildSnapshot,
        _origin: LeaveOrigin,
    ) {
    }

    /// Called after a guild has been left.
    ///
    /// Not called when the leave request fails.
    async fn after_leave(
        &self,
        _host: &dyn GuildHost,
        _guild: &GuildSnapshot,
        _origin: LeaveOrigin,
    ) {
    }

    /// Called instead of `before_leave` when joining `guild` brought the bot's
    /// guild count to the configured maximum. The guild is left regardless of
    /// the other criteria, then `after_leave` runs as usual.
    async fn on_guild_limit_reached(&self, _host: &dyn GuildHost, _guild: &GuildSnapshot) {}
}

/// Policy that keeps every default: nothing whitelisted, no extra criteria,
/// no-op hooks.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultPolicy;

impl GuildPolicy for DefaultPolicy {}

/// Policy that exempts a fixed set of guilds and optionally tells the owner
/// of every other guild why the bot is leaving.
///
/// The owner notice is sent before leaving a guild that fails the criteria.
/// The limit notice is sent when a join is undone because the bot is at its
/// guild limit; the guild itself may be fine, so the owner notice is not used
/// there. Both may contain `{guild}`, replaced with the guild name. A failed
/// direct message is logged and does not stop the leave.
#[derive(Debug, Default, Clone)]
pub struct WhitelistPolicy {
    whitelist: HashSet<u64>,
    owner_notice: Option<String>,
    limit_notice: Option<String>,
}

impl WhitelistPolicy {
    pub fn new(whitelist: impl IntoIterator<Item = u64>) -> Self {
        Self {
            whitelist: whitelist.into_iter().collect(),
            owner_notice: None,
            limit_notice: None,
        }
    }

    pub fn with_owner_notice(mut self, notice: impl Into<String>) -> Self {
        self.owner_notice = Some(notice.into());
        self
    }

    pub fn with_limit_notice(mut self, notice: impl Into<String>) -> Self {
        self.limit_notice = Some(notice.into());
        self
    }

    async fn notify_owner(&self, host: &dyn GuildHost, guild: &GuildSnapshot, notice: &str) {
        let content = notice.replace("{guild}", &guild.name);
        if let Err(e) = host.message_user(guild.owner_id, &content).await {
            tracing::warn!(
                "Failed to notify owner {} of guild {} ({}): {:?}",
                guild.owner_id,
                guild.name,
                guild.guild_id,
                e
            );
        }
    }
}

#[async_trait]
impl GuildPolicy for WhitelistPolicy {
    async fn is_whitelisted(&self, guild: &GuildSnapshot) -> bool {
        self.whitelist.contains(&guild.guild_id)
    }

    async fn before_leave(
        &self,
        host: &dyn GuildHost,
        guild: &GuildSnapshot,
        _origin: LeaveOrigin,
    ) {
        if let Some(notice) = &self.owner_notice {
            self.notify_owner(host, guild, notice).await;
        }
    }

    async fn on_guild_limit_reached(&self, host: &dyn GuildHost, guild: &GuildSnapshot) {
        if let Some(notice) = &self.limit_notice {
            self.notify_owner(host, guild, notice).await;
        }
    }
}
