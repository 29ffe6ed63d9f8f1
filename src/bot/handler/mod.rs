use std::sync::Arc;

use serenity::all::{Context, EventHandler, Guild, Ready};
use serenity::async_trait;

use crate::{manager::GuildManager, policy::GuildPolicy, scheduler::guild_audit::AuditHandle};

pub mod guild;
pub mod ready;

/// Discord bot event handler running the guild manager.
pub struct Handler<P> {
    pub manager: Arc<GuildManager<P>>,
    /// Periodic audit job, started on the first `ready` event.
    audit: AuditHandle,
}

impl<P: GuildPolicy + 'static> Handler<P> {
    pub fn new(manager: Arc<GuildManager<P>>) -> Self {
        Self {
            manager,
            audit: AuditHandle::new(),
        }
    }

    /// Shared handle to the periodic audit, usable after the handler has
    /// been moved into the client.
    pub fn audit_handle(&self) -> AuditHandle {
        self.audit.clone()
    }
}

#[async_trait]
impl<P: GuildPolicy + 'static> EventHandler for Handler<P> {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(&self.manager, &self.audit, ctx, ready).await;
    }

    /// Called when a guild becomes available or the bot joins a new guild
    async fn guild_create(&self, ctx: Context, guild: Guild, is_new: Option<bool>) {
        guild::handle_guild_create(&self.manager, ctx, guild, is_new).await;
    }
}
