//! Capabilities the guild manager consumes from the bot framework.
//!
//! The manager never talks to serenity directly. It goes through `GuildHost`,
//! which `SerenityHost` implements over the cache and HTTP client handed out
//! in every event `Context`. Tests substitute an in-memory implementation.

use std::sync::Arc;

use dioxus_logger::tracing;
use serenity::{
    all::{Cache, Context, CreateMessage, GuildId, Http, UserId},
    async_trait,
};

use crate::{
    error::AppError,
    model::{GuildSnapshot, MemberInfo},
};

#[cfg(test)]
pub(crate) mod mock;

/// Maximum number of members to fetch per API request.
///
/// Discord's API supports up to 1000 members per request. Using the maximum
/// reduces the number of API calls needed for large guilds.
static MEMBERS_PER_REQUEST: u64 = 1000;

#[async_trait]
pub trait GuildHost: Send + Sync {
    /// Number of guilds the bot is currently in.
    fn guild_count(&self) -> u64;

    /// IDs of every guild the bot is currently in.
    fn guild_ids(&self) -> Vec<u64>;

    /// Snapshot of a cached guild, or `None` if it is not cached.
    fn guild_snapshot(&self, guild_id: u64) -> Option<GuildSnapshot>;

    /// Fetches the complete member list of a guild from the API.
    ///
    /// Requires the `GUILD_MEMBERS` privileged intent.
    async fn fetch_members(&self, guild_id: u64) -> Result<Vec<MemberInfo>, AppError>;

    /// Leaves a guild.
    async fn leave_guild(&self, guild_id: u64) -> Result<(), AppError>;

    /// Sends a direct message to a user, typically a guild owner.
    async fn message_user(&self, user_id: u64, content: &str) -> Result<(), AppError>;
}

/// `GuildHost` backed by serenity's cache and HTTP client.
#[derive(Clone)]
pub struct SerenityHost {
    cache: Arc<Cache>,
    http: Arc<Http>,
}

impl SerenityHost {
    pub fn new(cache: Arc<Cache>, http: Arc<Http>) -> Self {
        Self { cache, http }
    }

    pub fn from_context(ctx: &Context) -> Self {
        Self::new(ctx.cache.clone(), ctx.http.clone())
    }
}

#[async_trait]
impl GuildHost for SerenityHost {
    fn guild_count(&self) -> u64 {
        self.cache.guild_count() as u64
    }

    fn guild_ids(&self) -> Vec<u64> {
        self.cache.guilds().into_iter().map(|id| id.get()).collect()
    }

    fn guild_snapshot(&self, guild_id: u64) -> Option<GuildSnapshot> {
        self.cache
            .guild(GuildId::new(guild_id))
            .map(|guild| GuildSnapshot::from_guild(&guild))
    }

    /// Pages through the member list `MEMBERS_PER_REQUEST` at a time until a
    /// short page signals the end.
    async fn fetch_members(&self, guild_id: u64) -> Result<Vec<MemberInfo>, AppError> {
        let mut all_members = Vec::new();
        let mut after: Option<u64> = None;

        loop {
            let members = self
                .http
                .get_guild_members(GuildId::new(guild_id), Some(MEMBERS_PER_REQUEST), after)
                .await?;

            if members.is_empty() {
                break;
            }

            tracing::debug!(
                "Fetched {} members from Discord API for guild {} (total so far: {})",
                members.len(),
                guild_id,
                all_members.len() + members.len()
            );

            after = members.last().map(|m| m.user.id.get());
            let fetched_count = members.len();

            all_members.extend(members.iter().map(MemberInfo::from_member));

            if fetched_count < MEMBERS_PER_REQUEST as usize {
                break;
            }
        }

        Ok(all_members)
    }

    async fn leave_guild(&self, guild_id: u64) -> Result<(), AppError> {
        GuildId::new(guild_id).leave(&self.http).await?;

        Ok(())
    }

    async fn message_user(&self, user_id: u64, content: &str) -> Result<(), AppError> {
        let channel = UserId::new(user_id).create_dm_channel(&self.http).await?;
        let message = CreateMessage::new().content(content);
        channel.id.send_message(&self.http, message).await?;

        Ok(())
    }
}
