use chrono::{DateTime, Utc};
use serenity::all::{Guild, Member};

/// A guild member as seen by the leave criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberInfo {
    /// Discord user ID as a u64.
    pub user_id: u64,
    /// Whether the account is a bot.
    pub bot: bool,
}

impl MemberInfo {
    pub fn from_member(member: &Member) -> Self {
        Self {
            user_id: member.user.id.get(),
            bot: member.user.bot,
        }
    }
}

/// Point-in-time copy of the guild data the leave criteria read.
///
/// Built from serenity's cached `Guild` so that no cache lock is held while
/// hooks and HTTP calls are awaited.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildSnapshot {
    /// Discord guild ID as a u64.
    pub guild_id: u64,
    /// Guild display name.
    pub name: String,
    /// Discord user ID of the guild owner.
    pub owner_id: u64,
    /// Creation time, derived from the guild ID snowflake.
    pub created_at: DateTime<Utc>,
    /// Total member count reported by Discord, bots included.
    pub member_count: u64,
    /// Full member list, or `None` if the host has not cached every member.
    pub members: Option<Vec<MemberInfo>>,
}

impl GuildSnapshot {
    /// Converts a serenity guild into a snapshot.
    ///
    /// Discord only sends the complete member list for small guilds, and only
    /// with the `GUILD_MEMBERS` privileged intent. The member list is kept
    /// only when the cache holds at least `member_count` members; a partial
    /// list would skew both the human count and the bot ratio.
    pub fn from_guild(guild: &Guild) -> Self {
        let members = if guild.members.len() as u64 >= guild.member_count {
            Some(guild.members.values().map(MemberInfo::from_member).collect())
        } else {
            None
        };

        Self {
            guild_id: guild.id.get(),
            name: guild.name.clone(),
            owner_id: guild.owner_id.get(),
            created_at: DateTime::<Utc>::from_timestamp(guild.id.created_at().unix_timestamp(), 0)
                .unwrap_or_default(),
            member_count: guild.member_count,
            members,
        }
    }

    /// Replaces the member list with one fetched from the API.
    pub fn with_members(mut self, members: Vec<MemberInfo>) -> Self {
        self.member_count = self.member_count.max(members.len() as u64);
        self.members = Some(members);
        self
    }

    /// Number of bot accounts, if the member list is available.
    pub fn bot_count(&self) -> Option<u64> {
        self.members
            .as_ref()
            .map(|members| members.iter().filter(|m| m.bot).count() as u64)
    }

    /// Number of human accounts, if the member list is available.
    pub fn human_count(&self) -> Option<u64> {
        self.members
            .as_ref()
            .map(|members| members.iter().filter(|m| !m.bot).count() as u64)
    }

    /// Age of the guild relative to `now`.
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.created_at
    }
}
