//! In-memory `GuildHost` for unit tests.

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use chrono::{Duration, Utc};
use serenity::async_trait;

use crate::{
    error::AppError,
    host::GuildHost,
    model::{GuildSnapshot, MemberInfo},
};

/// Ordered record of hook calls and host actions shared by the mock host and
/// the recording policy.
pub type EventLog = Arc<Mutex<Vec<String>>>;

pub fn events(log: &EventLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Builds a guild snapshot with a fully cached member list.
///
/// Human IDs start at 1, bot IDs at 1_000_000. The guild is one year old.
pub fn snapshot(guild_id: u64, humans: u64, bots: u64) -> GuildSnapshot {
    let members: Vec<MemberInfo> = (0..humans)
        .map(|i| MemberInfo {
            user_id: 1 + i,
            bot: false,
        })
        .chain((0..bots).map(|i| MemberInfo {
            user_id: 1_000_000 + i,
            bot: true,
        }))
        .collect();

    GuildSnapshot {
        guild_id,
        name: format!("Guild {}", guild_id),
        owner_id: 1,
        created_at: Utc::now() - Duration::days(365),
        member_count: humans + bots,
        members: Some(members),
    }
}

/// Builds a guild snapshot whose member list is not cached.
pub fn uncached_snapshot(guild_id: u64, member_count: u64) -> GuildSnapshot {
    GuildSnapshot {
        members: None,
        member_count,
        ..snapshot(guild_id, 0, 0)
    }
}

/// In-memory `GuildHost` that records leave requests in the shared log.
pub struct MockHost {
    log: EventLog,
    guild_count: u64,
    guilds: Vec<GuildSnapshot>,
    fetchable_members: HashMap<u64, Vec<MemberInfo>>,
    failing_leaves: HashSet<u64>,
    failing_dms: bool,
    left: Mutex<Vec<u64>>,
}

impl MockHost {
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            guild_count: 1,
            guilds: Vec::new(),
            fetchable_members: HashMap::new(),
            failing_leaves: HashSet::new(),
            failing_dms: false,
            left: Mutex::new(Vec::new()),
        }
    }

    pub fn with_guild_count(mut self, guild_count: u64) -> Self {
        self.guild_count = guild_count;
        self
    }

    pub fn with_guilds(mut self, guilds: Vec<GuildSnapshot>) -> Self {
        self.guild_count = guilds.len() as u64;
        self.guilds = guilds;
        self
    }

    pub fn with_fetchable_members(mut self, guild_id: u64, members: Vec<MemberInfo>) -> Self {
        self.fetchable_members.insert(guild_id, members);
        self
    }

    pub fn with_failing_leave(mut self, guild_id: u64) -> Self {
        self.failing_leaves.insert(guild_id);
        self
    }

    pub fn with_failing_dms(mut self) -> Self {
        self.failing_dms = true;
        self
    }

    pub fn left(&self) -> Vec<u64> {
        self.left.lock().unwrap().clone()
    }
}

#[async_trait]
impl GuildHost for MockHost {
    fn guild_count(&self) -> u64 {
        self.guild_count
    }

    fn guild_ids(&self) -> Vec<u64> {
        self.guilds.iter().map(|g| g.guild_id).collect()
    }

    fn guild_snapshot(&self, guild_id: u64) -> Option<GuildSnapshot> {
        self.guilds.iter().find(|g| g.guild_id == guild_id).cloned()
    }

    async fn fetch_members(&self, guild_id: u64) -> Result<Vec<MemberInfo>, AppError> {
        self.log.lock().unwrap().push(format!("fetch:{}", guild_id));
        self.fetchable_members
            .get(&guild_id)
            .cloned()
            .ok_or(AppError::GuildNotCached(guild_id))
    }

    async fn leave_guild(&self, guild_id: u64) -> Result<(), AppError> {
        self.log.lock().unwrap().push(format!("leave:{}", guild_id));
        if self.failing_leaves.contains(&guild_id) {
            return Err(AppError::GuildNotCached(guild_id));
        }
        self.left.lock().unwrap().push(guild_id);
        Ok(())
    }

    async fn message_user(&self, user_id: u64, content: &str) -> Result<(), AppError> {
        self.log
            .lock()
            .unwrap()
            .push(format!("dm:{}:{}", user_id, content));
        if self.failing_dms {
            return Err(serenity::Error::Other("cannot send messages to this user").into());
        }
        Ok(())
    }
}

