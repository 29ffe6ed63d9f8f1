use super::*;
use crate::{
    error::AppError,
    host::mock::{events, snapshot, uncached_snapshot, EventLog, MockHost},
    model::GuildSnapshot,
};
use chrono::Duration;
use serenity::async_trait;
use std::collections::HashSet;

mod new;

/// Policy that records every hook call in the shared log.
struct RecordingPolicy {
    log: EventLog,
    whitelist: HashSet<u64>,
    extra: HashSet<u64>,
}

impl RecordingPolicy {
    fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            whitelist: HashSet::new(),
            extra: HashSet::new(),
        }
    }

    fn whitelisting(mut self, guild_id: u64) -> Self {
        self.whitelist.insert(guild_id);
        self
    }

    fn with_extra_criteria(mut self, guild_id: u64) -> Self {
        self.extra.insert(guild_id);
        self
    }

    fn record(&self, event: String) {
        self.log.lock().unwrap().push(event);
    }
}

fn origin_tag(origin: LeaveOrigin) -> &'static str {
    match origin {
        LeaveOrigin::Joined => "joined",
        LeaveOrigin::Audit => "audit",
    }
}

#[async_trait]
impl GuildPolicy for RecordingPolicy {
    async fn is_whitelisted(&self, guild: &GuildSnapshot) -> bool {
        self.whitelist.contains(&guild.guild_id)
    }

    async fn extra_criteria(&self, guild: &GuildSnapshot) -> bool {
        self.extra.contains(&guild.guild_id)
    }

    async fn before_leave(
        &self,
        _host: &dyn GuildHost,
        guild: &GuildSnapshot,
        origin: LeaveOrigin,
    ) {
        self.record(format!("before:{}:{}", guild.guild_id, origin_tag(origin)));
    }

    async fn after_leave(
        &self,
        _host: &dyn GuildHost,
        guild: &GuildSnapshot,
        origin: LeaveOrigin,
    ) {
        self.record(format!("after:{}:{}", guild.guild_id, origin_tag(origin)));
    }

    async fn on_guild_limit_reached(&self, _host: &dyn GuildHost, guild: &GuildSnapshot) {
        self.record(format!("limit:{}", guild.guild_id));
    }
}

/// Thresholds used by most tests: at least 10 humans, at most half bots.
fn thresholds() -> ManagerConfig {
    ManagerConfig::default()
        .with_min_members(10)
        .with_max_bot_ratio(0.5)
}

/// Creates a manager from a configuration known to be valid.
fn new_manager<P: GuildPolicy>(config: ManagerConfig, policy: P) -> GuildManager<P> {
    GuildManager::new(config, policy).unwrap()
}
