//! Guild policy evaluation and leave orchestration.
//!
//! `GuildManager` combines a `ManagerConfig` with a `GuildPolicy` and decides,
//! per guild, whether to stay or leave. It is driven from two places:
//!
//! - `handle_join` when the bot joins a new guild (from `guild_create`)
//! - `audit` when every cached guild is re-checked, either on the configured
//!   schedule or on demand
//!
//! Leave requests are never retried. A failed leave on join is returned to the
//! caller; a failed leave during an audit is recorded in the `AuditReport` and
//! the audit moves on.

use chrono::{DateTime, Utc};
use dioxus_logger::tracing;

use crate::{
    config::ManagerConfig,
    error::{config::ConfigError, AppError},
    host::GuildHost,
    model::{AuditReport, Decision, GuildSnapshot, LeaveOrigin, LeaveReason},
    policy::GuildPolicy,
};

#[cfg(test)]
mod test;

pub struct GuildManager<P> {
    config: ManagerConfig,
    policy: P,
}

impl<P: GuildPolicy> GuildManager<P> {
    /// Creates a manager after checking every threshold in `config`.
    ///
    /// # Returns
    /// - `Ok(GuildManager)` - Manager ready to evaluate guilds
    /// - `Err(ConfigError::InvalidThreshold)` - A threshold is out of range
    pub fn new(config: ManagerConfig, policy: P) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self { config, policy })
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Returns `true` if `guild` is not whitelisted and breaks at least one
    /// leave criterion.
    pub async fn should_leave(&self, guild: &GuildSnapshot) -> bool {
        self.evaluate(guild).await.is_leave()
    }

    /// Evaluates `guild` against the leave criteria as of now.
    pub async fn evaluate(&self, guild: &GuildSnapshot) -> Decision {
        self.evaluate_at(guild, Utc::now()).await
    }

    /// Evaluates `guild` against the leave criteria as of `now`.
    ///
    /// Criteria are checked in order and the first one broken decides the
    /// reason:
    /// 1. Whitelisted guilds are always kept
    /// 2. Minimum guild age
    /// 3. Minimum human member count (needs the member list)
    /// 4. Maximum total member count
    /// 5. Maximum bot ratio (needs the member list)
    /// 6. The policy's extra criteria
    ///
    /// Criteria that need the member list are skipped with a warning when the
    /// snapshot does not carry one.
    pub async fn evaluate_at(&self, guild: &GuildSnapshot, now: DateTime<Utc>) -> Decision {
        if self.policy.is_whitelisted(guild).await {
            tracing::debug!("Guild {} ({}) is whitelisted", guild.name, guild.guild_id);
            return Decision::Keep;
        }

        if let Some(min) = self.config.min_guild_age {
            let age = guild.age(now);
            if age < min {
                return Decision::Leave(LeaveReason::TooYoung { age, min });
            }
        }

        if let Some(min) = self.config.min_members {
            match guild.human_count() {
                Some(humans) if humans < min => {
                    return Decision::Leave(LeaveReason::TooFewHumans { humans, min });
                }
                Some(_) => {}
                None => tracing::warn!(
                    "Member list for guild {} ({}) is not cached. Cannot check min_members criteria.",
                    guild.name,
                    guild.guild_id
                ),
            }
        }

        if let Some(max) = self.config.max_members {
            if guild.member_count > max {
                return Decision::Leave(LeaveReason::TooManyMembers {
                    members: guild.member_count,
                    max,
                });
            }
        }

        if let Some(max) = self.config.max_bot_ratio {
            match guild.members.as_deref() {
                Some(members) if !members.is_empty() => {
                    let bots = members.iter().filter(|m| m.bot).count() as u64;
                    let total = members.len() as u64;
                    if bots as f64 / total as f64 > max {
                        return Decision::Leave(LeaveReason::BotRatioExceeded { bots, total, max });
                    }
                }
                Some(_) => {}
                None => tracing::warn!(
                    "Member list for guild {} ({}) is not cached. Cannot check max_bot_ratio criteria.",
                    guild.name,
                    guild.guild_id
                ),
            }
        }

        if self.policy.extra_criteria(guild).await {
            return Decision::Leave(LeaveReason::ExtraCriteria);
        }

        Decision::Keep
    }

    /// Handles a newly joined guild.
    ///
    /// If the join brought the bot to `max_guilds`, the guild is left at once:
    /// `on_guild_limit_reached`, the leave, then `after_leave`. Otherwise the
    /// guild is evaluated and, if it breaks a criterion, left with
    /// `before_leave` and `after_leave` around the leave.
    ///
    /// When a member-dependent criterion is configured and the snapshot lacks
    /// the member list, the list is fetched from the API first. A failed fetch
    /// is logged and the partial snapshot is evaluated.
    ///
    /// # Arguments
    /// - `host` - Bot framework capabilities (cache, leave, member fetch)
    /// - `guild` - Snapshot of the guild that was just joined
    ///
    /// # Returns
    /// - `Ok(Decision)` - The decision that was carried out
    /// - `Err(AppError)` - The leave request failed
    pub async fn handle_join(
        &self,
        host: &dyn GuildHost,
        guild: GuildSnapshot,
    ) -> Result<Decision, AppError> {
        let guild_count = host.guild_count();

        if guild_count >= self.config.max_guilds {
            let reason = LeaveReason::GuildLimitReached {
                guild_count,
                max_guilds: self.config.max_guilds,
            };
            tracing::info!(
                "Leaving guild {} ({}): {}",
                guild.name,
                guild.guild_id,
                reason
            );

            self.policy.on_guild_limit_reached(host, &guild).await;
            host.leave_guild(guild.guild_id).await?;
            self.policy
                .after_leave(host, &guild, LeaveOrigin::Joined)
                .await;

            return Ok(Decision::Leave(reason));
        }

        let guild = self.complete_members(host, guild).await;
        let decision = self.evaluate(&guild).await;

        match &decision {
            Decision::Leave(reason) => {
                self.leave(host, &guild, reason, LeaveOrigin::Joined)
                    .await?;
            }
            Decision::Keep => {
                tracing::debug!("Keeping newly joined guild {} ({})", guild.name, guild.guild_id);
            }
        }

        Ok(decision)
    }

    /// Re-checks every cached guild and leaves those that break a criterion.
    ///
    /// Uses cached member lists only; no members are fetched from the API.
    pub async fn audit(&self, host: &dyn GuildHost) -> AuditReport {
        let mut report = AuditReport::default();

        for guild_id in host.guild_ids() {
            let Some(guild) = host.guild_snapshot(guild_id) else {
                tracing::warn!("Guild {} disappeared from the cache during audit", guild_id);
                continue;
            };
            report.checked += 1;

            let Decision::Leave(reason) = self.evaluate(&guild).await else {
                continue;
            };

            match self.leave(host, &guild, &reason, LeaveOrigin::Audit).await {
                Ok(()) => report.left.push((guild_id, reason)),
                Err(e) => {
                    tracing::error!(
                        "Failed to leave guild {} ({}): {:?}",
                        guild.name,
                        guild_id,
                        e
                    );
                    report.failed.push((guild_id, e));
                }
            }
        }

        tracing::info!(
            "Guild audit complete: {} checked, {} left, {} failed",
            report.checked,
            report.left.len(),
            report.failed.len()
        );

        report
    }

    async fn leave(
        &self,
        host: &dyn GuildHost,
        guild: &GuildSnapshot,
        reason: &LeaveReason,
        origin: LeaveOrigin,
    ) -> Result<(), AppError> {
        tracing::info!(
            "Leaving guild {} ({}): {}",
            guild.name,
            guild.guild_id,
            reason
        );

        self.policy.before_leave(host, guild, origin).await;
        host.leave_guild(guild.guild_id).await?;
        self.policy.after_leave(host, guild, origin).await;

        Ok(())
    }

    async fn complete_members(&self, host: &dyn GuildHost, guild: GuildSnapshot) -> GuildSnapshot {
        if guild.members.is_some() || !self.config.needs_member_list() {
            return guild;
        }

        match host.fetch_members(guild.guild_id).await {
            Ok(members) => {
                tracing::debug!(
                    "Fetched {} members for guild {} before evaluation",
                    members.len(),
                    guild.guild_id
                );
                guild.with_members(members)
            }
            Err(e) => {
                tracing::error!(
                    "Failed to fetch guild {} members from API: {:?}",
                    guild.guild_id,
                    e
                );
                guild
            }
        }
    }
}
