//! Configuration for the guild manager and the bundled bot binary.
//!
//! `ManagerConfig` holds the leave criteria and is fixed once the manager is
//! registered. `Config` wraps it together with the bot token and the guild
//! whitelist, loaded from environment variables.

use std::{fmt::Display, str::FromStr, time::Duration};

use crate::error::{config::ConfigError, AppError};

/// Default guild cap, two below Discord's 100-guild verification limit.
///
/// Two or more guilds joined in quick succession can be processed before the
/// first leave completes, so the default keeps a margin under the hard cap.
pub const DEFAULT_MAX_GUILDS: u64 = 98;

/// Leave criteria enforced by the manager.
///
/// Every threshold is optional; an unset threshold is never checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagerConfig {
    /// Joining a guild that brings the guild count to this value or above
    /// causes that guild to be left immediately.
    pub max_guilds: u64,
    /// Minimum number of human (non-bot) members.
    pub min_members: Option<u64>,
    /// Maximum number of members, bots included.
    pub max_members: Option<u64>,
    /// Maximum proportion of members that are bots, in `[0, 1]`.
    pub max_bot_ratio: Option<f64>,
    /// Guilds created more recently than this are left.
    pub min_guild_age: Option<chrono::Duration>,
    /// How often already joined guilds are re-checked. `None` disables the
    /// periodic audit.
    pub audit_frequency: Option<Duration>,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            max_guilds: DEFAULT_MAX_GUILDS,
            min_members: None,
            max_members: None,
            max_bot_ratio: None,
            min_guild_age: None,
            audit_frequency: None,
        }
    }
}

impl ManagerConfig {
    pub fn with_max_guilds(mut self, max_guilds: u64) -> Self {
        self.max_guilds = max_guilds;
        self
    }

    pub fn with_min_members(mut self, min_members: u64) -> Self {
        self.min_members = Some(min_members);
        self
    }

    pub fn with_max_members(mut self, max_members: u64) -> Self {
        self.max_members = Some(max_members);
        self
    }

    pub fn with_max_bot_ratio(mut self, max_bot_ratio: f64) -> Self {
        self.max_bot_ratio = Some(max_bot_ratio);
        self
    }

    pub fn with_min_guild_age(mut self, min_guild_age: chrono::Duration) -> Self {
        self.min_guild_age = Some(min_guild_age);
        self
    }

    pub fn with_audit_frequency(mut self, frequency: Duration) -> Self {
        self.audit_frequency = Some(frequency);
        self
    }

    /// Whether any configured criterion needs the guild's member list.
    pub fn needs_member_list(&self) -> bool {
        self.min_members.is_some() || self.max_bot_ratio.is_some()
    }

    /// Checks that every configured threshold is within range.
    ///
    /// # Returns
    /// - `Ok(())` if the configuration is usable
    /// - `Err(ConfigError::InvalidThreshold)` describing the first bad value
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_guilds == 0 {
            return Err(ConfigError::InvalidThreshold(
                "max_guilds must be at least 1".to_string(),
            ));
        }

        if let Some(ratio) = self.max_bot_ratio {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(ConfigError::InvalidThreshold(format!(
                    "max_bot_ratio must be between 0 and 1, got {}",
                    ratio
                )));
            }
        }

        if let (Some(min), Some(max)) = (self.min_members, self.max_members) {
            if min > max {
                return Err(ConfigError::InvalidThreshold(format!(
                    "min_members ({}) is greater than max_members ({})",
                    min, max
                )));
            }
        }

        if let Some(age) = self.min_guild_age {
            if age < chrono::Duration::zero() {
                return Err(ConfigError::InvalidThreshold(
                    "min_guild_age must not be negative".to_string(),
                ));
            }
        }

        if self.audit_frequency.is_some_and(|f| f.is_zero()) {
            return Err(ConfigError::InvalidThreshold(
                "audit_frequency must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration of the bundled bot binary.
pub struct Config {
    pub discord_bot_token: String,
    pub manager: ManagerConfig,
    /// Guild IDs exempt from every leave criterion.
    pub whitelist: Vec<u64>,
    /// Direct message sent to a guild's owner before leaving it.
    pub owner_notice: Option<String>,
    /// Direct message sent to a guild's owner when the guild is left because
    /// the bot is at its guild limit.
    pub limit_notice: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// `from_env` passes the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_bot_token = lookup("DISCORD_BOT_TOKEN")
            .ok_or_else(|| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?;

        let manager = ManagerConfig {
            max_guilds: parse_var(&lookup, "GUILD_MANAGER_MAX_GUILDS")?
                .unwrap_or(DEFAULT_MAX_GUILDS),
            min_members: parse_var(&lookup, "GUILD_MANAGER_MIN_MEMBERS")?,
            max_members: parse_var(&lookup, "GUILD_MANAGER_MAX_MEMBERS")?,
            max_bot_ratio: parse_var(&lookup, "GUILD_MANAGER_MAX_BOT_RATIO")?,
            min_guild_age: parse_days(&lookup, "GUILD_MANAGER_MIN_GUILD_AGE_DAYS")?,
            audit_frequency: parse_var(&lookup, "GUILD_MANAGER_AUDIT_INTERVAL_SECS")?
                .map(Duration::from_secs),
        };
        manager.validate()?;

        let whitelist = match lookup("GUILD_MANAGER_WHITELIST") {
            Some(raw) => parse_id_list("GUILD_MANAGER_WHITELIST", &raw)?,
            None => Vec::new(),
        };

        let owner_notice =
            lookup("GUILD_MANAGER_OWNER_NOTICE").filter(|notice| !notice.trim().is_empty());
        let limit_notice =
            lookup("GUILD_MANAGER_LIMIT_NOTICE").filter(|notice| !notice.trim().is_empty());

        Ok(Self {
            discord_bot_token,
            manager,
            whitelist,
            owner_notice,
            limit_notice,
        })
    }
}

/// Reads an optional variable and parses it; empty values count as unset.
fn parse_var<F, T>(lookup: &F, name: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    trimmed
        .parse::<T>()
        .map(Some)
        .map_err(|e| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: raw.clone(),
            reason: e.to_string(),
        })
}

/// Reads an optional day count; counts too large for `chrono::Duration` are
/// rejected.
fn parse_days<F>(lookup: &F, name: &str) -> Result<Option<chrono::Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(days) = parse_var::<_, i64>(lookup, name)? else {
        return Ok(None);
    };

    chrono::Duration::try_days(days)
        .map(Some)
        .ok_or_else(|| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: days.to_string(),
            reason: "day count is out of range".to_string(),
        })
}

fn parse_id_list(name: &str, raw: &str) -> Result<Vec<u64>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                value: s.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}
