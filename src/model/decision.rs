use std::fmt;

use crate::error::AppError;

/// Why a guild is being left.
#[derive(Debug, Clone, PartialEq)]
pub enum LeaveReason {
    /// Joining this guild brought the bot to its guild cap.
    GuildLimitReached { guild_count: u64, max_guilds: u64 },
    /// Fewer human members than the configured minimum.
    TooFewHumans { humans: u64, min: u64 },
    /// More members than the configured maximum.
    TooManyMembers { members: u64, max: u64 },
    /// Bots make up a larger share of the members than allowed.
    BotRatioExceeded { bots: u64, total: u64, max: f64 },
    /// The guild was created more recently than allowed.
    TooYoung {
        age: chrono::Duration,
        min: chrono::Duration,
    },
    /// A custom criterion from the policy matched.
    ExtraCriteria,
}

impl fmt::Display for LeaveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GuildLimitReached {
                guild_count,
                max_guilds,
            } => write!(f, "guild limit reached ({}/{})", guild_count, max_guilds),
            Self::TooFewHumans { humans, min } => {
                write!(f, "{} human members, minimum is {}", humans, min)
            }
            Self::TooManyMembers { members, max } => {
                write!(f, "{} members, maximum is {}", members, max)
            }
            Self::BotRatioExceeded { bots, total, max } => write!(
                f,
                "{}/{} members are bots, maximum ratio is {}",
                bots, total, max
            ),
            Self::TooYoung { age, min } => write!(
                f,
                "guild is {} days old, minimum is {} days",
                age.num_days(),
                min.num_days()
            ),
            Self::ExtraCriteria => write!(f, "custom leave criteria matched"),
        }
    }
}

/// Outcome of evaluating a guild.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Keep,
    Leave(LeaveReason),
}

impl Decision {
    pub fn is_leave(&self) -> bool {
        matches!(self, Self::Leave(_))
    }

    pub fn reason(&self) -> Option<&LeaveReason> {
        match self {
            Self::Keep => None,
            Self::Leave(reason) => Some(reason),
        }
    }
}

/// What triggered a leave, passed to the policy hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOrigin {
    /// The guild was just joined.
    Joined,
    /// An existing guild met the leave criteria during an audit.
    Audit,
}

/// Result of one pass over every cached guild.
#[derive(Debug, Default)]
pub struct AuditReport {
    /// Number of guilds evaluated.
    pub checked: usize,
    /// Guilds successfully left, with the reason.
    pub left: Vec<(u64, LeaveReason)>,
    /// Guilds that should have been left but the leave request failed.
    pub failed: Vec<(u64, AppError)>,
}

impl AuditReport {
    pub fn kept(&self) -> usize {
        self.checked - self.left.len() - self.failed.len()
    }
}
