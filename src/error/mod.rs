//! Error types for the guild manager.
//!
//! `AppError` is the top-level error type returned by the manager, the host
//! adapter and the scheduler. Errors are never retried here; they propagate to
//! the caller, and the serenity event handler logs whatever reaches it since
//! event handlers have no error channel of their own.

pub mod config;

use thiserror::Error;

use crate::error::config::ConfigError;

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size. Produced when leaving a guild, fetching
    /// members or messaging an owner fails.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error from the periodic guild audit.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// The guild is no longer present in the host cache.
    ///
    /// # Fields
    /// - Discord guild ID that was looked up
    #[error("Guild {0} is not in the cache")]
    GuildNotCached(u64),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
