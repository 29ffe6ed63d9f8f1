//! Scheduled jobs.

pub mod guild_audit;
