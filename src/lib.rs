//! Automatically leave Discord guilds that fail customisable criteria.
//!
//! Discord caps unverified bots at 100 guilds. This crate plugs into a
//! serenity bot and leaves guilds that would push it over a configured limit,
//! or that break membership criteria such as a minimum number of humans or a
//! maximum share of bots.
//!
//! # Modules
//!
//! - **Configuration** (`config`) - Leave criteria and environment loading
//! - **Error** (`error`) - Application error types
//! - **Model** (`model`) - Guild snapshots, decisions and audit reports
//! - **Policy** (`policy`) - Override points: whitelist, extra criteria, leave hooks
//! - **Host** (`host`) - The bot framework capabilities the manager uses
//! - **Manager** (`manager`) - Criteria evaluation and leave orchestration
//! - **Bot** (`bot/`) - Serenity event handler and client setup
//! - **Scheduler** (`scheduler/`) - Periodic audit of joined guilds
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use guild_manager::{bot, config::ManagerConfig, manager::GuildManager, policy::DefaultPolicy};
//!
//! let config = ManagerConfig::default()
//!     .with_min_members(10)
//!     .with_max_bot_ratio(0.5);
//! let manager = Arc::new(GuildManager::new(config, DefaultPolicy)?);
//! let (client, audit) = bot::start::init_bot(&token, manager).await?;
//! bot::start::start_bot(client).await?;
//! audit.stop().await?;
//! ```

pub mod bot;
pub mod config;
pub mod error;
pub mod host;
pub mod manager;
pub mod model;
pub mod policy;
pub mod scheduler;
