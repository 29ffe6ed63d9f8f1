//! Discord bot integration for the guild manager.
//!
//! `handler` registers the manager into serenity's event dispatch and `start`
//! builds the client. Embedding applications that already run their own
//! serenity client can skip `start` and install `handler::Handler` directly.
//!
//! # Gateway Intents
//!
//! The manager requires the following gateway intents:
//! - `GUILDS` - Receive guild create events and keep the guild cache current
//! - `GUILD_MEMBERS` - Receive member lists so human and bot counts can be
//!   checked (privileged intent)
//!
//! Note: `GUILD_MEMBERS` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application. Without it the
//! `min_members` and `max_bot_ratio` criteria are skipped.

pub mod handler;
pub mod start;
