//! Test factories for creating Serenity API objects.
//!
//! These factories create valid Serenity structs with sensible defaults while
//! allowing customization of the fields the guild manager reads.
//!
//! # Available Factories
//!
//! - `guild::create_test_guild` - Create Serenity Guild objects without cached members
//! - `guild::create_test_guild_with_members` - Create Guild objects with a full member list
//! - `member::create_test_member` - Create Serenity Member objects

pub mod guild;
pub mod member;

// Re-export commonly used functions for convenience
pub use guild::{create_test_guild, create_test_guild_with_members};
pub use member::create_test_member;
