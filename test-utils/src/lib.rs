//! Guild Manager Test Utils
//!
//! Provides shared testing utilities for the guild manager. Serenity models
//! have no public constructors, so tests build them the way Discord delivers
//! them: by deserializing JSON.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::create_test_guild_with_members;
//!
//! #[tokio::test]
//! async fn test_bot_ratio() {
//!     // 4 humans and 8 bots, every member cached
//!     let guild = create_test_guild_with_members(123456789, "Test Guild", 4, 8);
//!
//!     // Use in your tests...
//! }
//! ```

pub mod serenity;
