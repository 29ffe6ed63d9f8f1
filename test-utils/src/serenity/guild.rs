//! Test factory for creating Serenity Guild objects.

use serenity::all::Guild;

use crate::serenity::member::create_test_member;

/// First user ID assigned to bot members by `create_test_guild_with_members`.
pub const FIRST_BOT_ID: u64 = 900_000_000_000_000_000;

/// Creates a test Serenity Guild with no cached members.
///
/// The guild reports `member_count` members but its member list is empty,
/// like a large guild whose members were never chunked. The owner is always
/// user `100000000000000000`.
///
/// # Arguments
/// - `guild_id` - Discord guild ID (snowflake)
/// - `name` - Guild name
/// - `member_count` - Member count reported by Discord
///
/// # Returns
/// - `Guild` - A valid Serenity Guild struct for testing
///
/// # Panics
/// - If the JSON cannot be deserialized into a Guild (indicates invalid test data)
pub fn create_test_guild(guild_id: u64, name: &str, member_count: u64) -> Guild {
    serde_json::from_value(serde_json::json!({
        "id": guild_id.to_string(),
        "name": name,
        "icon": null,
        "icon_hash": null,
        "owner_id": "100000000000000000",
        "afk_timeout": 300,
        "verification_level": 0,
        "default_message_notifications": 0,
        "explicit_content_filter": 0,
        "roles": [],
        "emojis": [],
        "stickers": [],
        "features": [],
        "mfa_level": 0,
        "system_channel_flags": 0,
        "premium_tier": 0,
        "premium_subscription_count": 0,
        "premium_progress_bar_enabled": false,
        "preferred_locale": "en-US",
        "nsfw_level": 0,
        "joined_at": "2020-01-01T00:00:00.000000+00:00",
        "large": false,
        "member_count": member_count,
        "voice_states": [],
        "channels": [],
        "threads": [],
        "presences": [],
        "max_presences": 25000,
        "max_members": 100000,
        "unavailable": false,
        "members": [],
        "stage_instances": [],
        "guild_scheduled_events": [],
    }))
    .expect("Failed to create test guild - invalid JSON structure")
}

/// Creates a test Serenity Guild with every member cached.
///
/// Human user IDs count up from 1, bot user IDs from `FIRST_BOT_ID`.
///
/// # Arguments
/// - `guild_id` - Discord guild ID (snowflake)
/// - `name` - Guild name
/// - `humans` - Number of human members
/// - `bots` - Number of bot members
///
/// # Examples
///
/// ```rust,ignore
/// let guild = create_test_guild_with_members(123456789, "Test Guild", 20, 5);
/// assert_eq!(guild.member_count, 25);
/// assert_eq!(guild.members.len(), 25);
/// ```
pub fn create_test_guild_with_members(guild_id: u64, name: &str, humans: u64, bots: u64) -> Guild {
    let mut guild = create_test_guild(guild_id, name, humans + bots);

    let members = (0..humans)
        .map(|i| create_test_member(guild_id, 1 + i, false))
        .chain((0..bots).map(|i| create_test_member(guild_id, FIRST_BOT_ID + i, true)));

    for member in members {
        guild.members.insert(member.user.id, member);
    }

    guild
}
