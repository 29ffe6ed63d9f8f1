//! Test factory for creating Serenity Member objects.

use serenity::all::Member;

/// Creates a test Serenity Member.
///
/// The username is derived from the user ID. All other fields are set to
/// reasonable defaults (no nickname, no roles, not muted or deafened).
///
/// # Arguments
/// - `guild_id` - Discord guild ID the member belongs to
/// - `user_id` - Discord user ID (snowflake)
/// - `bot` - Whether the account is a bot
///
/// # Returns
/// - `Member` - A valid Serenity Member struct for testing
///
/// # Panics
/// - If the JSON cannot be deserialized into a Member (indicates invalid test data)
pub fn create_test_member(guild_id: u64, user_id: u64, bot: bool) -> Member {
    serde_json::from_value(serde_json::json!({
        "guild_id": guild_id.to_string(),
        "user": {
            "id": user_id.to_string(),
            "username": format!("user{}", user_id),
            "discriminator": "0",
            "global_name": null,
            "avatar": null,
            "bot": bot,
            "system": false,
            "public_flags": 0,
        },
        "nick": null,
        "avatar": null,
        "roles": [],
        "joined_at": "2020-01-01T00:00:00.000000+00:00",
        "premium_since": null,
        "deaf": false,
        "mute": false,
        "flags": 0,
        "pending": false,
        "communication_disabled_until": null,
    }))
    .expect("Failed to create test member - invalid JSON structure")
}
