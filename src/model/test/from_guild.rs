use super::*;

/// Tests a fully cached guild keeps its member list.
///
/// Expected: 20 humans, 5 bots, member list present
#[test]
fn keeps_complete_member_list() {
    let guild = create_test_guild_with_members(123456789, "Test Guild", 20, 5);

    let snapshot = GuildSnapshot::from_guild(&guild);

    assert_eq!(snapshot.guild_id, 123456789);
    assert_eq!(snapshot.name, "Test Guild");
    assert_eq!(snapshot.owner_id, 100000000000000000);
    assert_eq!(snapshot.member_count, 25);
    assert_eq!(snapshot.human_count(), Some(20));
    assert_eq!(snapshot.bot_count(), Some(5));
}

/// Tests a guild with missing members has no member list.
///
/// Expected: member_count kept, member list None
#[test]
fn drops_partial_member_list() {
    let mut guild = create_test_guild_with_members(123456789, "Test Guild", 3, 1);
    guild.member_count = 500;

    let snapshot = GuildSnapshot::from_guild(&guild);

    assert_eq!(snapshot.member_count, 500);
    assert!(snapshot.members.is_none());
    assert!(snapshot.human_count().is_none());
    assert!(snapshot.bot_count().is_none());
}

/// Tests a guild with nothing cached has no member list.
///
/// Expected: member list None
#[test]
fn uncached_guild_has_no_member_list() {
    let guild = create_test_guild(123456789, "Test Guild", 100);

    assert!(GuildSnapshot::from_guild(&guild).members.is_none());
}

/// Tests the creation time comes from the guild ID snowflake.
///
/// Discord snowflakes store milliseconds since 2015-01-01 in the top 42 bits.
///
/// Expected: 2015-01-01T00:00:01Z for a snowflake of 1000 ms
#[test]
fn derives_creation_time_from_snowflake() {
    let guild_id = 1000u64 << 22;
    let guild = create_test_guild(guild_id, "Old Guild", 0);

    let snapshot = GuildSnapshot::from_guild(&guild);

    assert_eq!(snapshot.created_at.timestamp(), 1_420_070_401);
}

/// Tests a fetched member list replaces a missing one.
///
/// Expected: member list present, member_count raised to the fetched size
#[test]
fn with_members_completes_snapshot() {
    let guild = create_test_guild(123456789, "Test Guild", 2);
    let members = vec![
        MemberInfo { user_id: 1, bot: false },
        MemberInfo { user_id: 2, bot: true },
        MemberInfo { user_id: 3, bot: true },
    ];

    let snapshot = GuildSnapshot::from_guild(&guild).with_members(members);

    assert_eq!(snapshot.member_count, 3);
    assert_eq!(snapshot.bot_count(), Some(2));
    assert_eq!(snapshot.human_count(), Some(1));
}
