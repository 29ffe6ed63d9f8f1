use super::*;
use test_utils::serenity::{create_test_guild, create_test_guild_with_members};

mod from_guild;
