//! Directory fixtures.

use super::{ALICE, BOB, BOT, GUILD, GUILD_CHANNEL, MOD_ROLE};
use anyhow::bail;
use async_trait::async_trait;
use slcmd::{Channel, Directory, Member, MemoryDirectory, Role, User};
use std::collections::HashSet;

/// One guild with alice and bob as members, a moderator role, one text
/// channel, and the bot holding `SEND_MESSAGES` and `EMBED_LINKS` there.
pub fn seeded_directory() -> MemoryDirectory {
    let directory = MemoryDirectory::new(BOT);

    for (id, name) in [(ALICE, "alice"), (BOB, "bob")] {
        directory.insert_member(Member {
            user: User::new(id, name),
            guild_id: GUILD.to_string(),
            nick: None,
            roles: Vec::new(),
        });
    }
    directory.insert_user(User {
        id: "3999".to_string(),
        name: "outsider".to_string(),
        bot: true,
    });
    directory.insert_role(Role {
        id: MOD_ROLE.to_string(),
        guild_id: GUILD.to_string(),
        name: "moderator".to_string(),
    });
    directory.insert_channel(Channel {
        name: Some("general".to_string()),
        ..Channel::guild(GUILD_CHANNEL, GUILD)
    });
    directory.grant(GUILD_CHANNEL, BOT, ["SEND_MESSAGES", "EMBED_LINKS"]);

    directory
}

/// Directory whose every lookup fails.
#[allow(dead_code)]
pub struct BrokenDirectory;

#[async_trait]
impl Directory for BrokenDirectory {
    fn self_id(&self) -> &str {
        BOT
    }

    async fn user(&self, _: &str) -> anyhow::Result<Option<User>> {
        bail!("user cache offline")
    }

    async fn member(&self, _: &str, _: &str) -> anyhow::Result<Option<Member>> {
        bail!("member cache offline")
    }

    async fn role(&self, _: &str, _: &str) -> anyhow::Result<Option<Role>> {
        bail!("role cache offline")
    }

    async fn channel(&self, _: &str, _: &str) -> anyhow::Result<Option<Channel>> {
        bail!("channel cache offline")
    }

    async fn permissions_of(&self, _: &Channel, _: &str) -> anyhow::Result<HashSet<String>> {
        bail!("permission service offline")
    }
}
