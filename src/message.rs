//! Message context and the platform entities readers resolve to.

use serde::{Deserialize, Serialize};

/// A chat user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub bot: bool,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            bot: false,
        }
    }
}

/// A user's membership in one guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub user: User,
    pub guild_id: String,
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// A guild role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub guild_id: String,
    pub name: String,
}

/// A channel. Channels with a `guild_id` are guild-scoped; the rest are
/// direct or group conversations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    #[serde(default)]
    pub guild_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Channel {
    /// A channel outside any guild.
    pub fn direct(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            guild_id: None,
            name: None,
        }
    }

    /// A channel belonging to `guild_id`.
    pub fn guild(id: impl Into<String>, guild_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            guild_id: Some(guild_id.into()),
            name: None,
        }
    }

    #[inline]
    pub fn is_guild(&self) -> bool {
        self.guild_id.is_some()
    }
}

/// An incoming message as seen by the dispatcher.
///
/// Middleware receives the message by value and hands back the (possibly
/// replaced) message, so hosts can attach whatever they need to `content`
/// or keep extra state keyed by `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub author: User,
    pub channel: Channel,
    /// Prefix this message was invoked with. Set by the dispatcher right
    /// before the command body runs.
    pub prefix: Option<String>,
}

impl Message {
    pub fn new(
        id: impl Into<String>,
        content: impl Into<String>,
        author: User,
        channel: Channel,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            author,
            channel,
            prefix: None,
        }
    }

    /// Guild the message originated in, if any.
    #[inline]
    pub fn guild_id(&self) -> Option<&str> {
        self.channel.guild_id.as_deref()
    }

    #[inline]
    pub fn in_guild(&self) -> bool {
        self.channel.is_guild()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guild_scope_follows_channel() {
        let author = User::new("1", "alice");
        let dm = Message::new("m1", "&ping", author.clone(), Channel::direct("10"));
        let guild = Message::new("m2", "&ping", author, Channel::guild("11", "99"));

        assert!(!dm.in_guild());
        assert_eq!(dm.guild_id(), None);
        assert!(guild.in_guild());
        assert_eq!(guild.guild_id(), Some("99"));
    }

    #[test]
    fn member_deserializes_with_defaults() {
        let member: Member = serde_json::from_str(
            r#"{"user": {"id": "1", "name": "alice"}, "guild_id": "99"}"#,
        )
        .unwrap();
        assert!(!member.user.bot);
        assert!(member.nick.is_none());
        assert!(member.roles.is_empty());
    }
}
