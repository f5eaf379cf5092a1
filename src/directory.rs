//! Host-facing lookups for users, members, roles, channels, and permissions.
//!
//! The dispatcher never talks to a chat platform directly. Entity readers and
//! the permission guard go through a [`Directory`], which the host implements
//! over whatever backing store it has (a gateway cache, a REST client, ...).
//! [`MemoryDirectory`] is a `DashMap`-backed implementation for hosts that
//! keep everything in process, and for tests.

use crate::message::{Channel, Member, Role, User};
use crate::dashmap_ext::DashMapExt;
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashSet;

/// Lookups the dispatcher needs from the host.
///
/// All lookups are fallible. `Ok(None)` means "no such entity" and is a normal
/// parse failure for the reader that asked; `Err` means the backing store is
/// broken and aborts the dispatch. Failed lookups are not retried.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Id of the acting agent (the bot itself). Permission checks are made
    /// against this id.
    fn self_id(&self) -> &str;

    async fn user(&self, user_id: &str) -> anyhow::Result<Option<User>>;

    async fn member(&self, guild_id: &str, member_id: &str) -> anyhow::Result<Option<Member>>;

    async fn role(&self, guild_id: &str, role_id: &str) -> anyhow::Result<Option<Role>>;

    async fn channel(&self, guild_id: &str, channel_id: &str) -> anyhow::Result<Option<Channel>>;

    /// Permission identifiers `actor_id` holds in `channel`.
    async fn permissions_of(
        &self,
        channel: &Channel,
        actor_id: &str,
    ) -> anyhow::Result<HashSet<String>>;
}

/// In-process directory backed by `DashMap`s.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    self_id: String,
    users: DashMap<String, User>,
    /// Keyed by (guild id, member id).
    members: DashMap<(String, String), Member>,
    /// Keyed by (guild id, role id).
    roles: DashMap<(String, String), Role>,
    /// Keyed by (guild id, channel id).
    channels: DashMap<(String, String), Channel>,
    /// Keyed by (channel id, actor id).
    grants: DashMap<(String, String), HashSet<String>>,
}

impl MemoryDirectory {
    pub fn new(self_id: impl Into<String>) -> Self {
        Self {
            self_id: self_id.into(),
            ..Self::default()
        }
    }

    pub fn insert_user(&self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    /// Insert a member; the member's user is made visible to `user` lookups too.
    pub fn insert_member(&self, member: Member) {
        self.users
            .entry(member.user.id.clone())
            .or_insert_with(|| member.user.clone());
        self.members
            .insert((member.guild_id.clone(), member.user.id.clone()), member);
    }

    pub fn insert_role(&self, role: Role) {
        self.roles
            .insert((role.guild_id.clone(), role.id.clone()), role);
    }

    /// Insert a guild channel. Channels without a guild id are ignored.
    pub fn insert_channel(&self, channel: Channel) {
        if let Some(guild_id) = channel.guild_id.clone() {
            self.channels.insert((guild_id, channel.id.clone()), channel);
        }
    }

    /// Grant `permissions` to `actor_id` in `channel_id`, adding to any
    /// existing grant.
    pub fn grant<I, S>(&self, channel_id: &str, actor_id: &str, permissions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.grants
            .entry((channel_id.to_string(), actor_id.to_string()))
            .or_default()
            .extend(permissions.into_iter().map(Into::into));
    }

    /// Remove every permission `actor_id` holds in `channel_id`.
    pub fn revoke_all(&self, channel_id: &str, actor_id: &str) {
        self.grants
            .remove(&(channel_id.to_string(), actor_id.to_string()));
    }
}

#[async_trait]
impl Directory for MemoryDirectory {
    fn self_id(&self) -> &str {
        &self.self_id
    }

    async fn user(&self, user_id: &str) -> anyhow::Result<Option<User>> {
        Ok(self.users.get_cloned(user_id))
    }

    async fn member(&self, guild_id: &str, member_id: &str) -> anyhow::Result<Option<Member>> {
        Ok(self
            .members
            .get_cloned(&(guild_id.to_string(), member_id.to_string())))
    }

    async fn role(&self, guild_id: &str, role_id: &str) -> anyhow::Result<Option<Role>> {
        Ok(self
            .roles
            .get_cloned(&(guild_id.to_string(), role_id.to_string())))
    }

    async fn channel(&self, guild_id: &str, channel_id: &str) -> anyhow::Result<Option<Channel>> {
        Ok(self
            .channels
            .get_cloned(&(guild_id.to_string(), channel_id.to_string())))
    }

    async fn permissions_of(
        &self,
        channel: &Channel,
        actor_id: &str,
    ) -> anyhow::Result<HashSet<String>> {
        Ok(self
            .grants
            .get_cloned(&(channel.id.clone(), actor_id.to_string()))
            .unwrap_or_default())
    }
}
