//! Guard chain: cooldowns, permissions, and preconditions.

use super::registry::Registry;
use crate::descriptor::Command;
use crate::directory::Directory;
use crate::error::DispatchError;
use crate::message::Message;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Per-user cooldown tracker shared by every command of a dispatcher.
///
/// Expired entries are removed the next time they are checked, or in bulk by
/// [`Cooldowns::prune`]. `try_acquire` overwrites an expired entry in place,
/// so users who never return stay in the table until a prune.
#[derive(Debug)]
pub struct Cooldowns {
    window: Duration,
    last_use: DashMap<String, Instant>,
}

impl Cooldowns {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_use: DashMap::new(),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        !self.window.is_zero()
    }

    /// Whether `user_id` is still cooling down. Removes the entry if it has
    /// expired.
    pub fn check(&self, user_id: &str) -> bool {
        let window = self.window;
        self.last_use
            .remove_if(user_id, |_, last| last.elapsed() >= window);
        self.last_use.contains_key(user_id)
    }

    /// Record an invocation by `user_id` now.
    pub fn update(&self, user_id: &str) {
        self.last_use.insert(user_id.to_string(), Instant::now());
    }

    /// Atomically check and record an invocation.
    ///
    /// Returns the time left when `user_id` is still cooling down. The entry
    /// lock is held across the check and the write, so concurrent dispatches
    /// by one user cannot both pass.
    pub fn try_acquire(&self, user_id: &str) -> Result<(), Duration> {
        let now = Instant::now();
        match self.last_use.entry(user_id.to_string()) {
            Entry::Occupied(mut entry) => {
                let elapsed = now.saturating_duration_since(*entry.get());
                if elapsed < self.window {
                    return Err(self.window - elapsed);
                }
                entry.insert(now);
            }
            Entry::Vacant(entry) => {
                entry.insert(now);
            }
        }
        Ok(())
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn prune(&self) -> usize {
        let window = self.window;
        let before = self.last_use.len();
        self.last_use.retain(|_, last| last.elapsed() < window);
        let removed = before.saturating_sub(self.last_use.len());
        if removed > 0 {
            debug!(removed, remaining = self.last_use.len(), "Pruned expired cooldowns");
        }
        removed
    }

    /// Number of tracked users, expired entries included.
    pub fn len(&self) -> usize {
        self.last_use.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_use.is_empty()
    }
}

/// Permissions `command` requires that the acting agent lacks in the message's
/// channel, in declaration order. Always empty outside guild channels.
pub async fn missing_permissions(
    directory: &dyn Directory,
    message: &Message,
    command: &Command,
) -> Result<Vec<String>, DispatchError> {
    if command.permissions().is_empty() || !message.in_guild() {
        return Ok(Vec::new());
    }

    let held = directory
        .permissions_of(&message.channel, directory.self_id())
        .await
        .map_err(DispatchError::Permissions)?;

    Ok(command
        .permissions()
        .iter()
        .filter(|p| !held.contains(p.as_str()))
        .cloned()
        .collect())
}

/// Run the command's preconditions in order, stopping at the first that
/// returns false. Returns the name of the failing precondition.
pub async fn run_preconditions(
    registry: &Registry,
    message: &Message,
    command: &Command,
) -> Result<Option<String>, DispatchError> {
    for name in command.preconditions() {
        let precondition = registry
            .precondition(name)
            .ok_or_else(|| DispatchError::Unregistered {
                kind: "precondition",
                name: name.clone(),
            })?;

        let passed = precondition
            .check(message, command)
            .await
            .map_err(|source| DispatchError::Precondition {
                name: name.clone(),
                source,
            })?;

        if !passed {
            debug!(command = %command.name(), precondition = %name, "Precondition failed");
            return Ok(Some(name.clone()));
        }
    }
    Ok(None)
}
