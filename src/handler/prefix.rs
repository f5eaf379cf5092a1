//! Per-guild prefix overrides.

use crate::dashmap_ext::DashMapExt;
use crate::error::RegistryError;
use dashmap::DashMap;
use tracing::debug;

/// Resolves the command prefix for a message origin.
///
/// Overrides live in memory only and can change while dispatches are in
/// flight; a dispatch sees whichever prefix was current when it resolved.
#[derive(Debug)]
pub struct PrefixResolver {
    default: String,
    overrides: DashMap<String, String>,
}

impl PrefixResolver {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            overrides: DashMap::new(),
        }
    }

    pub fn default_prefix(&self) -> &str {
        &self.default
    }

    /// Set the prefix for `origin_id`. Setting it back to the default removes
    /// the override.
    pub fn register_guild_prefix(&self, origin_id: &str, prefix: &str) -> Result<(), RegistryError> {
        if prefix.is_empty() {
            return Err(RegistryError::EmptyPrefix);
        }
        if prefix == self.default {
            self.overrides.remove(origin_id);
            debug!(origin = %origin_id, "Guild prefix reset to default");
        } else {
            self.overrides
                .insert(origin_id.to_string(), prefix.to_string());
            debug!(origin = %origin_id, prefix = %prefix, "Guild prefix set");
        }
        Ok(())
    }

    pub fn deregister_guild_prefix(&self, origin_id: &str) {
        self.overrides.remove(origin_id);
    }

    /// Prefix in effect for `origin_id`. Messages without an origin (direct
    /// channels) always use the default.
    pub fn resolve(&self, origin_id: Option<&str>) -> String {
        origin_id
            .and_then(|id| self.overrides.get_cloned(id))
            .unwrap_or_else(|| self.default.clone())
    }

    /// Current overrides, sorted by origin id.
    pub fn overrides(&self) -> Vec<(String, String)> {
        self.overrides.snapshot()
    }
}
