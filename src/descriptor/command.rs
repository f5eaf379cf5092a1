//! Command descriptors.

use super::argument::Argument;
use super::traits::{CommandBody, NoopBody};
use crate::error::DescriptorError;
use std::fmt;
use std::sync::Arc;

/// A registered command. Immutable once built.
#[derive(Clone)]
pub struct Command {
    names: Vec<String>,
    guild_only: bool,
    permissions: Vec<String>,
    preconditions: Vec<String>,
    middleware: Vec<String>,
    arguments: Vec<Argument>,
    body: Arc<dyn CommandBody>,
}

impl Command {
    /// Start building a command whose canonical name is `name`.
    pub fn builder(name: impl Into<String>) -> CommandBuilder {
        CommandBuilder {
            names: vec![name.into()],
            guild_only: false,
            permissions: Vec::new(),
            preconditions: Vec::new(),
            middleware: Vec::new(),
            arguments: Vec::new(),
            body: Arc::new(NoopBody),
        }
    }

    /// Canonical (first) name.
    pub fn name(&self) -> &str {
        &self.names[0]
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_guild_only(&self) -> bool {
        self.guild_only
    }

    /// Permissions the acting agent needs in the invoking channel.
    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }

    pub fn preconditions(&self) -> &[String] {
        &self.preconditions
    }

    pub fn middleware(&self) -> &[String] {
        &self.middleware
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn body(&self) -> &Arc<dyn CommandBody> {
        &self.body
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("names", &self.names)
            .field("guild_only", &self.guild_only)
            .field("permissions", &self.permissions)
            .field("preconditions", &self.preconditions)
            .field("middleware", &self.middleware)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Command`]. Shape is validated in [`CommandBuilder::build`];
/// references to preconditions, middleware, and type readers are validated
/// when the command is registered.
pub struct CommandBuilder {
    names: Vec<String>,
    guild_only: bool,
    permissions: Vec<String>,
    preconditions: Vec<String>,
    middleware: Vec<String>,
    arguments: Vec<Argument>,
    body: Arc<dyn CommandBody>,
}

impl CommandBuilder {
    /// Add an alias. Aliases may contain spaces (`"ping pong"`); multi-word
    /// names outrank shorter ones when matching.
    pub fn alias(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    pub fn guild_only(mut self) -> Self {
        self.guild_only = true;
        self
    }

    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.push(permission.into());
        self
    }

    /// Preconditions run in the order they are added.
    pub fn precondition(mut self, name: impl Into<String>) -> Self {
        self.preconditions.push(name.into());
        self
    }

    /// Middleware runs in the order it is added.
    pub fn middleware(mut self, name: impl Into<String>) -> Self {
        self.middleware.push(name.into());
        self
    }

    /// Arguments are parsed positionally, in the order they are added.
    pub fn argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn body(mut self, body: impl CommandBody + 'static) -> Self {
        self.body = Arc::new(body);
        self
    }

    pub fn build(self) -> Result<Command, DescriptorError> {
        let Some(canonical) = self.names.first() else {
            return Err(DescriptorError::NoNames);
        };

        let all_names = self
            .names
            .iter()
            .chain(&self.permissions)
            .chain(&self.preconditions)
            .chain(&self.middleware);
        for name in all_names {
            if name.trim().is_empty() {
                return Err(DescriptorError::EmptyName);
            }
        }

        for (i, name) in self.names.iter().enumerate() {
            if self.names[..i].contains(name) {
                return Err(DescriptorError::DuplicateAlias {
                    command: canonical.clone(),
                    name: name.clone(),
                });
            }
        }

        Ok(Command {
            names: self.names,
            guild_only: self.guild_only,
            permissions: self.permissions,
            preconditions: self.preconditions,
            middleware: self.middleware,
            arguments: self.arguments,
            body: self.body,
        })
    }
}
