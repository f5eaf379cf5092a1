//! Message dispatch.
//!
//! The [`Dispatcher`] owns the registry, the prefix overrides, and the
//! cooldown table, and runs every message through the same fixed stages:
//!
//! 1. resolve the prefix for the message's origin
//! 2. match a command name
//! 3. check the author's cooldown
//! 4. check the acting agent's permissions (guild channels only)
//! 5. run preconditions (short-circuiting)
//! 6. run middleware (never short-circuiting)
//! 7. parse arguments
//! 8. execute the command body
//!
//! Each stage either passes or ends the dispatch with an [`Outcome`].
//! Registration needs `&mut Dispatcher`; dispatching needs only `&Dispatcher`,
//! so a fully registered dispatcher can be shared behind an `Arc`.

pub mod arguments;
pub mod guard;
pub mod matcher;
pub mod outcome;
pub mod pipeline;
pub mod prefix;
pub mod registry;

pub use arguments::{ArgumentFailure, Parsed};
pub use guard::Cooldowns;
pub use matcher::{Match, ParsedCommand};
pub use outcome::Outcome;
pub use prefix::PrefixResolver;
pub use registry::Registry;

use crate::config::{Config, ConfigError, HandlerConfig, ValidationError, validate};
use crate::descriptor::{Command, Middleware, Precondition, TypeReader};
use crate::directory::Directory;
use crate::error::{DispatchError, RegistryError};
use crate::message::Message;
use crate::telemetry::{CommandTimer, spans};
use futures_util::FutureExt;
use regex::Regex;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{Instrument, debug, warn};

/// Resolves, guards, parses, and executes commands.
pub struct Dispatcher {
    registry: Registry,
    prefixes: PrefixResolver,
    cooldowns: Cooldowns,
    argument_pattern: Regex,
    directory: Arc<dyn Directory>,
}

impl Dispatcher {
    /// Create a dispatcher with an empty registry.
    pub fn new(config: &HandlerConfig, directory: Arc<dyn Directory>) -> Result<Self, ConfigError> {
        if config.prefix.is_empty() {
            return Err(ConfigError::Invalid(vec![ValidationError::EmptyPrefix]));
        }
        let argument_pattern = Regex::new(&config.argument_pattern).map_err(|e| {
            ConfigError::Invalid(vec![ValidationError::InvalidArgumentPattern {
                pattern: config.argument_pattern.clone(),
                reason: e.to_string(),
            }])
        })?;

        Ok(Self {
            registry: Registry::new(),
            prefixes: PrefixResolver::new(config.prefix.clone()),
            cooldowns: Cooldowns::new(config.cooldown()),
            argument_pattern,
            directory,
        })
    }

    /// Create a dispatcher from a full configuration, validating it and
    /// applying its guild prefix table.
    pub fn from_config(config: &Config, directory: Arc<dyn Directory>) -> Result<Self, ConfigError> {
        validate(config).map_err(ConfigError::Invalid)?;
        let dispatcher = Self::new(&config.handler, directory)?;
        for (guild_id, prefix) in &config.guild_prefixes {
            dispatcher
                .prefixes
                .register_guild_prefix(guild_id, prefix)
                .map_err(|_| ConfigError::Invalid(vec![ValidationError::EmptyGuildPrefix(guild_id.clone())]))?;
        }
        Ok(dispatcher)
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    pub fn register_commands<I>(&mut self, commands: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = Command>,
    {
        self.registry.register_commands(commands)
    }

    pub fn register_preconditions<I>(&mut self, preconditions: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = Arc<dyn Precondition>>,
    {
        self.registry.register_preconditions(preconditions)
    }

    pub fn register_middleware<I>(&mut self, middleware: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = Arc<dyn Middleware>>,
    {
        self.registry.register_middleware(middleware)
    }

    pub fn register_type_readers<I>(&mut self, type_readers: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = Arc<dyn TypeReader>>,
    {
        self.registry.register_type_readers(type_readers)
    }

    /// Register the built-in readers (`String`, `Number`, `Boolean`, `Enum`,
    /// `User`, `Member`, `Role`, `Channel`).
    pub fn register_default_type_readers(&mut self) -> Result<(), RegistryError> {
        self.registry.register_type_readers(crate::readers::defaults())
    }

    // ------------------------------------------------------------------
    // Prefixes and cooldowns
    // ------------------------------------------------------------------

    pub fn register_guild_prefix(&self, guild_id: &str, prefix: &str) -> Result<(), RegistryError> {
        self.prefixes.register_guild_prefix(guild_id, prefix)
    }

    pub fn deregister_guild_prefix(&self, guild_id: &str) {
        self.prefixes.deregister_guild_prefix(guild_id);
    }

    pub fn resolve_prefix(&self, guild_id: Option<&str>) -> String {
        self.prefixes.resolve(guild_id)
    }

    /// Whether `user_id` is cooling down; prunes the entry if it expired.
    pub fn check_cooldown(&self, user_id: &str) -> bool {
        self.cooldowns.check(user_id)
    }

    pub fn update_cooldown(&self, user_id: &str) {
        self.cooldowns.update(user_id);
    }

    /// Drop expired cooldown entries. Hosts call this periodically; returns
    /// how many were removed.
    pub fn prune_cooldowns(&self) -> usize {
        self.cooldowns.prune()
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn prefixes(&self) -> &PrefixResolver {
        &self.prefixes
    }

    pub fn cooldowns(&self) -> &Cooldowns {
        &self.cooldowns
    }

    pub fn directory(&self) -> &dyn Directory {
        self.directory.as_ref()
    }

    /// Split argument content on the configured pattern.
    pub fn tokenize<'a>(&self, content: &'a str) -> Vec<&'a str> {
        self.argument_pattern.split(content).collect()
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    /// Resolve the prefix for `message` and match it against the registered
    /// commands.
    pub fn parse_command(&self, message: &Message) -> Match {
        let prefix = self.prefixes.resolve(message.guild_id());
        matcher::match_command(
            &message.content,
            &prefix,
            self.registry.commands(),
            message.in_guild(),
        )
    }

    /// Dispatch one message.
    ///
    /// Returns `Err` only when a collaborator (precondition, middleware, type
    /// reader, or the directory) fails. Errors and panics raised by the
    /// command body become [`Outcome::ExecutionFailed`].
    pub async fn dispatch(&self, message: Message) -> Result<Outcome, DispatchError> {
        let span = spans::dispatch(&message.id, &message.author.id, message.guild_id());
        let result = self.run_stages(message).instrument(span).await;

        match &result {
            Ok(outcome) => crate::metrics::record_outcome(outcome.kind()),
            Err(e) => {
                warn!(stage = e.stage(), error = %e, "Dispatch aborted by collaborator fault");
                crate::metrics::record_fault(e.stage());
            }
        }
        result
    }

    async fn run_stages(&self, message: Message) -> Result<Outcome, DispatchError> {
        let ParsedCommand {
            command,
            name_used,
            content,
            prefix,
        } = match self.parse_command(&message) {
            Match::NoPrefix => return Ok(Outcome::NoPrefixMatch),
            Match::NoCommand { prefix } => {
                debug!(prefix = %prefix, "Unknown command");
                return Ok(Outcome::UnknownCommand { prefix });
            }
            Match::Found(parsed) => parsed,
        };
        debug!(command = %command.name(), name_used = %name_used, "Command matched");

        if self.cooldowns.is_enabled()
            && let Err(remaining) = self.cooldowns.try_acquire(&message.author.id)
        {
            debug!(user = %message.author.id, ?remaining, "User on cooldown");
            return Ok(Outcome::OnCooldown {
                command,
                prefix,
                remaining,
            });
        }

        let missing = guard::missing_permissions(self.directory(), &message, &command).await?;
        if !missing.is_empty() {
            debug!(command = %command.name(), ?missing, "Missing permissions");
            return Ok(Outcome::MissingPermissions {
                command,
                prefix,
                missing,
            });
        }

        if let Some(precondition) = guard::run_preconditions(&self.registry, &message, &command).await? {
            return Ok(Outcome::PreconditionFailed {
                command,
                prefix,
                precondition,
            });
        }

        let mut message = pipeline::run_middleware(&self.registry, message, &command).await?;

        let args = match arguments::parse_arguments(self, &content, &message, &command).await? {
            Parsed::Complete(args) => args,
            Parsed::Rejected { argument, cause } => {
                return Ok(Outcome::ArgumentError {
                    command,
                    prefix,
                    argument,
                    cause,
                });
            }
        };

        message.prefix = Some(prefix.clone());

        let _timer = CommandTimer::new(command.name());
        let result = AssertUnwindSafe(command.body().run(&message, &command, &args))
            .catch_unwind()
            .await;

        match result {
            Ok(Ok(())) => Ok(Outcome::Success { command, prefix }),
            Ok(Err(cause)) => {
                warn!(command = %command.name(), error = %cause, "Command failed");
                Ok(Outcome::ExecutionFailed {
                    command,
                    prefix,
                    cause,
                })
            }
            Err(payload) => {
                let cause = anyhow::anyhow!("command panicked: {}", panic_message(payload.as_ref()));
                warn!(command = %command.name(), error = %cause, "Command panicked");
                Ok(Outcome::ExecutionFailed {
                    command,
                    prefix,
                    cause,
                })
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic payload"
    }
}
