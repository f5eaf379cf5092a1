//! slcmd - chat command dispatcher.
//!
//! Hosts register command descriptors with a [`Dispatcher`] and hand it every
//! inbound chat message. The dispatcher resolves the prefix for the message's
//! guild, matches a command, runs the guard chain (cooldown, permissions,
//! preconditions), threads the message through middleware, parses typed
//! arguments, and executes the command body, reporting exactly one
//! [`Outcome`] per message.
//!
//! Entity lookups (users, members, roles, channels, permissions) go through
//! the host's [`Directory`]; [`MemoryDirectory`] is an in-memory
//! implementation for tests and small bots.
//!
//! ```no_run
//! use slcmd::{Argument, Command, Dispatcher, FnBody, HandlerConfig, MemoryDirectory};
//! use std::sync::Arc;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let directory = Arc::new(MemoryDirectory::new("0"));
//! let mut dispatcher = Dispatcher::new(&HandlerConfig::new("!"), directory)?;
//! dispatcher.register_default_type_readers()?;
//! dispatcher.register_commands([Command::builder("echo")
//!     .argument(Argument::builder("words", "String").repeatable(usize::MAX).build()?)
//!     .body(FnBody::new(|_message, args| async move {
//!         println!("{:?}", args.list("words"));
//!         anyhow::Ok(())
//!     }))
//!     .build()?])?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dashmap_ext;
pub mod descriptor;
pub mod directory;
pub mod error;
pub mod handler;
pub mod message;
pub mod metrics;
pub mod readers;
pub mod telemetry;

pub use config::{Config, ConfigError, HandlerConfig, ValidationError};
pub use descriptor::{
    ArgValue, Argument, Arguments, Command, CommandBody, FnBody, Middleware, MiddlewareFn,
    NoopBody, Precondition, PreconditionFn, ReadContext, TypeReader, TypeReaderFn,
};
pub use directory::{Directory, MemoryDirectory};
pub use error::{DescriptorError, DispatchError, ReaderError, RegistryError};
pub use handler::{ArgumentFailure, Dispatcher, Outcome};
pub use message::{Channel, Member, Message, Role, User};
