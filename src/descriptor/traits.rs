//! Pluggable collaborator traits: preconditions, middleware, type readers,
//! and command bodies.
//!
//! All four are object-safe (`async_trait`) and stored as `Arc<dyn _>` in the
//! registry. The `*Fn` adapters wrap plain closures for the common case where
//! no `.await` is needed.

use super::command::Command;
use super::value::{ArgValue, Arguments};
use crate::directory::Directory;
use crate::error::ReaderError;
use crate::handler::Dispatcher;
use crate::message::Message;
use async_trait::async_trait;
use std::future::Future;
use std::marker::PhantomData;

/// A named boolean gate evaluated before a command runs.
#[async_trait]
pub trait Precondition: Send + Sync {
    fn name(&self) -> &str;

    /// `Ok(false)` stops the dispatch with `Outcome::PreconditionFailed`.
    /// `Err` is a fault and surfaces to the host as a `DispatchError`.
    async fn check(&self, message: &Message, command: &Command) -> anyhow::Result<bool>;
}

/// A named transform applied to the message after preconditions pass.
#[async_trait]
pub trait Middleware: Send + Sync {
    fn name(&self) -> &str;

    /// Return the message to pass on: the same one mutated, or a replacement.
    async fn run(&self, message: Message, command: &Command) -> anyhow::Result<Message>;
}

/// Everything a type reader may consult besides the token itself.
pub struct ReadContext<'a> {
    pub message: &'a Message,
    pub options: &'a serde_json::Value,
    pub command: &'a Command,
    pub dispatcher: &'a Dispatcher,
}

impl ReadContext<'_> {
    /// The host directory, for entity lookups.
    pub fn directory(&self) -> &dyn Directory {
        self.dispatcher.directory()
    }
}

/// A named parser converting one token into an [`ArgValue`].
#[async_trait]
pub trait TypeReader: Send + Sync {
    fn name(&self) -> &str;

    /// Parse `token`. Tokens past the end of the input are presented as `""`.
    async fn read(&self, token: &str, ctx: &ReadContext<'_>) -> Result<ArgValue, ReaderError>;
}

/// The body of a command.
#[async_trait]
pub trait CommandBody: Send + Sync {
    async fn run(
        &self,
        message: &Message,
        command: &Command,
        args: &Arguments,
    ) -> anyhow::Result<()>;
}

/// A body that does nothing. Useful for commands handled entirely by
/// middleware, and in tests.
pub struct NoopBody;

#[async_trait]
impl CommandBody for NoopBody {
    async fn run(&self, _: &Message, _: &Command, _: &Arguments) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Body built from an async closure over owned clones of the message and
/// arguments.
pub struct FnBody<F, Fut> {
    f: F,
    _fut: PhantomData<fn() -> Fut>,
}

impl<F, Fut> FnBody<F, Fut>
where
    F: Fn(Message, Arguments) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _fut: PhantomData,
        }
    }
}

#[async_trait]
impl<F, Fut> CommandBody for FnBody<F, Fut>
where
    F: Fn(Message, Arguments) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    async fn run(&self, message: &Message, _: &Command, args: &Arguments) -> anyhow::Result<()> {
        (self.f)(message.clone(), args.clone()).await
    }
}

/// Precondition from a synchronous predicate.
pub struct PreconditionFn<F> {
    name: String,
    f: F,
}

impl<F> PreconditionFn<F>
where
    F: Fn(&Message, &Command) -> bool + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

#[async_trait]
impl<F> Precondition for PreconditionFn<F>
where
    F: Fn(&Message, &Command) -> bool + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self, message: &Message, command: &Command) -> anyhow::Result<bool> {
        Ok((self.f)(message, command))
    }
}

/// Middleware from a synchronous transform.
pub struct MiddlewareFn<F> {
    name: String,
    f: F,
}

impl<F> MiddlewareFn<F>
where
    F: Fn(Message, &Command) -> Message + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

#[async_trait]
impl<F> Middleware for MiddlewareFn<F>
where
    F: Fn(Message, &Command) -> Message + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, message: Message, command: &Command) -> anyhow::Result<Message> {
        Ok((self.f)(message, command))
    }
}

/// Type reader from a synchronous parse function over the token alone.
pub struct TypeReaderFn<F> {
    name: String,
    f: F,
}

impl<F> TypeReaderFn<F>
where
    F: Fn(&str) -> Result<ArgValue, ReaderError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

#[async_trait]
impl<F> TypeReader for TypeReaderFn<F>
where
    F: Fn(&str) -> Result<ArgValue, ReaderError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn read(&self, token: &str, _: &ReadContext<'_>) -> Result<ArgValue, ReaderError> {
        (self.f)(token)
    }
}
