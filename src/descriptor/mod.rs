//! Descriptor model.
//!
//! Commands and arguments are plain values built through validating builders;
//! preconditions, middleware, type readers, and command bodies are traits the
//! host implements. Descriptors are immutable once registered.

pub mod argument;
pub mod command;
pub mod traits;
pub mod value;

pub use argument::{Argument, ArgumentBuilder};
pub use command::{Command, CommandBuilder};
pub use traits::{
    CommandBody, FnBody, Middleware, MiddlewareFn, NoopBody, Precondition, PreconditionFn,
    ReadContext, TypeReader, TypeReaderFn,
};
pub use value::{ArgValue, Arguments};
