//! Middleware pipeline.

use super::registry::Registry;
use crate::descriptor::Command;
use crate::error::DispatchError;
use crate::message::Message;
use tracing::trace;

/// Thread `message` through the command's middleware in declaration order.
///
/// Every middleware runs; there is no short-circuit. The message returned by
/// one middleware is the input of the next, and the final one is what the
/// argument parser and the command body see.
pub async fn run_middleware(
    registry: &Registry,
    mut message: Message,
    command: &Command,
) -> Result<Message, DispatchError> {
    for name in command.middleware() {
        let middleware = registry
            .middleware(name)
            .ok_or_else(|| DispatchError::Unregistered {
                kind: "middleware",
                name: name.clone(),
            })?;

        message = middleware
            .run(message, command)
            .await
            .map_err(|source| DispatchError::Middleware {
                name: name.clone(),
                source,
            })?;
        trace!(command = %command.name(), middleware = %name, "Middleware applied");
    }
    Ok(message)
}
