//! Telemetry utilities for command timing and dispatch correlation.

use std::time::Instant;

/// Guard for timing command execution and recording metrics.
///
/// Records command latency when dropped, including when the body panics.
pub struct CommandTimer {
    command: String,
    start: Instant,
}

impl CommandTimer {
    /// Start timing a command.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for CommandTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        crate::metrics::record_command(&self.command, duration);
    }
}

/// Standardized span constructors.
pub mod spans {
    use tracing::{Level, Span, span};

    /// Create a span covering one dispatch.
    pub fn dispatch(message_id: &str, user_id: &str, guild_id: Option<&str>) -> Span {
        if let Some(guild_id) = guild_id {
            span!(Level::DEBUG, "command.dispatch", message = %message_id, user = %user_id, guild = %guild_id)
        } else {
            span!(Level::DEBUG, "command.dispatch", message = %message_id, user = %user_id)
        }
    }
}
