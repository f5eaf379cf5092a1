//! Dispatch outcomes.

use super::arguments::ArgumentFailure;
use crate::descriptor::Command;
use std::sync::Arc;
use std::time::Duration;

/// Terminal result of dispatching one message.
///
/// Every variant except `Success` names the stage that stopped the dispatch.
/// None of them is an error in the `Result` sense; collaborator faults are
/// reported separately as `DispatchError`.
#[derive(Debug)]
pub enum Outcome {
    /// The message does not start with the prefix for its origin.
    NoPrefixMatch,
    UnknownCommand {
        prefix: String,
    },
    OnCooldown {
        command: Arc<Command>,
        prefix: String,
        remaining: Duration,
    },
    MissingPermissions {
        command: Arc<Command>,
        prefix: String,
        missing: Vec<String>,
    },
    PreconditionFailed {
        command: Arc<Command>,
        prefix: String,
        precondition: String,
    },
    ArgumentError {
        command: Arc<Command>,
        prefix: String,
        argument: String,
        cause: ArgumentFailure,
    },
    /// The command body returned an error or panicked.
    ExecutionFailed {
        command: Arc<Command>,
        prefix: String,
        cause: anyhow::Error,
    },
    Success {
        command: Arc<Command>,
        prefix: String,
    },
}

impl Outcome {
    /// Get a static label for metrics and logs.
    #[inline]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoPrefixMatch => "no_prefix",
            Self::UnknownCommand { .. } => "unknown_command",
            Self::OnCooldown { .. } => "cooldown",
            Self::MissingPermissions { .. } => "missing_permissions",
            Self::PreconditionFailed { .. } => "precondition",
            Self::ArgumentError { .. } => "argument",
            Self::ExecutionFailed { .. } => "exception",
            Self::Success { .. } => "success",
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The matched command, for every outcome past command matching.
    pub fn command(&self) -> Option<&Arc<Command>> {
        match self {
            Self::NoPrefixMatch | Self::UnknownCommand { .. } => None,
            Self::OnCooldown { command, .. }
            | Self::MissingPermissions { command, .. }
            | Self::PreconditionFailed { command, .. }
            | Self::ArgumentError { command, .. }
            | Self::ExecutionFailed { command, .. }
            | Self::Success { command, .. } => Some(command),
        }
    }

    /// The resolved prefix, for every outcome past prefix matching.
    pub fn prefix(&self) -> Option<&str> {
        match self {
            Self::NoPrefixMatch => None,
            Self::UnknownCommand { prefix }
            | Self::OnCooldown { prefix, .. }
            | Self::MissingPermissions { prefix, .. }
            | Self::PreconditionFailed { prefix, .. }
            | Self::ArgumentError { prefix, .. }
            | Self::ExecutionFailed { prefix, .. }
            | Self::Success { prefix, .. } => Some(prefix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_follow_the_stage_reached() {
        let command = Arc::new(Command::builder("ping").build().unwrap());

        let none = Outcome::NoPrefixMatch;
        assert_eq!(none.kind(), "no_prefix");
        assert!(none.prefix().is_none());
        assert!(none.command().is_none());

        let unknown = Outcome::UnknownCommand { prefix: "&".into() };
        assert_eq!(unknown.prefix(), Some("&"));
        assert!(unknown.command().is_none());

        let ok = Outcome::Success {
            command: command.clone(),
            prefix: "&".into(),
        };
        assert!(ok.is_success());
        assert_eq!(ok.command().map(|c| c.name()), Some("ping"));
    }
}
