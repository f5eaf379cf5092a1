//! Unified error handling for slcmd.
//!
//! Errors fall into three classes:
//! - construction/registration errors ([`DescriptorError`], [`RegistryError`]),
//!   returned synchronously while the handler is being set up;
//! - type reader failures ([`ReaderError`]), which the argument parser turns
//!   into an `Outcome::ArgumentError` unless they are faults;
//! - collaborator faults ([`DispatchError`]), which abort a dispatch and
//!   surface to the host.
//!
//! Dispatch outcomes (cooldown, missing permissions, ...) are not errors at
//! all; see [`crate::handler::Outcome`].

use thiserror::Error;

// ============================================================================
// Descriptor Errors (builder validation)
// ============================================================================

/// A descriptor that does not satisfy its contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("command must have at least one name")]
    NoNames,

    #[error("names must be non-empty strings")]
    EmptyName,

    #[error("command {command} declares the name {name} twice")]
    DuplicateAlias { command: String, name: String },

    #[error("argument {argument} must reference at least one type reader")]
    NoTypeReaders { argument: String },

    #[error("argument {argument} is repeatable but max_repeats is {max_repeats}")]
    InvalidMaxRepeats { argument: String, max_repeats: usize },
}

impl DescriptorError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoNames => "no_names",
            Self::EmptyName => "empty_name",
            Self::DuplicateAlias { .. } => "duplicate_alias",
            Self::NoTypeReaders { .. } => "no_type_readers",
            Self::InvalidMaxRepeats { .. } => "invalid_max_repeats",
        }
    }
}

// ============================================================================
// Registry Errors (registration)
// ============================================================================

/// Registration failures. A batch that fails leaves the registry unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error("command {command} - name {name} already exists")]
    DuplicateCommandName { command: String, name: String },

    #[error("command {command} already has an argument named {argument}")]
    DuplicateArgument { command: String, argument: String },

    #[error("command {command} - unknown precondition {precondition}")]
    UnknownPrecondition { command: String, precondition: String },

    #[error("command {command} - unknown middleware {middleware}")]
    UnknownMiddleware { command: String, middleware: String },

    #[error("command {command}, argument {argument} references unknown type reader {type_reader}")]
    UnknownTypeReader {
        command: String,
        argument: String,
        type_reader: String,
    },

    #[error("precondition {0} already exists")]
    DuplicatePrecondition(String),

    #[error("middleware {0} already exists")]
    DuplicateMiddleware(String),

    #[error("type reader {0} already exists")]
    DuplicateTypeReader(String),

    #[error("guild prefix must be a non-empty string")]
    EmptyPrefix,
}

impl RegistryError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Descriptor(_) => "invalid_descriptor",
            Self::DuplicateCommandName { .. } => "duplicate_command_name",
            Self::DuplicateArgument { .. } => "duplicate_argument",
            Self::UnknownPrecondition { .. } => "unknown_precondition",
            Self::UnknownMiddleware { .. } => "unknown_middleware",
            Self::UnknownTypeReader { .. } => "unknown_type_reader",
            Self::DuplicatePrecondition(_) => "duplicate_precondition",
            Self::DuplicateMiddleware(_) => "duplicate_middleware",
            Self::DuplicateTypeReader(_) => "duplicate_type_reader",
            Self::EmptyPrefix => "empty_prefix",
        }
    }
}

// ============================================================================
// Reader Errors (type readers)
// ============================================================================

/// Why a type reader could not produce a value from a token.
///
/// Every variant except [`ReaderError::Fault`] means "this token is not mine"
/// and lets the argument parser fall through to the next reader. `Fault` is
/// reserved for broken collaborators (a failed directory lookup, bad reader
/// options) and aborts the whole dispatch.
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("no input")]
    NoInput,

    #[error("invalid input: {0}")]
    Invalid(String),

    #[error("{0} reader only works in guild channels")]
    GuildOnly(&'static str),

    #[error("invalid id")]
    UnknownId,

    #[error("invalid mention")]
    InvalidMention,

    #[error("reader fault: {0}")]
    Fault(#[source] anyhow::Error),
}

impl ReaderError {
    /// Shorthand for [`ReaderError::Invalid`].
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid(reason.into())
    }

    #[inline]
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::Fault(_))
    }

    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoInput => "no_input",
            Self::Invalid(_) => "invalid_input",
            Self::GuildOnly(_) => "guild_only",
            Self::UnknownId => "unknown_id",
            Self::InvalidMention => "invalid_mention",
            Self::Fault(_) => "fault",
        }
    }
}

// ============================================================================
// Dispatch Errors (collaborator faults)
// ============================================================================

/// A collaborator failed while a message was being dispatched.
///
/// Command body failures are never reported here; they become
/// `Outcome::ExecutionFailed`.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("permission query failed: {0}")]
    Permissions(#[source] anyhow::Error),

    #[error("precondition {name} failed: {source}")]
    Precondition {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("middleware {name} failed: {source}")]
    Middleware {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("type reader {name} failed: {source}")]
    TypeReader {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// A name that passed registration is missing at dispatch time.
    #[error("{kind} {name} is not registered")]
    Unregistered { kind: &'static str, name: String },
}

impl DispatchError {
    /// Get a static stage label for metrics.
    #[inline]
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Permissions(_) => "permissions",
            Self::Precondition { .. } => "precondition",
            Self::Middleware { .. } => "middleware",
            Self::TypeReader { .. } => "type_reader",
            Self::Unregistered { .. } => "registry",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_error_messages_name_the_command() {
        let err = RegistryError::UnknownPrecondition {
            command: "ban".into(),
            precondition: "is_admin".into(),
        };
        assert_eq!(err.to_string(), "command ban - unknown precondition is_admin");
        assert_eq!(err.error_code(), "unknown_precondition");
    }

    #[test]
    fn descriptor_errors_convert_into_registry_errors() {
        let err: RegistryError = DescriptorError::EmptyName.into();
        assert_eq!(err.error_code(), "invalid_descriptor");
        assert_eq!(err.to_string(), "names must be non-empty strings");
    }

    #[test]
    fn only_fault_is_a_fault() {
        assert!(ReaderError::Fault(anyhow::anyhow!("db down")).is_fault());
        assert!(!ReaderError::NoInput.is_fault());
        assert!(!ReaderError::invalid("nope").is_fault());
    }

    #[test]
    fn dispatch_error_stage_labels() {
        let err = DispatchError::Middleware {
            name: "log".into(),
            source: anyhow::anyhow!("boom"),
        };
        assert_eq!(err.stage(), "middleware");
        assert_eq!(err.to_string(), "middleware log failed: boom");
    }
}
