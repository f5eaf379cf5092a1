//! Positional argument parsing.
//!
//! Arguments are consumed left to right with a single forward cursor over the
//! token sequence. Each argument tries its type reader chain against the token
//! under the cursor; success advances the cursor by one. There is no
//! backtracking: once an argument has settled, later arguments cannot make it
//! retry, and a consumed token is never handed back.

use super::Dispatcher;
use crate::descriptor::{ArgValue, Argument, Arguments, Command, ReadContext};
use crate::error::{DispatchError, ReaderError};
use crate::message::Message;
use std::fmt;
use tracing::debug;

/// Why an argument could not be parsed.
#[derive(Debug)]
pub enum ArgumentFailure {
    /// The argument has a single reader and it failed.
    Reader(ReaderError),
    /// Every reader in the chain failed, in chain order.
    NoReaderMatched(Vec<(String, ReaderError)>),
}

impl fmt::Display for ArgumentFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reader(err) => write!(f, "{err}"),
            Self::NoReaderMatched(errors) => {
                write!(f, "no type reader matched")?;
                for (i, (name, err)) in errors.iter().enumerate() {
                    let sep = if i == 0 { ": " } else { ", " };
                    write!(f, "{sep}{name} ({err})")?;
                }
                Ok(())
            }
        }
    }
}

/// Result of parsing a command's arguments.
#[derive(Debug)]
pub enum Parsed {
    Complete(Arguments),
    Rejected {
        argument: String,
        cause: ArgumentFailure,
    },
}

/// Parse `content` into the arguments `command` declares.
///
/// Reader faults ([`ReaderError::Fault`]) abort with a [`DispatchError`];
/// every other reader error is a parse failure handled by the
/// optional/required rules.
pub async fn parse_arguments(
    dispatcher: &Dispatcher,
    content: &str,
    message: &Message,
    command: &Command,
) -> Result<Parsed, DispatchError> {
    if command.arguments().is_empty() {
        return Ok(Parsed::Complete(Arguments::new()));
    }

    let tokens = dispatcher.tokenize(content);
    let mut cursor = 0;
    let mut args = Arguments::new();

    for argument in command.arguments() {
        if argument.is_repeatable() {
            let mut values = Vec::new();
            for attempt in 0..argument.max_repeats() {
                if attempt > 0 && cursor >= tokens.len() {
                    break;
                }
                let token = tokens.get(cursor).copied().unwrap_or("");
                match read_chain(dispatcher, argument, token, message, command).await? {
                    Ok(value) => {
                        values.push(value);
                        cursor += 1;
                    }
                    Err(cause) if attempt == 0 => {
                        if !argument.is_optional() {
                            return Ok(reject(command, argument, cause));
                        }
                        match argument.default_value() {
                            Some(ArgValue::List(items)) => values.extend(items.iter().cloned()),
                            Some(other) => values.push(other.clone()),
                            None => {}
                        }
                        break;
                    }
                    Err(_) => break,
                }
            }
            args.insert(argument.name(), ArgValue::List(values));
        } else {
            let token = tokens.get(cursor).copied().unwrap_or("");
            match read_chain(dispatcher, argument, token, message, command).await? {
                Ok(value) => {
                    args.insert(argument.name(), value);
                    cursor += 1;
                }
                Err(cause) => {
                    if !argument.is_optional() {
                        return Ok(reject(command, argument, cause));
                    }
                    if let Some(default) = argument.default_value() {
                        args.insert(argument.name(), default.clone());
                    }
                }
            }
        }
    }

    Ok(Parsed::Complete(args))
}

fn reject(command: &Command, argument: &Argument, cause: ArgumentFailure) -> Parsed {
    debug!(
        command = %command.name(),
        argument = %argument.name(),
        cause = %cause,
        "Argument rejected"
    );
    Parsed::Rejected {
        argument: argument.name().to_string(),
        cause,
    }
}

/// Try each reader of `argument` against `token`, first success wins.
async fn read_chain(
    dispatcher: &Dispatcher,
    argument: &Argument,
    token: &str,
    message: &Message,
    command: &Command,
) -> Result<Result<ArgValue, ArgumentFailure>, DispatchError> {
    let ctx = ReadContext {
        message,
        options: argument.type_reader_options(),
        command,
        dispatcher,
    };

    let mut errors = Vec::new();
    for name in argument.type_readers() {
        let reader = dispatcher
            .registry()
            .type_reader(name)
            .ok_or_else(|| DispatchError::Unregistered {
                kind: "type reader",
                name: name.clone(),
            })?;

        match reader.read(token, &ctx).await {
            Ok(value) => return Ok(Ok(value)),
            Err(ReaderError::Fault(source)) => {
                return Err(DispatchError::TypeReader {
                    name: name.clone(),
                    source,
                });
            }
            Err(err) => errors.push((name.clone(), err)),
        }
    }

    let failure = match <[(String, ReaderError); 1]>::try_from(errors) {
        Ok([(_, err)]) => ArgumentFailure::Reader(err),
        Err(errors) => ArgumentFailure::NoReaderMatched(errors),
    };
    Ok(Err(failure))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_display_lists_every_reader() {
        let failure = ArgumentFailure::NoReaderMatched(vec![
            ("Number".into(), ReaderError::invalid("not a number")),
            ("Boolean".into(), ReaderError::NoInput),
        ]);
        assert_eq!(
            failure.to_string(),
            "no type reader matched: Number (invalid input: not a number), Boolean (no input)"
        );
        assert_eq!(
            ArgumentFailure::Reader(ReaderError::NoInput).to_string(),
            "no input"
        );
    }
}
