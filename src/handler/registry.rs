//! Descriptor registry.
//!
//! The `Registry` holds every command, precondition, middleware, and type
//! reader the dispatcher knows about. Registration is batch-atomic: each
//! `register_*` call validates the whole batch first and only then admits it,
//! so a rejected batch leaves the registry exactly as it was.
//!
//! Registration takes `&mut self`; once the owning dispatcher is shared for
//! dispatch, the registry is read-only.

use crate::descriptor::{Command, Middleware, Precondition, TypeReader};
use crate::error::{DescriptorError, RegistryError};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::info;

/// Registry of commands and the named collaborators they reference.
#[derive(Default)]
pub struct Registry {
    /// Commands in registration order. Order breaks matching ties.
    commands: Vec<Arc<Command>>,
    /// Every command name (canonical and aliases) to its index in `commands`.
    names: HashMap<String, usize>,
    preconditions: HashMap<String, Arc<dyn Precondition>>,
    middleware: HashMap<String, Arc<dyn Middleware>>,
    type_readers: HashMap<String, Arc<dyn TypeReader>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one command or a batch.
    pub fn register_commands<I>(&mut self, commands: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = Command>,
    {
        let batch: Vec<Command> = commands.into_iter().collect();
        let mut batch_names: HashSet<&str> = HashSet::new();

        for command in &batch {
            for precondition in command.preconditions() {
                if !self.preconditions.contains_key(precondition) {
                    return Err(RegistryError::UnknownPrecondition {
                        command: command.name().to_string(),
                        precondition: precondition.clone(),
                    });
                }
            }

            for middleware in command.middleware() {
                if !self.middleware.contains_key(middleware) {
                    return Err(RegistryError::UnknownMiddleware {
                        command: command.name().to_string(),
                        middleware: middleware.clone(),
                    });
                }
            }

            let mut argument_names: HashSet<&str> = HashSet::new();
            for argument in command.arguments() {
                if !argument_names.insert(argument.name()) {
                    return Err(RegistryError::DuplicateArgument {
                        command: command.name().to_string(),
                        argument: argument.name().to_string(),
                    });
                }
                if let Some(missing) = argument
                    .type_readers()
                    .iter()
                    .find(|name| !self.type_readers.contains_key(name.as_str()))
                {
                    return Err(RegistryError::UnknownTypeReader {
                        command: command.name().to_string(),
                        argument: argument.name().to_string(),
                        type_reader: missing.clone(),
                    });
                }
            }

            for name in command.names() {
                if self.names.contains_key(name) || !batch_names.insert(name) {
                    return Err(RegistryError::DuplicateCommandName {
                        command: command.name().to_string(),
                        name: name.clone(),
                    });
                }
            }
        }

        let count = batch.len();
        for command in batch {
            let index = self.commands.len();
            for name in command.names() {
                self.names.insert(name.clone(), index);
            }
            self.commands.push(Arc::new(command));
        }

        info!(count, total = self.commands.len(), "Registered commands");
        Ok(())
    }

    /// Register one precondition or a batch.
    pub fn register_preconditions<I>(&mut self, preconditions: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = Arc<dyn Precondition>>,
    {
        let batch = validate_named(
            preconditions,
            |p| p.name().to_string(),
            &self.preconditions,
            RegistryError::DuplicatePrecondition,
        )?;
        info!(count = batch.len(), "Registered preconditions");
        self.preconditions.extend(batch);
        Ok(())
    }

    /// Register one middleware or a batch.
    pub fn register_middleware<I>(&mut self, middleware: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = Arc<dyn Middleware>>,
    {
        let batch = validate_named(
            middleware,
            |m| m.name().to_string(),
            &self.middleware,
            RegistryError::DuplicateMiddleware,
        )?;
        info!(count = batch.len(), "Registered middleware");
        self.middleware.extend(batch);
        Ok(())
    }

    /// Register one type reader or a batch.
    pub fn register_type_readers<I>(&mut self, type_readers: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = Arc<dyn TypeReader>>,
    {
        let batch = validate_named(
            type_readers,
            |r| r.name().to_string(),
            &self.type_readers,
            RegistryError::DuplicateTypeReader,
        )?;
        info!(count = batch.len(), "Registered type readers");
        self.type_readers.extend(batch);
        Ok(())
    }

    /// Commands in registration order.
    pub fn commands(&self) -> &[Arc<Command>] {
        &self.commands
    }

    /// Look up a command by any of its names (exact match).
    pub fn command(&self, name: &str) -> Option<&Arc<Command>> {
        self.names.get(name).map(|&i| &self.commands[i])
    }

    pub fn precondition(&self, name: &str) -> Option<&Arc<dyn Precondition>> {
        self.preconditions.get(name)
    }

    pub fn middleware(&self, name: &str) -> Option<&Arc<dyn Middleware>> {
        self.middleware.get(name)
    }

    pub fn type_reader(&self, name: &str) -> Option<&Arc<dyn TypeReader>> {
        self.type_readers.get(name)
    }

    /// Names of all registered type readers, sorted.
    pub fn type_reader_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.type_readers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Check a batch of named collaborators for empty names and for duplicates
/// within the batch or against `existing`.
fn validate_named<T, I>(
    items: I,
    name_of: impl Fn(&T) -> String,
    existing: &HashMap<String, T>,
    duplicate: fn(String) -> RegistryError,
) -> Result<Vec<(String, T)>, RegistryError>
where
    I: IntoIterator<Item = T>,
{
    let mut batch: Vec<(String, T)> = Vec::new();
    for item in items {
        let name = name_of(&item);
        if name.is_empty() {
            return Err(DescriptorError::EmptyName.into());
        }
        if existing.contains_key(&name) || batch.iter().any(|(n, _)| *n == name) {
            return Err(duplicate(name));
        }
        batch.push((name, item));
    }
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{
        ArgValue, Argument, MiddlewareFn, PreconditionFn, TypeReaderFn,
    };

    fn text_reader(name: &str) -> Arc<dyn TypeReader> {
        Arc::new(TypeReaderFn::new(name, |t: &str| Ok(ArgValue::from(t))))
    }

    fn allow(name: &str) -> Arc<dyn Precondition> {
        Arc::new(PreconditionFn::new(name, |_, _| true))
    }

    #[test]
    fn command_names_must_be_disjoint() {
        let mut reg = Registry::new();
        reg.register_commands([Command::builder("ping").alias("p").build().unwrap()])
            .unwrap();

        let err = reg
            .register_commands([Command::builder("pong").alias("p").build().unwrap()])
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateCommandName {
                command: "pong".into(),
                name: "p".into()
            }
        );
        assert_eq!(reg.commands().len(), 1);
        assert!(reg.command("pong").is_none());
    }

    #[test]
    fn command_names_are_case_sensitive() {
        let mut reg = Registry::new();
        reg.register_commands([Command::builder("ping").build().unwrap()])
            .unwrap();
        reg.register_commands([Command::builder("Ping").build().unwrap()])
            .unwrap();
        assert_eq!(reg.commands().len(), 2);
    }

    #[test]
    fn collision_inside_batch_rejects_whole_batch() {
        let mut reg = Registry::new();
        let err = reg
            .register_commands([
                Command::builder("a").build().unwrap(),
                Command::builder("b").alias("a").build().unwrap(),
            ])
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateCommandName { .. }));
        assert!(reg.commands().is_empty());
        assert!(reg.command("a").is_none());
    }

    #[test]
    fn dangling_references_are_rejected() {
        let mut reg = Registry::new();
        let cmd = Command::builder("ban")
            .precondition("is_admin")
            .build()
            .unwrap();
        assert!(matches!(
            reg.register_commands([cmd]).unwrap_err(),
            RegistryError::UnknownPrecondition { .. }
        ));

        let cmd = Command::builder("ban").middleware("audit").build().unwrap();
        assert!(matches!(
            reg.register_commands([cmd]).unwrap_err(),
            RegistryError::UnknownMiddleware { .. }
        ));

        reg.register_type_readers([text_reader("String")]).unwrap();
        let cmd = Command::builder("ban")
            .argument(
                Argument::builder("target", "String")
                    .or_reader("Member")
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        assert_eq!(
            reg.register_commands([cmd]).unwrap_err(),
            RegistryError::UnknownTypeReader {
                command: "ban".into(),
                argument: "target".into(),
                type_reader: "Member".into()
            }
        );
        assert!(reg.commands().is_empty());
    }

    #[test]
    fn duplicate_argument_names_are_rejected() {
        let mut reg = Registry::new();
        reg.register_type_readers([text_reader("String")]).unwrap();
        let cmd = Command::builder("say")
            .argument(Argument::builder("text", "String").build().unwrap())
            .argument(Argument::builder("text", "String").build().unwrap())
            .build()
            .unwrap();
        assert_eq!(
            reg.register_commands([cmd]).unwrap_err(),
            RegistryError::DuplicateArgument {
                command: "say".into(),
                argument: "text".into()
            }
        );
    }

    #[test]
    fn collaborator_names_are_unique() {
        let mut reg = Registry::new();
        reg.register_preconditions([allow("owner")]).unwrap();
        assert_eq!(
            reg.register_preconditions([allow("owner")]).unwrap_err(),
            RegistryError::DuplicatePrecondition("owner".into())
        );
        assert_eq!(
            reg.register_preconditions([allow("a"), allow("a")])
                .unwrap_err(),
            RegistryError::DuplicatePrecondition("a".into())
        );
        assert!(reg.precondition("a").is_none());

        let mw: Arc<dyn Middleware> = Arc::new(MiddlewareFn::new("trim", |m, _| m));
        reg.register_middleware([mw.clone()]).unwrap();
        assert_eq!(
            reg.register_middleware([mw]).unwrap_err(),
            RegistryError::DuplicateMiddleware("trim".into())
        );

        reg.register_type_readers([text_reader("String"), text_reader("Word")])
            .unwrap();
        assert_eq!(reg.type_reader_names(), ["String", "Word"]);
        assert_eq!(
            reg.register_type_readers([text_reader("Word")]).unwrap_err(),
            RegistryError::DuplicateTypeReader("Word".into())
        );
    }

    #[test]
    fn empty_collaborator_name_is_rejected() {
        let mut reg = Registry::new();
        assert_eq!(
            reg.register_preconditions([allow("")]).unwrap_err(),
            RegistryError::Descriptor(DescriptorError::EmptyName)
        );
    }
}
