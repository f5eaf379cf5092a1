//! Integration tests for registration: batch atomicity, dangling references,
//! and name collisions.

mod common;

use common::{GUILD, dispatcher, guild_message};
use slcmd::{
    Argument, Command, DescriptorError, Middleware, MiddlewareFn, Outcome, Precondition, PreconditionFn,
    RegistryError,
};
use std::sync::Arc;

#[test]
fn test_rejected_batch_leaves_registry_unchanged() {
    let mut dispatcher = dispatcher();
    dispatcher
        .register_commands([Command::builder("ping").build().unwrap()])
        .unwrap();

    let err = dispatcher
        .register_commands([
            Command::builder("help").build().unwrap(),
            Command::builder("info").alias("ping").build().unwrap(),
        ])
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::DuplicateCommandName { ref command, ref name } if command == "info" && name == "ping"
    ));
    assert_eq!(dispatcher.registry().commands().len(), 1);
    assert!(dispatcher.registry().command("help").is_none());
}

#[test]
fn test_names_collide_within_a_batch() {
    let mut dispatcher = dispatcher();
    let err = dispatcher
        .register_commands([
            Command::builder("stats").build().unwrap(),
            Command::builder("status").alias("stats").build().unwrap(),
        ])
        .unwrap_err();
    assert_eq!(err.error_code(), "duplicate_command_name");
    assert!(dispatcher.registry().commands().is_empty());
}

#[test]
fn test_dangling_references_are_rejected() {
    let mut dispatcher = dispatcher();

    let err = dispatcher
        .register_commands([Command::builder("a").precondition("owner_only").build().unwrap()])
        .unwrap_err();
    assert!(matches!(err, RegistryError::UnknownPrecondition { .. }));

    let err = dispatcher
        .register_commands([Command::builder("b").middleware("audit").build().unwrap()])
        .unwrap_err();
    assert!(matches!(err, RegistryError::UnknownMiddleware { .. }));

    let err = dispatcher
        .register_commands([Command::builder("c")
            .argument(Argument::builder("when", "Date").build().unwrap())
            .build()
            .unwrap()])
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::UnknownTypeReader { ref type_reader, .. } if type_reader == "Date"
    ));

    assert!(dispatcher.registry().commands().is_empty());

    dispatcher
        .register_preconditions([Arc::new(PreconditionFn::new("owner_only", |_, _| true)) as Arc<dyn Precondition>])
        .unwrap();
    dispatcher
        .register_commands([Command::builder("a").precondition("owner_only").build().unwrap()])
        .unwrap();
}

#[test]
fn test_duplicate_argument_names() {
    let mut dispatcher = dispatcher();
    let err = dispatcher
        .register_commands([Command::builder("swap")
            .argument(Argument::builder("x", "String").build().unwrap())
            .argument(Argument::builder("x", "Number").build().unwrap())
            .build()
            .unwrap()])
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateArgument { ref argument, .. } if argument == "x"));
}

#[test]
fn test_duplicate_collaborators() {
    let mut dispatcher = dispatcher();

    let err = dispatcher.register_default_type_readers().unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateTypeReader(ref name) if name == "String"));

    let make = || -> Arc<dyn Middleware> { Arc::new(MiddlewareFn::new("audit", |m, _| m)) };
    let err = dispatcher.register_middleware([make(), make()]).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateMiddleware(ref name) if name == "audit"));
    assert!(dispatcher.registry().middleware("audit").is_none());

    dispatcher.register_middleware([make()]).unwrap();
    assert!(dispatcher.register_middleware([make()]).is_err());
}

#[test]
fn test_descriptor_validation() {
    assert!(matches!(Command::builder("").build(), Err(DescriptorError::EmptyName)));
    assert!(matches!(
        Command::builder("ping").alias("ping").build(),
        Err(DescriptorError::DuplicateAlias { .. })
    ));
    assert!(matches!(
        Argument::builder("n", "Number").repeatable(0).build(),
        Err(DescriptorError::InvalidMaxRepeats { .. })
    ));
    assert!(matches!(
        Argument::builder("n", "Number").readers(Vec::<String>::new()).build(),
        Err(DescriptorError::NoTypeReaders { .. })
    ));
}

#[tokio::test]
async fn test_guild_prefix_registration() {
    let mut dispatcher = dispatcher();
    dispatcher
        .register_commands([Command::builder("ping").build().unwrap()])
        .unwrap();

    assert!(matches!(
        dispatcher.register_guild_prefix(GUILD, ""),
        Err(RegistryError::EmptyPrefix)
    ));

    dispatcher.register_guild_prefix(GUILD, "!!").unwrap();
    assert_eq!(dispatcher.prefixes().overrides(), [(GUILD.to_string(), "!!".to_string())]);

    // Re-registering the default clears the override.
    dispatcher.register_guild_prefix(GUILD, "&").unwrap();
    assert!(dispatcher.prefixes().overrides().is_empty());
    assert!(matches!(
        dispatcher.dispatch(guild_message("&ping")).await.unwrap(),
        Outcome::Success { .. }
    ));
}
