//! Integration tests for loading configuration and building a dispatcher
//! from it.

mod common;

use common::{GUILD, seeded_directory};
use slcmd::{Config, ConfigError, Dispatcher, ValidationError};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn test_load_and_build_dispatcher() {
    let file = write_config(&format!(
        r#"
[handler]
prefix = "!"
cooldown_ms = 2500

[guild_prefixes]
"{GUILD}" = "?"
"#
    ));

    let config = Config::load(file.path()).unwrap();
    let dispatcher = Dispatcher::from_config(&config, Arc::new(seeded_directory())).unwrap();

    assert_eq!(dispatcher.resolve_prefix(None), "!");
    assert_eq!(dispatcher.resolve_prefix(Some(GUILD)), "?");
    assert_eq!(dispatcher.cooldowns().window(), Duration::from_millis(2500));
}

#[test]
fn test_missing_file() {
    let err = Config::load("/nonexistent/slcmd.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_malformed_toml() {
    let file = write_config("[handler\nprefix = ");
    assert!(matches!(Config::load(file.path()), Err(ConfigError::Parse(_))));
}

#[test]
fn test_invalid_config_is_rejected_with_every_error() {
    let file = write_config(
        r#"
[handler]
prefix = ""
argument_pattern = "[a-"
"#,
    );
    let config = Config::load(file.path()).unwrap();

    match Dispatcher::from_config(&config, Arc::new(seeded_directory())) {
        Err(ConfigError::Invalid(errors)) => {
            assert_eq!(errors.len(), 2);
            assert_eq!(errors[0], ValidationError::EmptyPrefix);
        }
        Err(other) => panic!("expected validation errors, got {other}"),
        Ok(_) => panic!("invalid config accepted"),
    }
}
