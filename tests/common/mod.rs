//! Integration test common infrastructure.
//!
//! Provides a seeded in-memory directory, dispatcher construction, message
//! helpers, and a recording command body.

pub mod directory;
pub mod recorder;

#[allow(unused_imports)]
pub use directory::{BrokenDirectory, seeded_directory};
#[allow(unused_imports)]
pub use recorder::Recorder;

use slcmd::{Channel, Dispatcher, HandlerConfig, Message, User};
use std::sync::Arc;

#[allow(dead_code)]
pub const GUILD: &str = "1000";
#[allow(dead_code)]
pub const GUILD_CHANNEL: &str = "2000";
#[allow(dead_code)]
pub const DM_CHANNEL: &str = "2999";
#[allow(dead_code)]
pub const BOT: &str = "1";
#[allow(dead_code)]
pub const ALICE: &str = "3001";
#[allow(dead_code)]
pub const BOB: &str = "3002";
#[allow(dead_code)]
pub const MOD_ROLE: &str = "4001";

/// Install a test subscriber once; honours `RUST_LOG`.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Dispatcher with prefix `&`, no cooldown, the built-in readers, and the
/// seeded directory.
#[allow(dead_code)]
pub fn dispatcher() -> Dispatcher {
    dispatcher_with(HandlerConfig::new("&"))
}

#[allow(dead_code)]
pub fn dispatcher_with(config: HandlerConfig) -> Dispatcher {
    init_tracing();
    let mut dispatcher = Dispatcher::new(&config, Arc::new(seeded_directory()))
        .expect("valid handler config");
    dispatcher
        .register_default_type_readers()
        .expect("built-in readers register");
    dispatcher
}

/// A message from alice in the seeded guild channel.
#[allow(dead_code)]
pub fn guild_message(content: &str) -> Message {
    message_from(ALICE, content, Channel::guild(GUILD_CHANNEL, GUILD))
}

/// A message from alice in a direct channel.
#[allow(dead_code)]
pub fn direct_message(content: &str) -> Message {
    message_from(ALICE, content, Channel::direct(DM_CHANNEL))
}

#[allow(dead_code)]
pub fn message_from(author_id: &str, content: &str, channel: Channel) -> Message {
    Message::new(
        format!("msg-{author_id}"),
        content,
        User::new(author_id, format!("user{author_id}")),
        channel,
    )
}
