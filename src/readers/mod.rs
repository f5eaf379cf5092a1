//! Built-in type readers.
//!
//! Registered by [`Dispatcher::register_default_type_readers`]; hosts that
//! want their own `String` or `Number` reader simply skip that call.
//!
//! [`Dispatcher::register_default_type_readers`]: crate::Dispatcher::register_default_type_readers

mod boolean;
mod entity;
mod number;
mod text;

pub use boolean::{BooleanReader, FALSE_WORDS, TRUE_WORDS};
pub use entity::{ChannelReader, MemberReader, RoleReader, UserReader};
pub use number::NumberReader;
pub use text::{EnumReader, StringReader};

use crate::descriptor::TypeReader;
use regex::Regex;
use std::sync::{Arc, LazyLock};

pub const STRING: &str = "String";
pub const NUMBER: &str = "Number";
pub const BOOLEAN: &str = "Boolean";
pub const ENUM: &str = "Enum";
pub const USER: &str = "User";
pub const MEMBER: &str = "Member";
pub const ROLE: &str = "Role";
pub const CHANNEL: &str = "Channel";

/// `<@123>` or `<@!123>`.
pub static USER_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<@!?(\d+)>$").expect("user mention regex"));

/// `<@&123>`.
pub static ROLE_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<@&(\d+)>$").expect("role mention regex"));

/// `<#123>`.
pub static CHANNEL_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<#(\d+)>$").expect("channel mention regex"));

/// One instance of every built-in reader.
pub fn defaults() -> Vec<Arc<dyn TypeReader>> {
    vec![
        Arc::new(StringReader),
        Arc::new(NumberReader),
        Arc::new(BooleanReader),
        Arc::new(EnumReader),
        Arc::new(UserReader),
        Arc::new(MemberReader),
        Arc::new(RoleReader),
        Arc::new(ChannelReader),
    ]
}
