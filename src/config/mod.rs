//! Configuration loading and validation.
//!
//! - [`types`]: config struct definitions and TOML loading
//! - [`validation`]: startup checks that report every problem at once

mod types;
mod validation;

pub use types::{Config, ConfigError, DEFAULT_ARGUMENT_PATTERN, HandlerConfig};
pub use validation::{ValidationError, validate};
