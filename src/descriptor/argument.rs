//! Argument descriptors.

use super::value::ArgValue;
use crate::error::DescriptorError;

/// One positional argument of a command.
///
/// `type_readers` is a fallback chain: each reader is tried in order against
/// the same token and the first success wins.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    name: String,
    type_readers: Vec<String>,
    optional: bool,
    repeatable: bool,
    max_repeats: usize,
    default_value: Option<ArgValue>,
    type_reader_options: serde_json::Value,
}

impl Argument {
    /// Start building an argument read by `type_reader`. Add fallbacks with
    /// [`ArgumentBuilder::or_reader`].
    pub fn builder(name: impl Into<String>, type_reader: impl Into<String>) -> ArgumentBuilder {
        ArgumentBuilder {
            name: name.into(),
            type_readers: vec![type_reader.into()],
            optional: false,
            repeatable: false,
            max_repeats: 1,
            default_value: None,
            type_reader_options: serde_json::Value::Null,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_readers(&self) -> &[String] {
        &self.type_readers
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn is_repeatable(&self) -> bool {
        self.repeatable
    }

    /// Upper bound on repetitions. Always 1 for non-repeatable arguments.
    pub fn max_repeats(&self) -> usize {
        if self.repeatable { self.max_repeats } else { 1 }
    }

    pub fn default_value(&self) -> Option<&ArgValue> {
        self.default_value.as_ref()
    }

    pub fn type_reader_options(&self) -> &serde_json::Value {
        &self.type_reader_options
    }
}

/// Builder for [`Argument`]; validation happens in [`ArgumentBuilder::build`].
#[derive(Debug, Clone)]
pub struct ArgumentBuilder {
    name: String,
    type_readers: Vec<String>,
    optional: bool,
    repeatable: bool,
    max_repeats: usize,
    default_value: Option<ArgValue>,
    type_reader_options: serde_json::Value,
}

impl ArgumentBuilder {
    /// Append a fallback reader to the chain.
    pub fn or_reader(mut self, type_reader: impl Into<String>) -> Self {
        self.type_readers.push(type_reader.into());
        self
    }

    /// Replace the whole reader chain.
    pub fn readers<I, S>(mut self, type_readers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_readers = type_readers.into_iter().map(Into::into).collect();
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Mark the argument optional with a value to use when parsing fails.
    pub fn default_value(mut self, value: impl Into<ArgValue>) -> Self {
        self.optional = true;
        self.default_value = Some(value.into());
        self
    }

    /// Consume up to `max_repeats` tokens into a list.
    pub fn repeatable(mut self, max_repeats: usize) -> Self {
        self.repeatable = true;
        self.max_repeats = max_repeats;
        self
    }

    /// Options handed to every reader in the chain.
    pub fn options(mut self, options: serde_json::Value) -> Self {
        self.type_reader_options = options;
        self
    }

    pub fn build(self) -> Result<Argument, DescriptorError> {
        if self.name.is_empty() {
            return Err(DescriptorError::EmptyName);
        }
        if self.type_readers.is_empty() {
            return Err(DescriptorError::NoTypeReaders { argument: self.name });
        }
        if self.type_readers.iter().any(String::is_empty) {
            return Err(DescriptorError::EmptyName);
        }
        if self.repeatable && self.max_repeats < 1 {
            return Err(DescriptorError::InvalidMaxRepeats {
                argument: self.name,
                max_repeats: self.max_repeats,
            });
        }

        Ok(Argument {
            name: self.name,
            type_readers: self.type_readers,
            optional: self.optional,
            repeatable: self.repeatable,
            max_repeats: self.max_repeats,
            default_value: self.default_value,
            type_reader_options: self.type_reader_options,
        })
    }
}
