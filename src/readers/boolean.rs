use super::BOOLEAN;
use crate::descriptor::{ArgValue, ReadContext, TypeReader};
use crate::error::ReaderError;
use async_trait::async_trait;

/// Words read as `true`, compared case-insensitively.
pub const TRUE_WORDS: &[&str] = &["true", "on", "enable", "yep", "ye", "yeah", "yes", "y", "t", "1"];

/// Words read as `false`, compared case-insensitively.
pub const FALSE_WORDS: &[&str] = &["false", "off", "disable", "nope", "na", "nah", "no", "n", "f", "0"];

pub struct BooleanReader;

#[async_trait]
impl TypeReader for BooleanReader {
    fn name(&self) -> &str {
        BOOLEAN
    }

    async fn read(&self, token: &str, _: &ReadContext<'_>) -> Result<ArgValue, ReaderError> {
        if token.is_empty() {
            return Err(ReaderError::NoInput);
        }
        let lower = token.to_lowercase();
        if TRUE_WORDS.contains(&lower.as_str()) {
            Ok(ArgValue::Boolean(true))
        } else if FALSE_WORDS.contains(&lower.as_str()) {
            Ok(ArgValue::Boolean(false))
        } else {
            Err(ReaderError::invalid("unknown input"))
        }
    }
}
