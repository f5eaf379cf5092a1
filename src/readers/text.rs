use super::{ENUM, STRING};
use crate::descriptor::{ArgValue, ReadContext, TypeReader};
use crate::error::ReaderError;
use anyhow::anyhow;
use async_trait::async_trait;
use serde::Deserialize;

/// Accepts any non-empty token verbatim.
pub struct StringReader;

#[async_trait]
impl TypeReader for StringReader {
    fn name(&self) -> &str {
        STRING
    }

    async fn read(&self, token: &str, _: &ReadContext<'_>) -> Result<ArgValue, ReaderError> {
        if token.is_empty() {
            return Err(ReaderError::invalid("empty string"));
        }
        Ok(ArgValue::Text(token.to_string()))
    }
}

/// Options for [`EnumReader`], taken from the argument's
/// `type_reader_options`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnumOptions {
    values: Vec<String>,
    #[serde(default)]
    case_sensitive: bool,
}

/// Accepts one of a fixed set of words.
///
/// Options: `{"values": [..], "caseSensitive": false}`. Unless case
/// sensitive, the token is lowercased before comparison and the lowercased
/// form is returned. Missing or malformed options are a fault, not a parse
/// failure.
pub struct EnumReader;

#[async_trait]
impl TypeReader for EnumReader {
    fn name(&self) -> &str {
        ENUM
    }

    async fn read(&self, token: &str, ctx: &ReadContext<'_>) -> Result<ArgValue, ReaderError> {
        let options = EnumOptions::deserialize(ctx.options).map_err(|e| {
            ReaderError::Fault(anyhow!("invalid Enum options for {}: {e}", ctx.command.name()))
        })?;

        if token.is_empty() {
            return Err(ReaderError::NoInput);
        }
        let token = if options.case_sensitive {
            token.to_string()
        } else {
            token.to_lowercase()
        };
        if options.values.contains(&token) {
            Ok(ArgValue::Text(token))
        } else {
            Err(ReaderError::invalid(format!("expected one of {}", options.values.join(", "))))
        }
    }
}
