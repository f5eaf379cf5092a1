//! Readers resolving ids and mentions through the [`Directory`].
//!
//! A token is either a bare numeric id or a mention. An id that resolves to
//! nothing is `UnknownId`; a mention that resolves to nothing, or a token that
//! is neither form, is `InvalidMention`. Lookup errors are faults.
//!
//! The id or mention must be the whole token: `<@3002>,` is `InvalidMention`,
//! so trailing punctuation has to be split off by the argument pattern.
//!
//! [`Directory`]: crate::directory::Directory

use super::{CHANNEL, CHANNEL_MENTION, MEMBER, ROLE, ROLE_MENTION, USER, USER_MENTION};
use crate::descriptor::{ArgValue, ReadContext, TypeReader};
use crate::error::ReaderError;
use async_trait::async_trait;
use regex::Regex;

/// Extract the id a token refers to, with the error to report if the lookup
/// comes back empty.
fn target<'a>(token: &'a str, mention: &Regex) -> Result<(&'a str, ReaderError), ReaderError> {
    if token.is_empty() {
        return Err(ReaderError::NoInput);
    }
    if token.bytes().all(|b| b.is_ascii_digit()) {
        return Ok((token, ReaderError::UnknownId));
    }
    match mention.captures(token).and_then(|c| c.get(1)) {
        Some(id) => Ok((id.as_str(), ReaderError::InvalidMention)),
        None => Err(ReaderError::InvalidMention),
    }
}

fn guild_of<'a>(ctx: &'a ReadContext<'_>, reader: &'static str) -> Result<&'a str, ReaderError> {
    ctx.message.guild_id().ok_or(ReaderError::GuildOnly(reader))
}

/// Any user the directory knows, in or out of a guild.
///
/// Trailing punctuation after a mention is not allowed.
pub struct UserReader;

#[async_trait]
impl TypeReader for UserReader {
    fn name(&self) -> &str {
        USER
    }

    async fn read(&self, token: &str, ctx: &ReadContext<'_>) -> Result<ArgValue, ReaderError> {
        let (id, miss) = target(token, &USER_MENTION)?;
        let user = ctx
            .directory()
            .user(id)
            .await
            .map_err(ReaderError::Fault)?
            .ok_or(miss)?;
        Ok(ArgValue::User(user))
    }
}

/// A member of the message's guild.
pub struct MemberReader;

#[async_trait]
impl TypeReader for MemberReader {
    fn name(&self) -> &str {
        MEMBER
    }

    async fn read(&self, token: &str, ctx: &ReadContext<'_>) -> Result<ArgValue, ReaderError> {
        let guild_id = guild_of(ctx, MEMBER)?;
        let (id, miss) = target(token, &USER_MENTION)?;
        let member = ctx
            .directory()
            .member(guild_id, id)
            .await
            .map_err(ReaderError::Fault)?
            .ok_or(miss)?;
        Ok(ArgValue::Member(member))
    }
}

/// A role of the message's guild.
pub struct RoleReader;

#[async_trait]
impl TypeReader for RoleReader {
    fn name(&self) -> &str {
        ROLE
    }

    async fn read(&self, token: &str, ctx: &ReadContext<'_>) -> Result<ArgValue, ReaderError> {
        let guild_id = guild_of(ctx, ROLE)?;
        let (id, miss) = target(token, &ROLE_MENTION)?;
        let role = ctx
            .directory()
            .role(guild_id, id)
            .await
            .map_err(ReaderError::Fault)?
            .ok_or(miss)?;
        Ok(ArgValue::Role(role))
    }
}

/// A channel of the message's guild.
pub struct ChannelReader;

#[async_trait]
impl TypeReader for ChannelReader {
    fn name(&self) -> &str {
        CHANNEL
    }

    async fn read(&self, token: &str, ctx: &ReadContext<'_>) -> Result<ArgValue, ReaderError> {
        let guild_id = guild_of(ctx, CHANNEL)?;
        let (id, miss) = target(token, &CHANNEL_MENTION)?;
        let channel = ctx
            .directory()
            .channel(guild_id, id)
            .await
            .map_err(ReaderError::Fault)?
            .ok_or(miss)?;
        Ok(ArgValue::Channel(channel))
    }
}
