//! Prefix stripping and command-name matching.

use crate::descriptor::Command;
use std::sync::Arc;

/// Result of matching a message against the registered commands.
#[derive(Debug, Clone)]
pub enum Match {
    /// The text does not start with the resolved prefix.
    NoPrefix,
    /// The prefix matched but no command name did.
    NoCommand { prefix: String },
    Found(ParsedCommand),
}

/// A matched command and the text left for argument parsing.
#[derive(Debug, Clone)]
pub struct ParsedCommand {
    pub command: Arc<Command>,
    /// The name (canonical or alias) the message used.
    pub name_used: String,
    /// Text after the command name, trimmed.
    pub content: String,
    pub prefix: String,
}

/// Match `text` against `commands` using `prefix`.
///
/// Prefix and names compare case-insensitively. A name only matches on a word
/// boundary: it must be followed by whitespace or the end of the text. When
/// several commands match, the one whose matching name has the most words
/// wins; among equals, the first registered wins.
pub fn match_command(
    text: &str,
    prefix: &str,
    commands: &[Arc<Command>],
    in_guild: bool,
) -> Match {
    let remaining = match strip_prefix_ci(text, prefix) {
        Some(rest) if !rest.is_empty() => rest,
        _ => return Match::NoPrefix,
    };

    let mut best: Option<(usize, &Arc<Command>, &str, &str)> = None;
    for command in commands {
        if command.is_guild_only() && !in_guild {
            continue;
        }
        for name in command.names() {
            let Some(rest) = match_name(remaining, name) else {
                continue;
            };
            let words = name.split_whitespace().count();
            if best.is_none_or(|(best_words, ..)| words > best_words) {
                best = Some((words, command, name, rest));
            }
        }
    }

    match best {
        Some((_, command, name, rest)) => Match::Found(ParsedCommand {
            command: Arc::clone(command),
            name_used: name.to_string(),
            content: rest.trim().to_string(),
            prefix: prefix.to_string(),
        }),
        None => Match::NoCommand {
            prefix: prefix.to_string(),
        },
    }
}

/// Strip `name` from the start of `text` if it is followed by whitespace or
/// the end of the text.
fn match_name<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    let rest = strip_prefix_ci(text, name)?;
    match rest.chars().next() {
        None => Some(rest),
        Some(c) if c.is_whitespace() => Some(rest),
        Some(_) => None,
    }
}

/// Case-insensitive `str::strip_prefix`, comparing char by char.
pub(crate) fn strip_prefix_ci<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let mut chars = text.char_indices();
    let mut end = 0;
    for p in prefix.chars() {
        let (i, t) = chars.next()?;
        if !chars_eq_ci(p, t) {
            return None;
        }
        end = i + t.len_utf8();
    }
    Some(&text[end..])
}

#[inline]
fn chars_eq_ci(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
