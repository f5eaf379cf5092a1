//! Parsed argument values.

use crate::message::{Channel, Member, Role, User};
use std::collections::HashMap;

/// A value produced by a type reader.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Text(String),
    Number(f64),
    Boolean(bool),
    User(User),
    Member(Member),
    Role(Role),
    Channel(Channel),
    /// Values collected by a repeatable argument, in token order.
    List(Vec<ArgValue>),
    /// Free-form value for host-defined readers.
    Json(serde_json::Value),
}

impl ArgValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_user(&self) -> Option<&User> {
        match self {
            Self::User(u) => Some(u),
            Self::Member(m) => Some(&m.user),
            _ => None,
        }
    }

    pub fn as_member(&self) -> Option<&Member> {
        match self {
            Self::Member(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_role(&self) -> Option<&Role> {
        match self {
            Self::Role(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_channel(&self) -> Option<&Channel> {
        match self {
            Self::Channel(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ArgValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for ArgValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for ArgValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<Vec<ArgValue>> for ArgValue {
    fn from(items: Vec<ArgValue>) -> Self {
        Self::List(items)
    }
}

/// Parsed arguments for one invocation, keyed by argument name.
///
/// Optional arguments that failed to parse and declare no default are absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: HashMap<String, ArgValue>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: ArgValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ArgValue::as_text)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ArgValue::as_number)
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(ArgValue::as_bool)
    }

    pub fn user(&self, name: &str) -> Option<&User> {
        self.get(name).and_then(ArgValue::as_user)
    }

    /// Values of a repeatable argument. Empty when the argument is absent.
    pub fn list(&self, name: &str) -> &[ArgValue] {
        self.get(name).and_then(ArgValue::as_list).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_inner(self) -> HashMap<String, ArgValue> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_accessors_reject_other_variants() {
        let mut args = Arguments::new();
        args.insert("n", ArgValue::Number(3.0));
        args.insert("s", "hi".into());
        args.insert("xs", ArgValue::List(vec![1.0.into(), 2.0.into()]));

        assert_eq!(args.number("n"), Some(3.0));
        assert_eq!(args.text("n"), None);
        assert_eq!(args.text("s"), Some("hi"));
        assert_eq!(args.list("xs").len(), 2);
        assert!(args.list("missing").is_empty());
        assert_eq!(args.len(), 3);
    }

    #[test]
    fn member_value_exposes_its_user() {
        let member = Member {
            user: User::new("7", "bob"),
            guild_id: "g".into(),
            nick: Some("bobby".into()),
            roles: vec![],
        };
        let value = ArgValue::Member(member);
        assert_eq!(value.as_user().map(|u| u.id.as_str()), Some("7"));
        assert!(value.as_member().is_some());
    }
}
