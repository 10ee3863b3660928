use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Server-assigned identifier. Services hand these out either as numbers or
/// as strings, so both are kept as received. Numbers keep their JSON form,
/// so `1.0` and ids beyond `i64` survive untouched.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum UserId {
    Number(Number),
    Text(String),
}

impl UserId {
    /// Whether this id is the one an operator typed, compared by rendered form.
    pub fn matches(&self, typed: &str) -> bool {
        match self {
            Self::Number(n) => {
                let typed = typed.trim();
                typed.parse::<Number>().is_ok_and(|t| t == *n) || n.to_string() == typed
            }
            Self::Text(s) => s == typed.trim(),
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

impl User {
    #[cfg(test)]
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
