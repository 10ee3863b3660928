use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How a directory expects the id of a record to delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteStyle {
    /// `DELETE <url>?id=<id>`
    Query,
    /// `DELETE <url>` with form body `id=<id>`
    #[default]
    Form,
}

impl fmt::Display for DeleteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => write!(f, "query"),
            Self::Form => write!(f, "form"),
        }
    }
}

/// A selectable directory service and the capabilities it needs from us.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub delete_style: DeleteStyle,
}

impl Endpoint {
    pub fn new(name: impl Into<String>, url: impl Into<String>, delete_style: DeleteStyle) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            delete_style,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name == self.url {
            write!(f, "{}", self.url)
        } else {
            write!(f, "{} ({})", self.name, self.url)
        }
    }
}
