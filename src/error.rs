use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single call against a directory endpoint.
///
/// The view treats every variant the same way; the split only exists so the
/// cause reads well in notices and logs.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned status {status}: {message}")]
    Server { status: u16, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error(
        "No endpoint selected. Pass --endpoint, set USERDIR_ENDPOINT, or add default_endpoint to the config file"
    )]
    NoEndpoint,

    #[error("Unknown endpoint '{0}' (not a configured name or an http(s) URL)")]
    UnknownEndpoint(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("User not found: {0}")]
    UserNotFound(String),
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
