use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DirectoryError, Result};
use crate::types::{DeleteStyle, Endpoint};

pub const ENDPOINT_ENV: &str = "USERDIR_ENDPOINT";

#[derive(Deserialize, Serialize, Default, Debug)]
pub struct Config {
    pub default_endpoint: Option<String>,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(config_path).map_err(|e| DirectoryError::ConfigRead {
                path: config_path.to_path_buf(),
                source: e,
            })?;

        toml::from_str(&contents).map_err(|e| DirectoryError::ConfigParse {
            path: config_path.to_path_buf(),
            source: e,
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "userdir")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(DirectoryError::NoConfigDir)
    }

    pub fn find_endpoint(&self, name: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| e.name == name)
    }

    /// Pick the endpoint to start with: explicit argument, then the env var,
    /// then `default_endpoint`. `None` means nothing is selected yet.
    pub fn initial_endpoint(
        &self,
        explicit: Option<&str>,
        ad_hoc_style: DeleteStyle,
    ) -> Result<Option<Endpoint>> {
        let env = std::env::var(ENDPOINT_ENV).ok();
        let selection = explicit
            .map(String::from)
            .or(env)
            .or_else(|| self.default_endpoint.clone());

        match selection {
            Some(s) if !s.trim().is_empty() => self.resolve_endpoint(&s, ad_hoc_style).map(Some),
            _ => Ok(None),
        }
    }

    /// Resolve an operator-supplied selection: a configured name first,
    /// otherwise an http(s) URL used with `ad_hoc_style`.
    pub fn resolve_endpoint(&self, selection: &str, ad_hoc_style: DeleteStyle) -> Result<Endpoint> {
        let selection = selection.trim();
        if let Some(endpoint) = self.find_endpoint(selection) {
            return Ok(endpoint.clone());
        }

        if !selection.contains("://") {
            return Err(DirectoryError::UnknownEndpoint(selection.to_string()));
        }

        let url = Url::parse(selection)
            .map_err(|e| DirectoryError::InvalidUrl(format!("{selection}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DirectoryError::InvalidUrl(format!(
                "{selection}: unsupported scheme '{}'",
                url.scheme()
            )));
        }

        Ok(Endpoint::new(selection, url.as_str(), ad_hoc_style))
    }
}
