use std::{fs, path::Path};

use serde::Deserialize;

use crate::errors::{GitviewError, Result};

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub server: ListenConfig,
    #[serde(default)]
    pub github: GithubConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ListenConfig {
    pub address: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GithubConfig {
    /// Personal access token for API requests. Unauthenticated requests work
    /// but hit GitHub's much lower rate limit.
    pub token: Option<String>,
    #[serde(default = "default_api_root")]
    pub api_root: String,
    #[serde(default = "default_raw_root")]
    pub raw_root: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_root: default_api_root(),
            raw_root: default_raw_root(),
        }
    }
}

fn default_api_root() -> String {
    "https://api.github.com".to_owned()
}

fn default_raw_root() -> String {
    "https://raw.githubusercontent.com".to_owned()
}

pub(super) fn load(path: &Path) -> Result<Config> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        if config.github.token.is_none() {
            config.github.token = std::env::var("GITHUB_TOKEN").ok();
        }
        Ok(config)
    } else {
        Err(GitviewError::MissingConfig)
    }
}
