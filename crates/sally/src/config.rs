use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_GODOC_HOST: &str = "pkg.go.dev";
pub const DEFAULT_BRANCH: &str = "master";

/// Errors that can occur while loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Contents of the YAML configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base host of every canonical import path, e.g. `go.uber.org`
    pub url: String,

    /// Packages keyed by import path relative to `url`
    pub packages: BTreeMap<String, Package>,

    pub godoc: GodocConfig,
}

/// Documentation server that package pages redirect to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GodocConfig {
    pub host: String,
}

/// A single package served under a vanity import path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Package {
    /// Repository without scheme, e.g. `github.com/uber-go/zap`
    pub repo: String,

    pub branch: String,

    /// Overrides [`Config::url`] for this package
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,

    /// Plain text only
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl Config {
    /// Reads and normalizes the configuration at `path`.
    pub fn parse(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses configuration text and fills in defaults.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        let mut config: Config = serde_yaml::from_str(text)?;
        config.normalize();
        Ok(config)
    }

    fn normalize(&mut self) {
        self.godoc.host = normalize_godoc_host(&self.godoc.host);

        for package in self.packages.values_mut() {
            if package.branch.is_empty() {
                package.branch = DEFAULT_BRANCH.to_string();
            }
        }
    }
}

impl Package {
    /// Base URL of the canonical import path: the package override if set,
    /// otherwise the global one.
    pub fn base_url<'a>(&'a self, config: &'a Config) -> &'a str {
        if self.url.is_empty() {
            &config.url
        } else {
            &self.url
        }
    }
}

fn normalize_godoc_host(raw: &str) -> String {
    if raw.is_empty() {
        return DEFAULT_GODOC_HOST.to_string();
    }

    let host = raw.strip_prefix("https://").unwrap_or(raw);
    let host = host.strip_prefix("http://").unwrap_or(host);
    let host = host.strip_suffix('/').unwrap_or(host);
    host.to_string()
}
