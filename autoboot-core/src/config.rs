//! Optional user configuration.
//!
//! # Storage layout
//!
//! ```text
//! ~/.autoboot/
//!   config.yaml     (optional; every key optional)
//!   templates/      (optional *.tera overrides)
//! ```
//!
//! # API pattern
//!
//! Everything takes the home directory explicitly (`*_at(home: &Path)`) so
//! tests can point it at a `TempDir`. The binary resolves it once via
//! [`home`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{AuditOptions, BootstrapOptions, DEFAULT_API_URL};

/// Contents of `config.yaml`. Absent keys fall back to built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub license_owner: Option<String>,
    pub default_branch: Option<String>,
    pub private: Option<bool>,
    pub description: Option<String>,
    pub commit_message: Option<String>,
    /// Run the dependency audit step (default `true`).
    pub audit: Option<bool>,
    /// Hosting provider API base, e.g. a GitHub Enterprise host.
    pub api_url: Option<String>,
}

impl Config {
    /// Options with config values applied over the built-in defaults.
    pub fn options(&self) -> BootstrapOptions {
        let defaults = BootstrapOptions::default();
        BootstrapOptions {
            branch: self.default_branch.clone().unwrap_or(defaults.branch),
            private: self.private.unwrap_or(defaults.private),
            description: self.description.clone().unwrap_or(defaults.description),
            license_owner: self.license_owner.clone().unwrap_or(defaults.license_owner),
            commit_message: self.commit_message.clone().unwrap_or(defaults.commit_message),
            audit: AuditOptions {
                dependencies: self.audit.unwrap_or(defaults.audit.dependencies),
                security_scan: defaults.audit.security_scan,
            },
        }
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }
}

/// `<home>/.autoboot/`
pub fn config_dir_at(home: &Path) -> PathBuf {
    home.join(".autoboot")
}

/// `<home>/.autoboot/config.yaml`: pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    config_dir_at(home).join("config.yaml")
}

/// `<home>/.autoboot/templates/`: pure, no I/O.
pub fn templates_dir_at(home: &Path) -> PathBuf {
    config_dir_at(home).join("templates")
}

/// Load `<home>/.autoboot/config.yaml`, or defaults if it does not exist.
///
/// An empty file is treated like a missing one.
pub fn load_at(home: &Path) -> Result<Config, ConfigError> {
    let path = config_path_at(home);
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
        path: path.clone(),
        source: e,
    })?;
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse { path, source: e })
}

pub fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}
