//! Domain types for a bootstrap run.
//!
//! Everything here is built once at the CLI boundary and passed down by value;
//! nothing reads the environment or the current directory after that point.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_DESCRIPTION: &str = "Pushed by autoboot";
pub const DEFAULT_COMMIT_MESSAGE: &str = "Initial commit";
pub const LICENSE_OWNER_PLACEHOLDER: &str = "YOUR NAME";
pub const DEFAULT_API_URL: &str = "https://api.github.com";

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// The human-facing project name as typed on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectName(pub String);

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProjectName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A repository name that the hosting provider will accept verbatim.
///
/// Only `[A-Za-z0-9._-]` survive; every other run of characters (spaces
/// included) becomes a single `-`, and leading/trailing `-` are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoName(String);

impl RepoName {
    pub fn sanitize(raw: &str) -> Result<Self, ConfigError> {
        let mut out = String::with_capacity(raw.len());
        let mut pending_dash = false;
        for c in raw.trim().chars() {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_') {
                if pending_dash && !out.is_empty() {
                    out.push('-');
                }
                pending_dash = false;
                out.push(c);
            } else {
                // '-' itself and anything invalid fold into one separator.
                pending_dash = true;
            }
        }

        match out.as_str() {
            "" => Err(ConfigError::InvalidRepoName {
                name: raw.to_string(),
                reason: "no valid characters remain",
            }),
            "." | ".." => Err(ConfigError::InvalidRepoName {
                name: raw.to_string(),
                reason: "reserved name",
            }),
            _ => Ok(Self(out)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Personal access token for the hosting provider. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a raw environment value; blank values count as unset.
    pub fn from_env_value(raw: Option<String>) -> Option<Self> {
        raw.map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(Self)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Language ecosystem inferred from indicator files in the project root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    Rust,
    Go,
    Ruby,
    Php,
    JavaScript,
    TypeScript,
    Python,
    #[default]
    Unknown,
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectKind::Rust => write!(f, "rust"),
            ProjectKind::Go => write!(f, "go"),
            ProjectKind::Ruby => write!(f, "ruby"),
            ProjectKind::Php => write!(f, "php"),
            ProjectKind::JavaScript => write!(f, "javascript"),
            ProjectKind::TypeScript => write!(f, "typescript"),
            ProjectKind::Python => write!(f, "python"),
            ProjectKind::Unknown => write!(f, "unknown"),
        }
    }
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Which advisory checks run in the audit step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditOptions {
    pub dependencies: bool,
    pub security_scan: bool,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            dependencies: true,
            security_scan: false,
        }
    }
}

/// Tunables resolved from flags, config file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapOptions {
    pub branch: String,
    pub private: bool,
    pub description: String,
    pub license_owner: String,
    pub commit_message: String,
    pub audit: AuditOptions,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            branch: DEFAULT_BRANCH.to_string(),
            private: false,
            description: DEFAULT_DESCRIPTION.to_string(),
            license_owner: LICENSE_OWNER_PLACEHOLDER.to_string(),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            audit: AuditOptions::default(),
        }
    }
}

/// Everything one bootstrap run needs. Immutable once built.
#[derive(Debug, Clone)]
pub struct BootstrapRequest {
    pub project_name: ProjectName,
    pub repo_name: RepoName,
    pub working_dir: PathBuf,
    pub token: Option<AuthToken>,
    pub options: BootstrapOptions,
}

impl BootstrapRequest {
    /// Build a request, deriving the repository name from `project_name`.
    pub fn new(
        project_name: ProjectName,
        working_dir: PathBuf,
        token: Option<AuthToken>,
        options: BootstrapOptions,
    ) -> Result<Self, ConfigError> {
        let repo_name = RepoName::sanitize(&project_name.0)?;
        Ok(Self {
            project_name,
            repo_name,
            working_dir,
            token,
            options,
        })
    }
}
