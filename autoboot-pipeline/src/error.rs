//! Error types for autoboot-pipeline.

use std::path::PathBuf;

use thiserror::Error;

use autoboot_renderer::RenderError;

/// Broad class of a [`BootError`], used for exit codes and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Authentication,
    Conflict,
    Network,
    Api,
    ExternalTool,
    Io,
    Render,
}

/// All errors that can abort a bootstrap step.
#[derive(Debug, Error)]
pub enum BootError {
    /// No token in the environment; raised before any network call.
    #[error(
        "GITHUB_TOKEN is not set. Create a personal access token with `repo` scope, \
         export it as GITHUB_TOKEN (or GH_TOKEN), and rerun autoboot"
    )]
    MissingToken,

    /// The provider refused the token.
    #[error("token rejected by the hosting provider (HTTP {status}); check that it is valid and has `repo` scope")]
    Authentication { status: u16 },

    /// A repository with this name already exists for the account.
    #[error("a repository named '{name}' already exists on this account")]
    Conflict { name: String },

    /// The API or the push destination could not be reached.
    #[error("network failure reaching {target}: {message}")]
    Network { target: String, message: String },

    /// Any other unexpected provider response.
    #[error("hosting provider returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// An external command exited non-zero.
    #[error("`{command}` failed{}: {detail}", exit_suffix(.code))]
    ExternalTool {
        command: String,
        code: Option<i32>,
        detail: String,
    },

    /// An external program could not be spawned because it is not installed.
    #[error("`{program}` is not installed or not on PATH")]
    ToolNotFound { program: String },

    /// `git commit` refused to run without `user.name` / `user.email`.
    #[error(
        "git has no commit identity. Set one and rerun:\n  \
         git config --global user.name \"Your Name\"\n  \
         git config --global user.email \"you@example.com\""
    )]
    MissingIdentity,

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template rendering failed.
    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

impl BootError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BootError::MissingToken => ErrorKind::Configuration,
            BootError::Authentication { .. } => ErrorKind::Authentication,
            BootError::Conflict { .. } => ErrorKind::Conflict,
            BootError::Network { .. } => ErrorKind::Network,
            BootError::Api { .. } => ErrorKind::Api,
            BootError::ExternalTool { .. }
            | BootError::ToolNotFound { .. }
            | BootError::MissingIdentity => ErrorKind::ExternalTool,
            BootError::Io { .. } => ErrorKind::Io,
            BootError::Render(_) => ErrorKind::Render,
        }
    }
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!(" with exit code {c}"),
        None => " (terminated by signal)".to_string(),
    }
}

/// Convenience constructor for [`BootError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> BootError {
    BootError::Io {
        path: path.into(),
        source,
    }
}
