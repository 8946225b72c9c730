//! autoboot core library: domain types, user config, errors.
//!
//! - [`types`]: newtypes and the [`BootstrapRequest`] handed to the pipeline
//! - [`error`]: [`ConfigError`]
//! - [`config`]: `~/.autoboot/config.yaml` loading

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::ConfigError;
pub use types::{
    AuditOptions, AuthToken, BootstrapOptions, BootstrapRequest, ProjectKind, ProjectName,
    RepoName,
};
