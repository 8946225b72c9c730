//! # autoboot-pipeline
//!
//! First-commit bootstrap: scaffold files, advisory audits, local git
//! repository, remote creation and the initial push.
//!
//! Collaborators are injected: [`CommandRunner`] for every external process
//! and [`RemoteHost`] for the provider API. Build a [`Bootstrapper`] with the
//! real ones ([`SystemRunner`], [`GitHubClient`]) or with fakes in tests.

pub mod error;
pub mod git;
pub mod pipeline;
pub mod remote;
pub mod report;
pub mod runner;
pub mod writer;

pub use error::{BootError, ErrorKind};
pub use pipeline::{Bootstrapper, REMOTE_NAME};
pub use remote::{CreateRepository, GitHubClient, RemoteHost, RemoteRepository};
pub use report::{BootstrapReport, Step, StepFailure, StepOutcome, StepReport};
pub use runner::{CommandOutput, CommandRunner, SystemRunner};
pub use writer::WriteResult;
