//! Step identifiers and per-step outcomes.

use std::fmt;

use thiserror::Error;

use autoboot_core::ProjectKind;

use crate::error::BootError;
use crate::remote::RemoteRepository;

/// Pipeline steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Preflight,
    Gitignore,
    License,
    Audit,
    InitRepository,
    Commit,
    CreateRemote,
    LinkRemote,
    Push,
}

impl Step {
    pub fn all() -> &'static [Step] {
        &[
            Step::Preflight,
            Step::Gitignore,
            Step::License,
            Step::Audit,
            Step::InitRepository,
            Step::Commit,
            Step::CreateRemote,
            Step::LinkRemote,
            Step::Push,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Step::Preflight => "preflight",
            Step::Gitignore => "gitignore",
            Step::License => "license",
            Step::Audit => "audit",
            Step::InitRepository => "init",
            Step::Commit => "commit",
            Step::CreateRemote => "create-remote",
            Step::LinkRemote => "link-remote",
            Step::Push => "push",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a step ended when it did not abort the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step did its work.
    Done(String),
    /// Precondition already held; nothing to do.
    Skipped(String),
    /// Something went wrong but the run continues.
    Advisory(String),
}

impl StepOutcome {
    pub fn message(&self) -> &str {
        match self {
            StepOutcome::Done(m) | StepOutcome::Skipped(m) | StepOutcome::Advisory(m) => m,
        }
    }

    pub fn is_advisory(&self) -> bool {
        matches!(self, StepOutcome::Advisory(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub step: Step,
    pub outcome: StepOutcome,
    /// Captured tool output worth showing the user (audit runs).
    pub output: Option<String>,
}

/// Result of a run that reached the end.
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    pub kind: ProjectKind,
    pub steps: Vec<StepReport>,
    pub remote: RemoteRepository,
    pub branch: String,
    /// `false` when the push was skipped because nothing was committed.
    pub pushed: bool,
}

impl BootstrapReport {
    pub fn advisories(&self) -> impl Iterator<Item = &StepReport> {
        self.steps.iter().filter(|s| s.outcome.is_advisory())
    }
}

/// The step that aborted the run, its cause, and what ran before it.
#[derive(Debug, Error)]
#[error("step '{step}' failed")]
pub struct StepFailure {
    pub step: Step,
    #[source]
    pub error: BootError,
    pub completed: Vec<StepReport>,
}
