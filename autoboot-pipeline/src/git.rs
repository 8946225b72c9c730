//! Thin `git` wrapper over a [`CommandRunner`].
//!
//! Only plain porcelain commands are used; output is classified here so the
//! orchestrator deals in outcomes rather than exit codes and stderr strings.

use std::path::Path;

use crate::error::BootError;
use crate::runner::{CommandOutput, CommandRunner};

/// Result of `git commit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Created,
    NothingToCommit,
}

/// Result of pointing a remote at a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteLink {
    Added,
    Updated,
}

const NETWORK_MARKERS: &[&str] = &[
    "could not resolve host",
    "connection refused",
    "connection timed out",
    "operation timed out",
    "network is unreachable",
];

const IDENTITY_MARKERS: &[&str] = &[
    "please tell me who you are",
    "author identity unknown",
    "user.email",
    "user.name",
];

pub struct Git<'a> {
    runner: &'a dyn CommandRunner,
    dir: &'a Path,
}

impl<'a> Git<'a> {
    pub fn new(runner: &'a dyn CommandRunner, dir: &'a Path) -> Self {
        Self { runner, dir }
    }

    fn raw(&self, args: &[&str]) -> Result<CommandOutput, BootError> {
        self.runner.run("git", args, self.dir)
    }

    fn checked(&self, args: &[&str]) -> Result<CommandOutput, BootError> {
        let out = self.raw(args)?;
        if out.success() {
            Ok(out)
        } else {
            Err(tool_error(args, &out))
        }
    }

    /// `git --version`, trimmed. Fails with `ToolNotFound` if git is missing.
    pub fn version(&self) -> Result<String, BootError> {
        Ok(self.checked(&["--version"])?.stdout.trim().to_string())
    }

    /// Whether the working directory itself holds a `.git` entry.
    ///
    /// A parent directory being a repository does not count.
    pub fn is_repository(&self) -> bool {
        self.dir.join(".git").exists()
    }

    pub fn init(&self) -> Result<(), BootError> {
        self.checked(&["init"]).map(|_| ())
    }

    pub fn add_all(&self) -> Result<(), BootError> {
        self.checked(&["add", "-A"]).map(|_| ())
    }

    /// Commit whatever is staged.
    ///
    /// An empty index is detected with `git diff --cached --quiet` rather than
    /// from commit output, which is localized.
    pub fn commit(&self, message: &str) -> Result<CommitOutcome, BootError> {
        if !self.has_staged_changes()? {
            return Ok(CommitOutcome::NothingToCommit);
        }

        let args = ["commit", "-m", message];
        let out = self.raw(&args)?;
        if out.success() {
            return Ok(CommitOutcome::Created);
        }

        let text = format!("{}\n{}", out.stdout, out.stderr).to_lowercase();
        if text.contains("nothing to commit") || text.contains("nothing added to commit") {
            Ok(CommitOutcome::NothingToCommit)
        } else if IDENTITY_MARKERS.iter().any(|m| text.contains(m)) {
            Err(BootError::MissingIdentity)
        } else {
            Err(tool_error(&args, &out))
        }
    }

    /// `git diff --cached --quiet`: exit 1 means the index differs from
    /// `HEAD` (or from the empty tree on an unborn branch).
    pub fn has_staged_changes(&self) -> Result<bool, BootError> {
        let args = ["diff", "--cached", "--quiet"];
        let out = self.raw(&args)?;
        match out.code {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(tool_error(&args, &out)),
        }
    }

    /// Whether `HEAD` resolves to a commit.
    pub fn has_commits(&self) -> Result<bool, BootError> {
        Ok(self.raw(&["rev-parse", "--verify", "--quiet", "HEAD"])?.success())
    }

    /// `git branch -M <branch>`: rename the current branch, replacing any
    /// branch already called `branch`.
    pub fn rename_branch(&self, branch: &str) -> Result<(), BootError> {
        self.checked(&["branch", "-M", branch]).map(|_| ())
    }

    pub fn remotes(&self) -> Result<Vec<String>, BootError> {
        let out = self.checked(&["remote"])?;
        Ok(out
            .stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Point remote `name` at `url`, adding it if absent.
    pub fn link_remote(&self, name: &str, url: &str) -> Result<RemoteLink, BootError> {
        if self.remotes()?.iter().any(|r| r == name) {
            self.checked(&["remote", "set-url", name, url])?;
            Ok(RemoteLink::Updated)
        } else {
            self.checked(&["remote", "add", name, url])?;
            Ok(RemoteLink::Added)
        }
    }

    /// `git push -u <remote> <branch>`.
    pub fn push(&self, remote: &str, branch: &str) -> Result<(), BootError> {
        let args = ["push", "-u", remote, branch];
        let out = self.raw(&args)?;
        if out.success() {
            return Ok(());
        }
        let detail = out.detail();
        let lower = detail.to_lowercase();
        if NETWORK_MARKERS.iter().any(|m| lower.contains(m)) {
            Err(BootError::Network {
                target: format!("remote '{remote}'"),
                message: detail,
            })
        } else {
            Err(tool_error(&args, &out))
        }
    }
}

fn tool_error(args: &[&str], out: &CommandOutput) -> BootError {
    BootError::ExternalTool {
        command: format!("git {}", args.join(" ")),
        code: out.code,
        detail: out.detail(),
    }
}
