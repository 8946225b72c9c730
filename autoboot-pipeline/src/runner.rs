//! Process execution seam.
//!
//! Everything the pipeline shells out to goes through [`CommandRunner`], so
//! tests can script git and audit tools without touching the real ones.

use std::io::ErrorKind as IoErrorKind;
use std::path::Path;
use std::process::Command;

use crate::error::{io_err, BootError};

/// Captured result of one external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// stderr if it has anything to say, otherwise stdout. Trimmed.
    pub fn detail(&self) -> String {
        let err = self.stderr.trim();
        if err.is_empty() {
            self.stdout.trim().to_string()
        } else {
            err.to_string()
        }
    }
}

pub trait CommandRunner {
    /// Run `program args…` in `cwd` and capture its output.
    ///
    /// A non-zero exit is *not* an error here; callers decide. Errors are
    /// reserved for failing to spawn the process at all.
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput, BootError>;
}

/// Runs real processes via `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput, BootError> {
        tracing::debug!(program, ?args, cwd = %cwd.display(), "spawning");
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|e| match e.kind() {
                IoErrorKind::NotFound => BootError::ToolNotFound {
                    program: program.to_string(),
                },
                _ => io_err(cwd, e),
            })?;

        let out = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        tracing::debug!(program, code = ?out.code, "finished");
        Ok(out)
    }
}
