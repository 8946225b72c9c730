//! In-memory fakes for the pipeline's two seams.

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use autoboot_core::{AuthToken, BootstrapOptions, BootstrapRequest, ProjectName};
use autoboot_pipeline::{
    BootError, CommandOutput, CommandRunner, CreateRepository, RemoteHost, RemoteRepository,
};

// ---------------------------------------------------------------------------
// FakeRunner
// ---------------------------------------------------------------------------

struct Scripted {
    program: String,
    prefix: Vec<String>,
    output: CommandOutput,
}

/// Records every invocation. Unscripted commands succeed with empty output,
/// except `git --version`, `git diff --cached --quiet` (exit 1: something is
/// staged) and `git init`, which creates `.git` in `cwd`.
#[derive(Default)]
pub struct FakeRunner {
    calls: RefCell<Vec<Vec<String>>>,
    scripted: RefCell<Vec<Scripted>>,
    missing: RefCell<Vec<String>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `output` to `program` when its args start with `prefix`.
    pub fn respond(&self, program: &str, prefix: &[&str], output: CommandOutput) {
        self.scripted.borrow_mut().push(Scripted {
            program: program.to_string(),
            prefix: prefix.iter().map(|s| s.to_string()).collect(),
            output,
        });
    }

    /// Pretend `program` is not installed.
    pub fn missing(&self, program: &str) {
        self.missing.borrow_mut().push(program.to_string());
    }

    /// Every call as `[program, args…]`.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }

    pub fn called(&self, cmd: &[&str]) -> bool {
        self.calls
            .borrow()
            .iter()
            .any(|c| c.iter().map(String::as_str).eq(cmd.iter().copied()))
    }

    pub fn called_with_prefix(&self, prefix: &[&str]) -> bool {
        self.calls
            .borrow()
            .iter()
            .any(|c| c.len() >= prefix.len() && c.iter().zip(prefix).all(|(a, b)| a == b))
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput, BootError> {
        let mut call = vec![program.to_string()];
        call.extend(args.iter().map(|a| a.to_string()));
        self.calls.borrow_mut().push(call);

        if self.missing.borrow().iter().any(|m| m == program) {
            return Err(BootError::ToolNotFound {
                program: program.to_string(),
            });
        }

        let scripted = self.scripted.borrow();
        let hit = scripted.iter().find(|s| {
            s.program == program
                && args.len() >= s.prefix.len()
                && s.prefix.iter().zip(args).all(|(p, a)| p == a)
        });
        if let Some(s) = hit {
            return Ok(s.output.clone());
        }

        if program == "git" && args == ["--version"] {
            return Ok(ok("git version 2.43.0\n"));
        }
        if program == "git" && args == ["diff", "--cached", "--quiet"] {
            return Ok(failed(1, "", ""));
        }
        if program == "git" && args == ["init"] {
            std::fs::create_dir_all(cwd.join(".git")).expect("fake git init");
        }
        Ok(ok(""))
    }
}

pub fn ok(stdout: &str) -> CommandOutput {
    CommandOutput {
        code: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

pub fn failed(code: i32, stdout: &str, stderr: &str) -> CommandOutput {
    CommandOutput {
        code: Some(code),
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
    }
}

// ---------------------------------------------------------------------------
// FakeHost
// ---------------------------------------------------------------------------

/// Returns a fixed repository, or a fresh error from `fail`.
pub struct FakeHost {
    clone_url: String,
    fail: Option<fn(&str) -> BootError>,
    calls: RefCell<Vec<CreateRepository>>,
}

impl FakeHost {
    pub fn ok() -> Self {
        Self::with_clone_url("https://github.com/octo/demo-app.git")
    }

    pub fn with_clone_url(url: &str) -> Self {
        Self {
            clone_url: url.to_string(),
            fail: None,
            calls: RefCell::new(vec![]),
        }
    }

    pub fn failing(fail: fn(&str) -> BootError) -> Self {
        Self {
            fail: Some(fail),
            ..Self::ok()
        }
    }

    pub fn calls(&self) -> Vec<CreateRepository> {
        self.calls.borrow().clone()
    }
}

impl RemoteHost for FakeHost {
    fn create_repository(
        &self,
        spec: &CreateRepository,
        _token: &AuthToken,
    ) -> Result<RemoteRepository, BootError> {
        self.calls.borrow_mut().push(spec.clone());
        if let Some(fail) = self.fail {
            return Err(fail(&spec.name));
        }
        Ok(RemoteRepository {
            clone_url: self.clone_url.clone(),
            html_url: format!("https://github.com/octo/{}", spec.name),
            full_name: format!("octo/{}", spec.name),
        })
    }
}

pub fn conflict(name: &str) -> BootError {
    BootError::Conflict {
        name: name.to_string(),
    }
}

pub fn unreachable(_: &str) -> BootError {
    BootError::Network {
        target: "https://api.github.com/user/repos".to_string(),
        message: "Connection refused".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub fn request(dir: &Path, name: &str) -> BootstrapRequest {
    request_with(dir, name, Some("ghp_test"), BootstrapOptions::default())
}

pub fn request_with(
    dir: &Path,
    name: &str,
    token: Option<&str>,
    options: BootstrapOptions,
) -> BootstrapRequest {
    BootstrapRequest::new(
        ProjectName::from(name),
        PathBuf::from(dir),
        AuthToken::from_env_value(token.map(str::to_string)),
        options,
    )
    .expect("valid request")
}
