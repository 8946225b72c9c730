//! The bootstrap pipeline.
//!
//! ```text
//! preflight → gitignore → license → audit → init → commit
//!           → create-remote → link-remote → push
//! ```
//!
//! Advisory conditions (file already present, nothing to commit, audit
//! findings, missing audit tool) are recorded and the run continues. Anything
//! else stops the run with a [`StepFailure`]. Nothing is rolled back.

use autoboot_core::{BootstrapRequest, ProjectKind};
use autoboot_detector::{audit_command, detect_kind, security_scan_command, AuditCommand};
use autoboot_renderer::{ProjectFile, TemplateContext, TemplateEngine};

use crate::error::BootError;
use crate::git::{CommitOutcome, Git, RemoteLink};
use crate::remote::{CreateRepository, RemoteHost};
use crate::report::{BootstrapReport, Step, StepFailure, StepOutcome, StepReport};
use crate::runner::CommandRunner;
use crate::writer::{self, WriteResult};

/// Name of the remote the pipeline creates or repoints.
pub const REMOTE_NAME: &str = "origin";

/// Collects step reports and forwards each one to the caller as it lands.
struct Progress<'f> {
    steps: Vec<StepReport>,
    on_step: &'f mut dyn FnMut(&StepReport),
}

impl Progress<'_> {
    fn record(&mut self, step: Step, outcome: StepOutcome) {
        self.record_with_output(step, outcome, None);
    }

    fn record_with_output(&mut self, step: Step, outcome: StepOutcome, output: Option<String>) {
        match &outcome {
            StepOutcome::Advisory(msg) => tracing::warn!(step = %step, "{msg}"),
            other => tracing::info!(step = %step, "{}", other.message()),
        }
        let report = StepReport {
            step,
            outcome,
            output,
        };
        (self.on_step)(&report);
        self.steps.push(report);
    }

    fn fail(&mut self, step: Step, error: BootError) -> StepFailure {
        tracing::error!(step = %step, error = %error, "step failed");
        StepFailure {
            step,
            error,
            completed: std::mem::take(&mut self.steps),
        }
    }
}

/// Runs the pipeline against injected collaborators.
pub struct Bootstrapper<'a> {
    runner: &'a dyn CommandRunner,
    host: &'a dyn RemoteHost,
    engine: &'a TemplateEngine,
}

impl<'a> Bootstrapper<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        host: &'a dyn RemoteHost,
        engine: &'a TemplateEngine,
    ) -> Self {
        Self {
            runner,
            host,
            engine,
        }
    }

    pub fn run(&self, req: &BootstrapRequest) -> Result<BootstrapReport, StepFailure> {
        self.run_with(req, |_| {})
    }

    /// Like [`run`](Self::run), calling `on_step` after every completed step.
    pub fn run_with(
        &self,
        req: &BootstrapRequest,
        mut on_step: impl FnMut(&StepReport),
    ) -> Result<BootstrapReport, StepFailure> {
        let mut progress = Progress {
            steps: Vec::new(),
            on_step: &mut on_step,
        };
        let dir = req.working_dir.as_path();
        let git = Git::new(self.runner, dir);

        // 0. preflight
        let version = git.version().map_err(|e| progress.fail(Step::Preflight, e))?;
        let kind = detect_kind(dir).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "project detection failed; treating as unknown");
            ProjectKind::Unknown
        });
        progress.record(
            Step::Preflight,
            StepOutcome::Done(format!("{version}; {kind} project")),
        );

        // 1-2. scaffold files
        let ctx = TemplateContext::new(&req.project_name, &req.options.license_owner, kind);
        for (step, file) in [
            (Step::Gitignore, ProjectFile::Gitignore),
            (Step::License, ProjectFile::License),
        ] {
            let outcome = self
                .scaffold(&ctx, file, req)
                .map_err(|e| progress.fail(step, e))?;
            progress.record(step, outcome);
        }

        // 3. audits
        self.audit(req, kind, &mut progress);

        // 4. init
        if git.is_repository() {
            progress.record(
                Step::InitRepository,
                StepOutcome::Skipped("already a git repository".to_string()),
            );
        } else {
            git.init().map_err(|e| progress.fail(Step::InitRepository, e))?;
            progress.record(
                Step::InitRepository,
                StepOutcome::Done("initialized git repository".to_string()),
            );
        }

        // 5. stage + commit
        let committed = git
            .add_all()
            .and_then(|_| git.commit(&req.options.commit_message))
            .map_err(|e| progress.fail(Step::Commit, e))?;
        progress.record(
            Step::Commit,
            match committed {
                CommitOutcome::Created => {
                    StepOutcome::Done(format!("created commit \"{}\"", req.options.commit_message))
                }
                CommitOutcome::NothingToCommit => {
                    StepOutcome::Advisory("nothing to commit, working tree clean".to_string())
                }
            },
        );

        // 6. create remote
        let token = req
            .token
            .as_ref()
            .ok_or(BootError::MissingToken)
            .map_err(|e| progress.fail(Step::CreateRemote, e))?;
        let spec = CreateRepository {
            name: req.repo_name.as_str().to_string(),
            private: req.options.private,
            description: req.options.description.clone(),
            auto_init: false,
        };
        let remote = self
            .host
            .create_repository(&spec, token)
            .map_err(|e| progress.fail(Step::CreateRemote, e))?;
        progress.record(
            Step::CreateRemote,
            StepOutcome::Done(format!("created {}", remote.html_url)),
        );

        // 7. link
        let link = git
            .link_remote(REMOTE_NAME, &remote.clone_url)
            .map_err(|e| progress.fail(Step::LinkRemote, e))?;
        let verb = match link {
            RemoteLink::Added => "added",
            RemoteLink::Updated => "repointed",
        };
        progress.record(
            Step::LinkRemote,
            StepOutcome::Done(format!("{verb} {REMOTE_NAME} -> {}", remote.clone_url)),
        );

        // 8. push
        let branch = req.options.branch.clone();
        let has_commits = git
            .has_commits()
            .map_err(|e| progress.fail(Step::Push, e))?;
        if has_commits {
            git.rename_branch(&branch)
                .and_then(|_| git.push(REMOTE_NAME, &branch))
                .map_err(|e| progress.fail(Step::Push, e))?;
            progress.record(
                Step::Push,
                StepOutcome::Done(format!("pushed {branch} to {REMOTE_NAME}")),
            );
        } else {
            progress.record(
                Step::Push,
                StepOutcome::Advisory("nothing to push: repository has no commits".to_string()),
            );
        }

        Ok(BootstrapReport {
            kind,
            steps: progress.steps,
            remote,
            branch,
            pushed: has_commits,
        })
    }

    fn scaffold(
        &self,
        ctx: &TemplateContext,
        file: ProjectFile,
        req: &BootstrapRequest,
    ) -> Result<StepOutcome, BootError> {
        let path = file.output_path(&req.working_dir);
        if writer::exists(&path) {
            return Ok(StepOutcome::Skipped(format!(
                "{} already exists",
                file.file_name()
            )));
        }
        let (path, content) = self.engine.render(ctx, file, &req.working_dir)?;
        Ok(match writer::write_if_absent(&path, &content)? {
            WriteResult::Written { .. } => StepOutcome::Done(format!("created {}", file.file_name())),
            WriteResult::AlreadyExists { .. } => {
                StepOutcome::Skipped(format!("{} already exists", file.file_name()))
            }
        })
    }

    /// Advisory only: nothing in here can abort the run.
    fn audit(&self, req: &BootstrapRequest, kind: ProjectKind, progress: &mut Progress<'_>) {
        let audit = req.options.audit;
        if !audit.dependencies && !audit.security_scan {
            progress.record(Step::Audit, StepOutcome::Skipped("audit disabled".to_string()));
            return;
        }

        let dir = req.working_dir.as_path();
        if audit.dependencies {
            match audit_command(kind, dir) {
                Some(cmd) => self.run_check(&cmd, req, progress),
                None => progress.record(
                    Step::Audit,
                    StepOutcome::Advisory(format!("no dependency audit available for {kind} projects")),
                ),
            }
        }
        if audit.security_scan {
            match security_scan_command(kind) {
                Some(cmd) => self.run_check(&cmd, req, progress),
                None => progress.record(
                    Step::Audit,
                    StepOutcome::Advisory(format!("no security scan available for {kind} projects")),
                ),
            }
        }
    }

    fn run_check(&self, cmd: &AuditCommand, req: &BootstrapRequest, progress: &mut Progress<'_>) {
        let args: Vec<&str> = cmd.args.iter().map(String::as_str).collect();
        let shown = cmd.display();
        match self.runner.run(&cmd.program, &args, &req.working_dir) {
            Ok(out) => {
                let captured = format!("{}{}", out.stdout, out.stderr);
                let output = Some(captured.trim().to_string()).filter(|s| !s.is_empty());
                let outcome = if out.success() {
                    StepOutcome::Done(format!("`{shown}` passed"))
                } else {
                    let code = out
                        .code
                        .map(|c| format!("exit code {c}"))
                        .unwrap_or_else(|| "terminated".to_string());
                    StepOutcome::Advisory(format!("`{shown}` reported problems ({code})"))
                };
                progress.record_with_output(Step::Audit, outcome, output);
            }
            Err(BootError::ToolNotFound { program }) => progress.record(
                Step::Audit,
                StepOutcome::Advisory(format!("`{program}` is not installed; skipped `{shown}`")),
            ),
            Err(e) => progress.record(
                Step::Audit,
                StepOutcome::Advisory(format!("could not run `{shown}`: {e}")),
            ),
        }
    }
}
