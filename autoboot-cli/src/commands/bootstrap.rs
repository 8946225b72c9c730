//! `autoboot [NAME]`: the whole bootstrap run.
//!
//! This is the only place that reads the environment, the current directory
//! and `~/.autoboot/`. Everything is folded into a [`BootstrapRequest`] and
//! handed to the pipeline.

use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use autoboot_core::{config, AuthToken, BootstrapOptions, BootstrapRequest, Config, ProjectName};
use autoboot_pipeline::{
    BootstrapReport, Bootstrapper, GitHubClient, StepOutcome, StepReport, SystemRunner,
};
use autoboot_renderer::TemplateEngine;

const TOKEN_VARS: &[&str] = &["GITHUB_TOKEN", "GH_TOKEN"];
const API_URL_VAR: &str = "AUTOBOOT_API_URL";
const MAX_OUTPUT_LINES: usize = 20;

/// Arguments for `autoboot`.
#[derive(Args, Debug)]
pub struct BootstrapArgs {
    /// Project name; may contain spaces (quote it). Defaults to the current
    /// directory's name. The remote repository gets a sanitized form
    /// (`"demo app"` becomes `demo-app`).
    pub name: Option<String>,

    /// Create the remote repository as private.
    #[arg(long)]
    pub private: bool,

    /// Skip the dependency audit.
    #[arg(long)]
    pub no_audit: bool,

    /// Also run a static security scan (e.g. bandit for Python projects).
    #[arg(long)]
    pub security_scan: bool,

    /// Description for the remote repository.
    #[arg(long = "desc", value_name = "TEXT")]
    pub description: Option<String>,

    /// Branch to push (default: "main").
    #[arg(long)]
    pub branch: Option<String>,

    /// Copyright holder written into LICENSE.
    #[arg(long, value_name = "NAME")]
    pub owner: Option<String>,
}

impl BootstrapArgs {
    pub fn run(self) -> Result<()> {
        let home = config::home().ok();
        let cfg = match home.as_deref() {
            Some(h) => config::load_at(h).context("failed to load autoboot config")?,
            None => Config::default(),
        };

        let cwd = env::current_dir().context("cannot determine current directory")?;
        let name = match self.name.clone() {
            Some(n) => n,
            None => dir_name(&cwd)?,
        };
        let token = resolve_token(|var| env::var(var).ok());
        let api_url = env::var(API_URL_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| cfg.api_url().to_string());

        let options = self.apply(cfg.options());
        let request = BootstrapRequest::new(ProjectName::from(name), cwd, token, options)?;

        let template_dir = home.as_deref().map(config::templates_dir_at);
        let engine =
            TemplateEngine::new(template_dir.as_deref()).context("failed to load templates")?;
        tracing::debug!(
            repo = %request.repo_name,
            dir = %request.working_dir.display(),
            api = %api_url,
            "starting bootstrap"
        );
        let host = GitHubClient::new(api_url);

        print_header(&request);
        let report = Bootstrapper::new(&SystemRunner, &host, &engine)
            .run_with(&request, print_step)?;
        print_summary(&report);
        Ok(())
    }

    /// Command-line flags win over config values.
    fn apply(&self, mut options: BootstrapOptions) -> BootstrapOptions {
        if self.private {
            options.private = true;
        }
        if self.no_audit {
            options.audit.dependencies = false;
        }
        if self.security_scan {
            options.audit.security_scan = true;
        }
        if let Some(d) = &self.description {
            options.description = d.clone();
        }
        if let Some(b) = &self.branch {
            options.branch = b.clone();
        }
        if let Some(o) = &self.owner {
            options.license_owner = o.clone();
        }
        options
    }
}

/// First non-blank token among `GITHUB_TOKEN`, `GH_TOKEN`.
fn resolve_token(lookup: impl Fn(&str) -> Option<String>) -> Option<AuthToken> {
    TOKEN_VARS
        .iter()
        .find_map(|var| AuthToken::from_env_value(lookup(var)))
}

fn dir_name(cwd: &Path) -> Result<String> {
    cwd.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| {
            format!(
                "cannot derive a project name from '{}'; pass one explicitly",
                cwd.display()
            )
        })
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn print_header(request: &BootstrapRequest) {
    println!(
        "{} '{}' → repository '{}'",
        "autoboot".bold(),
        request.project_name,
        request.repo_name
    );
    if request.token.is_none() {
        println!(
            "  {} no GITHUB_TOKEN set; local steps will run, remote creation will not",
            "!".yellow().bold()
        );
    }
}

fn print_step(report: &StepReport) {
    let mark = match &report.outcome {
        StepOutcome::Done(_) => "✓".green().bold(),
        StepOutcome::Skipped(_) => "·".dimmed(),
        StepOutcome::Advisory(_) => "!".yellow().bold(),
    };
    println!("{mark} [{}] {}", report.step, report.outcome.message());

    if let Some(output) = &report.output {
        let lines: Vec<&str> = output.lines().collect();
        for line in lines.iter().take(MAX_OUTPUT_LINES) {
            println!("    {}", line.dimmed());
        }
        if lines.len() > MAX_OUTPUT_LINES {
            println!("    … ({} more lines)", lines.len() - MAX_OUTPUT_LINES);
        }
    }
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "")]
    field: &'static str,
    #[tabled(rename = "")]
    value: String,
}

fn print_summary(report: &BootstrapReport) {
    let pushed = if report.pushed {
        format!("{} (pushed)", report.branch)
    } else {
        format!("{} (nothing pushed)", report.branch)
    };
    let rows = vec![
        SummaryRow {
            field: "repository",
            value: report.remote.html_url.clone(),
        },
        SummaryRow {
            field: "clone url",
            value: report.remote.clone_url.clone(),
        },
        SummaryRow {
            field: "branch",
            value: pushed,
        },
        SummaryRow {
            field: "project kind",
            value: report.kind.to_string(),
        },
        SummaryRow {
            field: "advisories",
            value: report.advisories().count().to_string(),
        },
    ];

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("\n{}", "Done.".green().bold());
    println!("{table}");
}
