//! autoboot: first-commit bootstrap for a project directory.
//!
//! # Usage
//!
//! ```text
//! autoboot [NAME] [--private] [--no-audit] [--security-scan]
//!          [--desc <TEXT>] [--branch <BRANCH>] [--owner <NAME>]
//! ```
//!
//! Exit codes: `0` success, `2` configuration or credentials, `3` remote
//! side (conflict, network, API), `1` anything else.

mod commands;

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use autoboot_core::ConfigError;
use autoboot_pipeline::{BootError, ErrorKind, StepFailure};
use commands::bootstrap::BootstrapArgs;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "autoboot",
    version,
    about = "Bootstrap a project: .gitignore, LICENSE, audits, git init, GitHub repo, push",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    args: BootstrapArgs,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match cli.args.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::from(exit_code(&err))
        }
    }
}

fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(failure) = err.downcast_ref::<StepFailure>() {
        return code_for(failure.error.kind());
    }
    if let Some(boot) = err.downcast_ref::<BootError>() {
        return code_for(boot.kind());
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        return 2;
    }
    1
}

fn code_for(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::Configuration | ErrorKind::Authentication => 2,
        ErrorKind::Conflict | ErrorKind::Network | ErrorKind::Api => 3,
        ErrorKind::ExternalTool | ErrorKind::Io | ErrorKind::Render => 1,
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
