//! Project detection for `autoboot-detector`.
//!
//! `detect_kind(path)` inspects indicator files in a project root and returns
//! the [`ProjectKind`]. Checks are ordered by specificity: language-specific
//! manifests take priority over generic ones (`package.json`, `requirements.txt`).
//!
//! [`audit_command`] and [`security_scan_command`] then map a kind to the
//! external tool autoboot runs in its advisory audit step.

use std::fs;
use std::path::{Path, PathBuf};

use autoboot_core::ProjectKind;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// An external command line: program plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl AuditCommand {
    fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Shell-style rendering for log and progress lines.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Errors from project detection.
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Detect the ecosystem of the project at `path`.
///
/// Returns [`ProjectKind::Unknown`] when no indicator file is present.
pub fn detect_kind(path: &Path) -> Result<ProjectKind, DetectError> {
    if path.join("Cargo.toml").is_file() {
        return Ok(ProjectKind::Rust);
    }
    if path.join("go.mod").is_file() {
        return Ok(ProjectKind::Go);
    }
    if path.join("Gemfile").is_file() {
        return Ok(ProjectKind::Ruby);
    }
    if path.join("composer.json").is_file() {
        return Ok(ProjectKind::Php);
    }
    if let Some(kind) = detect_javascript(path)? {
        return Ok(kind);
    }
    if detect_python(path) {
        return Ok(ProjectKind::Python);
    }
    Ok(ProjectKind::Unknown)
}

/// Dependency audit for `kind`, or `None` when autoboot has no audit for it.
pub fn audit_command(kind: ProjectKind, path: &Path) -> Option<AuditCommand> {
    match kind {
        ProjectKind::Rust => Some(AuditCommand::new("cargo", &["audit"])),
        ProjectKind::Go => Some(AuditCommand::new("govulncheck", &["./..."])),
        ProjectKind::Ruby => Some(AuditCommand::new("bundle", &["audit", "check"])),
        ProjectKind::Php => Some(AuditCommand::new("composer", &["audit"])),
        ProjectKind::JavaScript | ProjectKind::TypeScript => {
            Some(AuditCommand::new("npm", &["audit"]))
        }
        ProjectKind::Python => {
            if path.join("requirements.txt").is_file() {
                Some(AuditCommand::new("pip-audit", &["-r", "requirements.txt"]))
            } else {
                Some(AuditCommand::new("pip-audit", &[]))
            }
        }
        ProjectKind::Unknown => None,
    }
}

/// Static security scan for `kind`, if one is wired up.
pub fn security_scan_command(kind: ProjectKind) -> Option<AuditCommand> {
    match kind {
        ProjectKind::Python => Some(AuditCommand::new("bandit", &["-r", ".", "-q"])),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Language detectors
// ---------------------------------------------------------------------------

fn detect_javascript(path: &Path) -> Result<Option<ProjectKind>, DetectError> {
    let file = path.join("package.json");
    if !file.is_file() {
        return Ok(None);
    }
    if path.join("tsconfig.json").is_file() {
        return Ok(Some(ProjectKind::TypeScript));
    }

    let content = fs::read_to_string(&file).map_err(|e| DetectError::Io {
        path: file.clone(),
        source: e,
    })?;
    // A malformed manifest still marks a JavaScript project.
    let is_typescript = serde_json::from_str::<serde_json::Value>(&content)
        .map(|json| declares_dependency(&json, "typescript"))
        .unwrap_or(false);

    Ok(Some(if is_typescript {
        ProjectKind::TypeScript
    } else {
        ProjectKind::JavaScript
    }))
}

fn detect_python(path: &Path) -> bool {
    ["requirements.txt", "pyproject.toml", "Pipfile", "setup.py"]
        .iter()
        .any(|f| path.join(f).is_file())
}

// ---------------------------------------------------------------------------
// Utilities
// ---------------------------------------------------------------------------

fn declares_dependency(json: &serde_json::Value, name: &str) -> bool {
    ["dependencies", "devDependencies", "peerDependencies"]
        .iter()
        .filter_map(|key| json.get(key).and_then(|v| v.as_object()))
        .any(|deps| deps.contains_key(name))
}
