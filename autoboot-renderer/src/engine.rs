//! Tera rendering engine: [`ProjectFile`] enum and [`TemplateEngine`].
//!
//! | File        | Template            | Output path   |
//! |-------------|---------------------|---------------|
//! | Gitignore   | `gitignore.tera`    | `.gitignore`  |
//! | License     | `license_mit.tera`  | `LICENSE`     |

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tera::Tera;

use crate::context::TemplateContext;
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Embedded templates: baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[
    ("gitignore.tera", include_str!("templates/gitignore.tera")),
    ("license_mit.tera", include_str!("templates/license_mit.tera")),
];

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}

fn normalize_template_name(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/").to_lowercase()
}

/// Top-level `*.tera` files in `dir`. Subdirectories are ignored.
fn load_user_templates(dir: &Path) -> Result<Vec<(String, String)>, RenderError> {
    if !dir.exists() {
        return Ok(vec![]);
    }
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    let mut templates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if !meta.is_file() || path.extension().and_then(|s| s.to_str()) != Some("tera") {
            continue;
        }
        let rel = path.strip_prefix(dir).unwrap_or(path.as_path());
        let name = normalize_template_name(rel);
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        templates.push((name, contents));
    }
    Ok(templates)
}

fn build_tera(user_template_dir: Option<&Path>) -> Result<Tera, RenderError> {
    let mut templates: HashMap<String, String> = HashMap::new();
    for (name, content) in TPLS {
        templates.insert(
            normalize_template_name(Path::new(name)),
            (*content).to_string(),
        );
    }
    if let Some(dir) = user_template_dir {
        for (name, content) in load_user_templates(dir)? {
            templates.insert(name, content);
        }
    }

    let mut tera = Tera::default();
    let items: Vec<(String, String)> = templates.into_iter().collect();
    tera.add_raw_templates(items)?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// ProjectFile
// ---------------------------------------------------------------------------

/// Scaffold files autoboot knows how to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectFile {
    Gitignore,
    License,
}

impl ProjectFile {
    /// All files in the order the pipeline writes them.
    pub fn all() -> &'static [ProjectFile] {
        &[ProjectFile::Gitignore, ProjectFile::License]
    }

    pub fn template_name(&self) -> &'static str {
        match self {
            ProjectFile::Gitignore => "gitignore.tera",
            ProjectFile::License => "license_mit.tera",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ProjectFile::Gitignore => ".gitignore",
            ProjectFile::License => "LICENSE",
        }
    }

    /// Output path relative to the project root.
    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(self.file_name())
    }
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera-based engine for rendering templates with optional user overrides.
///
/// `user_template_dir` may contain `.tera` files that override embedded
/// defaults by name (`gitignore.tera`, `license_mit.tera`).
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    pub fn new(user_template_dir: Option<&Path>) -> Result<Self, RenderError> {
        let tera = build_tera(user_template_dir)?;
        Ok(TemplateEngine { tera })
    }

    /// Render `file` for the project rooted at `root`.
    ///
    /// Output uses LF line endings, has no blank-line runs left over from
    /// template conditionals, and ends with exactly one newline.
    pub fn render(
        &self,
        ctx: &TemplateContext,
        file: ProjectFile,
        root: &Path,
    ) -> Result<(PathBuf, String), RenderError> {
        let tera_ctx = ctx.to_tera_context()?;
        let raw = self.tera.render(file.template_name(), &tera_ctx)?;
        Ok((file.output_path(root), tidy(&raw)))
    }
}

fn tidy(raw: &str) -> String {
    let normalized = raw.replace("\r\n", "\n");
    let mut out = String::with_capacity(normalized.len());
    let mut blank_run = 0usize;
    for line in normalized.trim().lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
