//! Template context: the handful of values the scaffold templates use.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use autoboot_core::{ProjectKind, ProjectName};

use crate::error::RenderError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateContext {
    /// Project name as typed, spaces and all.
    pub project_name: String,
    /// Copyright year for the license.
    pub year: i32,
    /// Copyright holder for the license.
    pub owner: String,
    /// Detected ecosystem, lowercase (`"rust"`, `"python"`, ...).
    pub kind: String,
}

impl TemplateContext {
    /// Context stamped with the current UTC year.
    pub fn new(project_name: &ProjectName, owner: &str, kind: ProjectKind) -> Self {
        Self::with_year(project_name, owner, kind, Utc::now().year())
    }

    pub fn with_year(project_name: &ProjectName, owner: &str, kind: ProjectKind, year: i32) -> Self {
        TemplateContext {
            project_name: project_name.0.clone(),
            year,
            owner: owner.to_string(),
            kind: kind.to_string(),
        }
    }

    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        let value = serde_json::to_value(self)?;
        Ok(tera::Context::from_value(value)?)
    }
}
