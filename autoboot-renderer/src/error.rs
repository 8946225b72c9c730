//! Rendering failures.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// A template failed to parse or render. Covers broken overrides in
    /// `~/.autoboot/templates/` as well as the embedded templates.
    #[error("template error: {0}")]
    Tera(#[from] tera::Error),

    /// `TemplateContext` could not be turned into a Tera context.
    #[error("could not build template context: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Listing or reading `~/.autoboot/templates/` failed.
    #[error("cannot read template override {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
