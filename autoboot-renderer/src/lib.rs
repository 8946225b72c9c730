//! # autoboot-renderer
//!
//! Tera-based engine that renders the scaffold files autoboot drops into a
//! fresh project: `.gitignore` and an MIT `LICENSE`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use autoboot_core::{ProjectKind, ProjectName};
//! use autoboot_renderer::{ProjectFile, TemplateContext, TemplateEngine};
//!
//! fn preview(root: &Path) {
//!     let ctx = TemplateContext::new(&ProjectName::from("demo"), "YOUR NAME", ProjectKind::Rust);
//!     if let Ok(engine) = TemplateEngine::new(None) {
//!         for file in ProjectFile::all() {
//!             if let Ok((path, content)) = engine.render(&ctx, *file, root) {
//!                 println!("{}: {} bytes", path.display(), content.len());
//!             }
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::TemplateContext;
pub use engine::{ProjectFile, TemplateEngine};
pub use error::RenderError;
