//! Template manifest, generation context and rendering.
//!
//! Everything in this module works in memory. Given a [`GenerationContext`]
//! it computes which files belong to the active variant and what each of
//! them contains; writing them is left to the generator.

pub mod context;
pub mod manifest;
pub mod package;
pub mod render;

pub use context::{GenerationContext, ViewEngine, sanitize_app_name};
pub use manifest::{Condition, Content, MANIFEST, TemplateDescriptor};
pub use render::Renderer;

use thiserror::Error;

/// Errors raised while selecting or rendering templates.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Unknown token '{token}' in template {template}")]
    UnknownToken { template: String, token: String },

    #[error("Two templates map to the same destination: {0}")]
    DuplicateDestination(String),

    #[error("Failed to serialize package manifest: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// A file of the active variant, rendered in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Path relative to the target directory, `/` separated.
    pub path: String,
    pub contents: String,
}

/// Selects and renders every file of the variant described by `context`.
pub fn render_variant(context: &GenerationContext) -> Result<Vec<RenderedFile>, TemplateError> {
    let renderer = Renderer::new(context);

    manifest::select(MANIFEST, context)?
        .into_iter()
        .map(|descriptor| -> Result<RenderedFile, TemplateError> {
            let contents = match descriptor.content {
                Content::Template { source, text } => renderer.render(source, text)?,
                Content::PackageManifest => package::render_package_manifest(context)?,
            };

            Ok(RenderedFile {
                path: descriptor.destination(context),
                contents,
            })
        })
        .collect()
}
