//! The bundled template manifest and variant selection.

use std::collections::HashSet;

use super::TemplateError;
use super::context::{GenerationContext, ViewEngine};

macro_rules! bundled {
    ($path:literal) => {
        Content::Template {
            source: $path,
            text: include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/", $path)),
        }
    };
}

/// Placeholder in destination patterns replaced by the view extension.
pub const EXTENSION_PLACEHOLDER: &str = "{ext}";

/// Where a descriptor's file contents come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content {
    /// Bundled template text, rendered through the token renderer.
    Template {
        source: &'static str,
        text: &'static str,
    },
    /// The package manifest, serialized canonically.
    PackageManifest,
}

/// When a descriptor is part of the active variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    Engine(ViewEngine),
    Git,
}

impl Condition {
    pub fn holds(&self, context: &GenerationContext) -> bool {
        match self {
            Condition::Always => true,
            Condition::Engine(engine) => context.view_engine == *engine,
            Condition::Git => context.git,
        }
    }
}

/// One file the generator can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateDescriptor {
    /// Destination relative to the target directory, `/` separated.
    pub destination: &'static str,
    pub content: Content,
    pub condition: Condition,
}

impl TemplateDescriptor {
    const fn always(destination: &'static str, content: Content) -> Self {
        Self {
            destination,
            content,
            condition: Condition::Always,
        }
    }

    const fn engine(destination: &'static str, engine: ViewEngine, content: Content) -> Self {
        Self {
            destination,
            content,
            condition: Condition::Engine(engine),
        }
    }

    /// Destination path with the view extension substituted.
    pub fn destination(&self, context: &GenerationContext) -> String {
        self.destination
            .replace(EXTENSION_PLACEHOLDER, context.view_engine.extension())
    }
}

/// Every file the generator knows, in emission order.
pub static MANIFEST: &[TemplateDescriptor] = &[
    TemplateDescriptor::always("server.js", bundled!("server.js")),
    TemplateDescriptor::always("package.json", Content::PackageManifest),
    TemplateDescriptor::always("README.md", bundled!("README.md")),
    TemplateDescriptor::always(".editorconfig", bundled!("editorconfig")),
    TemplateDescriptor::always("Procfile", bundled!("Procfile")),
    TemplateDescriptor {
        destination: ".gitignore",
        content: bundled!("gitignore"),
        condition: Condition::Git,
    },
    TemplateDescriptor::always(
        "app/controllers/pages_controller.js",
        bundled!("controllers/pages_controller.js"),
    ),
    TemplateDescriptor::always(
        "app/helpers/application_helper.js",
        bundled!("helpers/application_helper.js"),
    ),
    TemplateDescriptor::engine(
        "app/views/layout.{ext}",
        ViewEngine::Jade,
        bundled!("views/jade/layout.jade"),
    ),
    TemplateDescriptor::engine(
        "app/views/pages/main.{ext}",
        ViewEngine::Jade,
        bundled!("views/jade/main.jade"),
    ),
    TemplateDescriptor::engine(
        "app/views/pages/error.{ext}",
        ViewEngine::Jade,
        bundled!("views/jade/error.jade"),
    ),
    TemplateDescriptor::engine(
        "app/views/pages/main.{ext}",
        ViewEngine::Ejs,
        bundled!("views/ejs/main.html.ejs"),
    ),
    TemplateDescriptor::engine(
        "app/views/pages/error.{ext}",
        ViewEngine::Ejs,
        bundled!("views/ejs/error.html.ejs"),
    ),
    TemplateDescriptor::always("config/routes.js", bundled!("config/routes.js")),
    TemplateDescriptor::always(
        "config/environments/all.js",
        bundled!("config/environments/all.js"),
    ),
    TemplateDescriptor::always(
        "config/environments/development.js",
        bundled!("config/environments/development.js"),
    ),
    TemplateDescriptor::always(
        "config/environments/production.js",
        bundled!("config/environments/production.js"),
    ),
    TemplateDescriptor::always(
        "config/environments/test.js",
        bundled!("config/environments/test.js"),
    ),
    TemplateDescriptor::always(
        "config/initializers/00_generic.js",
        bundled!("config/initializers/00_generic.js"),
    ),
    TemplateDescriptor::always(
        "config/initializers/01_mime.js",
        bundled!("config/initializers/01_mime.js"),
    ),
    TemplateDescriptor::always(
        "config/initializers/02_views.js",
        bundled!("config/initializers/02_views.js"),
    ),
    TemplateDescriptor::always(
        "config/initializers/10_locals.js",
        bundled!("config/initializers/10_locals.js"),
    ),
    TemplateDescriptor::always(
        "config/initializers/30_middleware.js",
        bundled!("config/initializers/30_middleware.js"),
    ),
    TemplateDescriptor::always("public/stylesheets/style.css", bundled!("public/style.css")),
    TemplateDescriptor::always("public/javascripts/main.js", bundled!("public/main.js")),
    TemplateDescriptor::always("public/robots.txt", bundled!("public/robots.txt")),
    TemplateDescriptor::always("public/images/.gitkeep", bundled!("gitkeep")),
    TemplateDescriptor::always("log/.gitkeep", bundled!("gitkeep")),
];

/// Selects the descriptors active for `context`, keeping manifest order.
///
/// Pure: no file-system access. Fails if two selected descriptors would
/// write the same destination.
pub fn select<'a>(
    manifest: &'a [TemplateDescriptor],
    context: &GenerationContext,
) -> Result<Vec<&'a TemplateDescriptor>, TemplateError> {
    let mut seen = HashSet::new();
    let mut selected = Vec::new();

    for descriptor in manifest.iter().filter(|d| d.condition.holds(context)) {
        let destination = descriptor.destination(context);
        if !seen.insert(destination.clone()) {
            return Err(TemplateError::DuplicateDestination(destination));
        }
        selected.push(descriptor);
    }

    Ok(selected)
}
