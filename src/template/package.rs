//! Canonical `package.json` rendering.
//!
//! The manifest is built from typed data rather than a text template so
//! its key order never depends on map iteration order: top-level keys keep
//! struct declaration order and dependency keys are sorted.

use std::collections::BTreeMap;

use serde::Serialize;

use super::TemplateError;
use super::context::GenerationContext;

/// Version written into every generated manifest.
pub const PACKAGE_VERSION: &str = "0.0.1";

/// Dependencies shared by every variant, as `(package, version pin)`.
pub const BASE_DEPENDENCIES: &[(&str, &str)] = &[
    ("body-parser", "~1.13.2"),
    ("bootable", "0.2.x"),
    ("bootable-environment", "0.2.x"),
    ("connect-powered-by", "0.1.x"),
    ("cookie-parser", "~1.3.5"),
    ("debug", "~2.2.0"),
    ("emvc", "*"),
    ("errorhandler", "1.x.x"),
    ("express", "~4.13.1"),
    ("method-override", "1.x.x"),
    ("morgan", "~1.6.1"),
    ("serve-favicon", "~2.3.0"),
];

#[derive(Serialize)]
struct PackageManifest<'a> {
    name: &'a str,
    version: &'static str,
    private: bool,
    dependencies: BTreeMap<&'static str, &'static str>,
    scripts: Scripts,
}

#[derive(Serialize)]
struct Scripts {
    start: &'static str,
}

/// Every dependency of the generated application, sorted by package name.
pub fn dependencies(context: &GenerationContext) -> BTreeMap<&'static str, &'static str> {
    let mut deps: BTreeMap<_, _> = BASE_DEPENDENCIES.iter().copied().collect();
    let (engine, version) = context.view_engine.dependency();
    deps.insert(engine, version);
    deps
}

/// Serializes the package manifest for `context`.
///
/// Output uses two-space indentation and carries no trailing newline.
pub fn render_package_manifest(context: &GenerationContext) -> Result<String, TemplateError> {
    let manifest = PackageManifest {
        name: &context.app_name,
        version: PACKAGE_VERSION,
        private: true,
        dependencies: dependencies(context),
        scripts: Scripts {
            start: "node server.js",
        },
    };

    serde_json::to_string_pretty(&manifest).map_err(TemplateError::Serialize)
}
