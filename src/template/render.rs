//! `{{token}}` substitution for bundled template text.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::TemplateError;
use super::context::GenerationContext;
use super::package;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z][A-Za-z0-9_.-]*)\s*\}\}").expect("valid regex")
});

/// Directory holding controllers in the generated application.
pub const CONTROLLERS_PATH: &str = "app/controllers";
/// Directory holding per-environment phases.
pub const ENVIRONMENTS_PATH: &str = "config/environments";
/// Directory holding initializers.
pub const INITIALIZERS_PATH: &str = "config/initializers";
/// Route definitions module, without extension.
pub const ROUTES_PATH: &str = "config/routes";

/// Substitutes named tokens into template text.
///
/// The token table is computed once per context; rendering itself is pure.
#[derive(Debug)]
pub struct Renderer {
    tokens: BTreeMap<String, String>,
}

impl Renderer {
    pub fn new(context: &GenerationContext) -> Self {
        let engine = context.view_engine;
        let mut tokens = BTreeMap::new();

        tokens.insert("appName".to_string(), context.app_name.clone());
        tokens.insert("viewEngine".to_string(), engine.name().to_string());
        tokens.insert("viewExtension".to_string(), engine.extension().to_string());
        tokens.insert(
            "generatorVersion".to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        );
        tokens.insert("controllersPath".to_string(), CONTROLLERS_PATH.to_string());
        tokens.insert("environmentsPath".to_string(), ENVIRONMENTS_PATH.to_string());
        tokens.insert("initializersPath".to_string(), INITIALIZERS_PATH.to_string());
        tokens.insert("routesPath".to_string(), ROUTES_PATH.to_string());

        for (name, version) in package::dependencies(context) {
            tokens.insert(format!("version.{}", name), version.to_string());
        }
        tokens.insert(
            "version.viewEngine".to_string(),
            engine.dependency().1.to_string(),
        );

        Self { tokens }
    }

    /// Looks up the value bound to a token name.
    pub fn token(&self, name: &str) -> Option<&str> {
        self.tokens.get(name).map(String::as_str)
    }

    /// Renders `text`, failing on the first token with no binding.
    ///
    /// `template` only names the source in error messages.
    pub fn render(&self, template: &str, text: &str) -> Result<String, TemplateError> {
        if let Some(unknown) = TOKEN
            .captures_iter(text)
            .map(|caps| caps[1].to_string())
            .find(|name| !self.tokens.contains_key(name))
        {
            return Err(TemplateError::UnknownToken {
                template: template.to_string(),
                token: unknown,
            });
        }

        let rendered = TOKEN.replace_all(text, |caps: &Captures| {
            self.tokens
                .get(&caps[1])
                .cloned()
                .unwrap_or_default()
        });

        Ok(rendered.into_owned())
    }
}
