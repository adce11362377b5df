//! Generation context shared by every template render.

use std::sync::LazyLock;

use regex::Regex;

/// Name used when the target directory yields no usable package name.
pub const FALLBACK_APP_NAME: &str = "hello-world";

static DISALLOWED_NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9.()!~*'-]+").expect("valid regex"));

static NAME_EDGES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-_.]+|-+$").expect("valid regex"));

/// View template engine used by the generated application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewEngine {
    #[default]
    Jade,
    Ejs,
}

impl ViewEngine {
    /// Engine identifier, also the npm package name.
    pub fn name(&self) -> &'static str {
        match self {
            ViewEngine::Jade => "jade",
            ViewEngine::Ejs => "ejs",
        }
    }

    /// File extension of view templates, without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ViewEngine::Jade => "jade",
            ViewEngine::Ejs => "html.ejs",
        }
    }

    /// Dependency pin added to the package manifest for this engine.
    pub fn dependency(&self) -> (&'static str, &'static str) {
        match self {
            ViewEngine::Jade => ("jade", "~1.11.0"),
            ViewEngine::Ejs => ("ejs", "~2.3.3"),
        }
    }
}

/// Resolved, read-only values for one generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationContext {
    pub app_name: String,
    pub view_engine: ViewEngine,
    pub git: bool,
}

impl GenerationContext {
    pub fn new(app_name: impl Into<String>, view_engine: ViewEngine, git: bool) -> Self {
        Self {
            app_name: app_name.into(),
            view_engine,
            git,
        }
    }
}

/// Turns a directory name into an npm-compatible package name.
///
/// Runs of unsupported characters collapse into a single `-`, leading
/// `-`, `_` and `.` as well as trailing `-` are removed, and the result is
/// lowercased. Returns [`FALLBACK_APP_NAME`] when nothing is left.
pub fn sanitize_app_name(dir_name: &str) -> String {
    let replaced = DISALLOWED_NAME_CHARS.replace_all(dir_name, "-");
    let trimmed = NAME_EDGES.replace_all(&replaced, "");
    let name = trimmed.to_lowercase();

    if name.is_empty() {
        FALLBACK_APP_NAME.to_string()
    } else {
        name
    }
}
