use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::error::EmvcError;
use crate::template::{GenerationContext, ViewEngine, sanitize_app_name};

/// Run configuration, resolved once at startup from the command line and
/// the process working directory.
#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute target directory; may not exist yet.
    pub target_dir: PathBuf,
    /// Target directory as the user typed it, when it differs from the
    /// working directory. Used for the `cd` hint after generation.
    pub display_dir: Option<String>,
    pub app_name: String,
    pub view_engine: ViewEngine,
    pub git: bool,
    pub force: bool,
    pub dry_run: bool,
    pub no_color: bool,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, EmvcError> {
        let current_dir = std::env::current_dir().map_err(|e| {
            EmvcError::Config(format!("Cannot determine current directory: {}", e))
        })?;

        Self::from_cli_in(cli, &current_dir)
    }

    /// Builds the configuration with relative paths resolved against
    /// `current_dir`.
    pub fn from_cli_in(cli: Cli, current_dir: &Path) -> Result<Self, EmvcError> {
        let target_dir = match &cli.dir {
            Some(path) => Self::resolve_path(path, current_dir),
            None => current_dir.to_path_buf(),
        };

        let target_dir = if target_dir.exists() {
            if !target_dir.is_dir() {
                return Err(EmvcError::Config(format!(
                    "Target path is not a directory: {}",
                    target_dir.display()
                )));
            }

            // Canonicalize so "." and ".." resolve to a real directory name
            target_dir.canonicalize().map_err(|e| {
                EmvcError::Config(format!(
                    "Cannot canonicalize target directory {}: {}",
                    target_dir.display(),
                    e
                ))
            })?
        } else {
            target_dir
        };

        let dir_name = target_dir.file_name().ok_or_else(|| {
            EmvcError::Config(format!(
                "Cannot derive an application name from {}",
                target_dir.display()
            ))
        })?;
        let app_name = sanitize_app_name(&dir_name.to_string_lossy());

        let display_dir = cli
            .dir
            .as_deref()
            .filter(|dir| *dir != Path::new("."))
            .map(|dir| dir.display().to_string());

        let view_engine = if cli.ejs {
            ViewEngine::Ejs
        } else {
            ViewEngine::Jade
        };

        Ok(Self {
            target_dir,
            display_dir,
            app_name,
            view_engine,
            git: cli.git,
            force: cli.force,
            dry_run: cli.dry_run,
            no_color: cli.no_color,
        })
    }

    /// Resolves a path to an absolute path.
    /// - Absolute paths are returned as-is
    /// - Relative paths are resolved relative to `base`
    pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base.join(path)
        }
    }

    /// Template values derived from this configuration.
    pub fn generation_context(&self) -> GenerationContext {
        GenerationContext::new(self.app_name.clone(), self.view_engine, self.git)
    }
}
