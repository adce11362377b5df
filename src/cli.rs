use std::path::PathBuf;

use clap::Parser;

/// Application skeleton generator for emvc
///
/// Creates a boilerplate emvc web application (controllers, views, routes,
/// initializers and package manifest) in DIR and lists every file written.
///
/// Existing files are never silently replaced: identical files are left
/// alone, files with different content are reported as conflicts and
/// skipped unless --force is given.
#[derive(Parser, Debug)]
#[command(name = "emvc")]
#[command(version)]
#[command(about, long_about)]
pub struct Cli {
    /// Target directory for the application (defaults to the current directory)
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Use EJS view templates
    #[arg(short = 'e', long = "ejs", conflicts_with = "jade")]
    pub ejs: bool,

    /// Use Jade view templates (default)
    #[arg(long = "jade")]
    pub jade: bool,

    /// Add a .gitignore file
    #[arg(long = "git")]
    pub git: bool,

    /// Overwrite existing files whose content differs from the template
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Report what would be written without touching the file system
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Suppress colored output (useful for CI/CD pipelines)
    #[arg(short = 'n', long = "no-color")]
    pub no_color: bool,

    /// Enable verbose output for debugging
    #[arg(long = "verbose")]
    pub verbose: bool,
}
