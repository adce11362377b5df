//! Template copier: writes the active variant into the target directory.
//!
//! Generation happens in two steps. [`Generator::plan`] renders every file
//! of the variant in memory; [`Generator::run`] then walks that plan in
//! order, one file at a time, and records what happened to each
//! destination. Nothing is written until the whole plan rendered, so
//! template errors never leave files behind.

pub mod writer;

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::Config;
use crate::template::{self, GenerationContext, RenderedFile, TemplateError};
use writer::Existing;

/// Errors that abort a generator run.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("{0}")]
    Template(#[from] TemplateError),

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write {}: the path is blocked by an existing directory or file", .0.display())]
    PathCollision(PathBuf),
}

/// What to do when a destination holds different content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Leave the existing file untouched and report a conflict.
    #[default]
    Skip,
    /// Replace the existing file.
    Overwrite,
}

/// Outcome for a single destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Created,
    Identical,
    Conflict,
    Overwritten,
}

impl FileStatus {
    /// Marker printed in front of the path in the report.
    pub fn marker(&self) -> &'static str {
        match self {
            FileStatus::Created => "create",
            FileStatus::Identical => "identical",
            FileStatus::Conflict => "conflict",
            FileStatus::Overwritten => "overwrite",
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Path relative to the target directory, `/` separated.
    pub path: String,
    pub status: FileStatus,
}

/// Everything that happened during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub records: Vec<FileRecord>,
    pub dry_run: bool,
}

impl GenerationReport {
    pub fn count(&self, status: FileStatus) -> usize {
        self.records.iter().filter(|r| r.status == status).count()
    }

    /// Paths with the given status, in processing order.
    pub fn paths(&self, status: FileStatus) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| r.status == status)
            .map(|r| r.path.as_str())
            .collect()
    }

    pub fn has_conflicts(&self) -> bool {
        self.count(FileStatus::Conflict) > 0
    }
}

pub struct Generator {
    target_dir: PathBuf,
    context: GenerationContext,
    policy: ConflictPolicy,
    dry_run: bool,
}

impl Generator {
    pub fn new(config: &Config) -> Self {
        let policy = if config.force {
            ConflictPolicy::Overwrite
        } else {
            ConflictPolicy::Skip
        };

        Self {
            target_dir: config.target_dir.clone(),
            context: config.generation_context(),
            policy,
            dry_run: config.dry_run,
        }
    }

    /// Renders the active variant without touching the file system.
    pub fn plan(&self) -> Result<Vec<RenderedFile>, GenerateError> {
        Ok(template::render_variant(&self.context)?)
    }

    /// Renders and writes the active variant.
    ///
    /// The walk stops at the first I/O error or path collision; files written
    /// before that point stay in place.
    pub fn run(&self) -> Result<GenerationReport, GenerateError> {
        let plan = self.plan()?;

        log::debug!(
            "Generating {} files for '{}' ({}) in {}",
            plan.len(),
            self.context.app_name,
            self.context.view_engine.name(),
            self.target_dir.display()
        );

        let mut report = GenerationReport {
            records: Vec::with_capacity(plan.len()),
            dry_run: self.dry_run,
        };

        for file in &plan {
            let status = self.process(file)?;
            report.records.push(FileRecord {
                path: file.path.clone(),
                status,
            });
        }

        Ok(report)
    }

    fn process(&self, file: &RenderedFile) -> Result<FileStatus, GenerateError> {
        let destination = self.destination_path(&file.path);
        let contents = file.contents.as_bytes();

        let existing =
            writer::inspect(&destination, contents).map_err(|source| GenerateError::Io {
                path: destination.clone(),
                source,
            })?;

        let status = match existing {
            Existing::Missing => FileStatus::Created,
            Existing::Identical => FileStatus::Identical,
            Existing::Different => match self.policy {
                ConflictPolicy::Skip => FileStatus::Conflict,
                ConflictPolicy::Overwrite => FileStatus::Overwritten,
            },
            Existing::Directory | Existing::BlockedParent => {
                return Err(GenerateError::PathCollision(destination));
            }
        };

        match status {
            FileStatus::Created | FileStatus::Overwritten if !self.dry_run => {
                writer::write_atomic(&destination, contents).map_err(|source| {
                    GenerateError::Io {
                        path: destination.clone(),
                        source,
                    }
                })?;
                log::debug!("Wrote {}", file.path);
            }
            FileStatus::Conflict => {
                log::warn!(
                    "{} already exists with different content, skipped (use --force to overwrite)",
                    file.path
                );
            }
            _ => {}
        }

        Ok(status)
    }

    /// Joins a `/` separated relative path onto the target directory using
    /// the host's separator.
    fn destination_path(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .fold(self.target_dir.clone(), |path, segment| path.join(segment))
    }
}
