//! Console report for a generator run.
//!
//! Every processed file produces exactly one `<marker> : <path>` line on
//! stdout. The `create : <path>` form is matched line by line by external
//! tooling, so marker text, separator and field order are fixed.

use std::io::{self, Write};

use colored::{ColoredString, Colorize};
use thiserror::Error;

use crate::generator::{FileRecord, FileStatus, GenerationReport};

/// Errors that can occur while printing the report.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Prints generation reports and follow-up instructions.
pub struct ReportWriter {
    app_name: String,
    display_dir: Option<String>,
    no_color: bool,
}

impl ReportWriter {
    /// Creates a new report writer.
    ///
    /// # Arguments
    ///
    /// * `app_name` - Generated package name, used in the run instructions
    /// * `display_dir` - Target directory as typed by the user, if not the
    ///   working directory
    /// * `no_color` - Whether to disable colored output
    pub fn new(app_name: impl Into<String>, display_dir: Option<String>, no_color: bool) -> Self {
        Self {
            app_name: app_name.into(),
            display_dir,
            no_color,
        }
    }

    /// Writes the report to stdout.
    pub fn write_to_stdout(&self, report: &GenerationReport) -> Result<(), OutputError> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.write(&mut handle, report)
    }

    /// Writes one line per record followed by the closing section.
    pub fn write<W: Write>(&self, out: &mut W, report: &GenerationReport) -> Result<(), OutputError> {
        for record in &report.records {
            writeln!(out, "{}", self.format_record(record))?;
        }

        if report.dry_run {
            writeln!(out)?;
            writeln!(out, "Dry run, nothing was written.")?;
        } else {
            write!(out, "{}", self.instructions())?;
        }

        Ok(())
    }

    /// Formats a single report line.
    pub fn format_record(&self, record: &FileRecord) -> String {
        format!("{} : {}", self.marker(record.status), record.path)
    }

    fn marker(&self, status: FileStatus) -> ColoredString {
        let marker = status.marker();
        if self.no_color {
            return marker.normal();
        }

        match status {
            FileStatus::Created => marker.cyan(),
            FileStatus::Identical => marker.blue(),
            FileStatus::Conflict => marker.red().bold(),
            FileStatus::Overwritten => marker.yellow(),
        }
    }

    /// Install and run hints shown after a completed run.
    pub fn instructions(&self) -> String {
        let mut text = String::from("\n   install dependencies:\n");
        match &self.display_dir {
            Some(dir) => text.push_str(&format!("     $ cd {} && npm install\n", dir)),
            None => text.push_str("     $ npm install\n"),
        }

        text.push_str("\n   run the app:\n");
        if cfg!(windows) {
            text.push_str(&format!("     > SET DEBUG={}:* & npm start\n", self.app_name));
        } else {
            text.push_str(&format!("     $ DEBUG={}:* npm start\n", self.app_name));
        }

        text
    }
}
