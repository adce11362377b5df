pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod output;
pub mod template;

use config::Config;
use generator::{GenerationReport, Generator};
use output::ReportWriter;

/// Generates the application described by `config` and prints the report
/// to stdout.
pub fn run(config: &Config) -> error::Result<GenerationReport> {
    let report = Generator::new(config).run()?;

    let writer = ReportWriter::new(
        config.app_name.as_str(),
        config.display_dir.clone(),
        config.no_color,
    );
    writer.write_to_stdout(&report)?;

    Ok(report)
}
