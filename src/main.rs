use std::process::ExitCode;

use clap::Parser;
use emvc::{cli::Cli, config::Config, generator::FileStatus, logging::init_logging};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.no_color);

    let config = Config::from_cli(cli)?;

    log::debug!("Configuration: {:?}", config);

    let report = emvc::run(&config)?;

    // Skipped conflicts leave the application incomplete
    if report.has_conflicts() {
        log::warn!(
            "{} file(s) were skipped because they differ from the templates",
            report.count(FileStatus::Conflict)
        );
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
