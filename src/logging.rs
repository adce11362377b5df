use colored::control::set_override;
use env_logger::{Builder, Target};
use log::LevelFilter;

/// Level used for the given verbosity flag.
pub fn level_filter(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initializes logging on stderr; stdout is reserved for the file report.
pub fn init_logging(verbose: bool, no_color: bool) {
    // Disable colors globally if requested
    if no_color {
        set_override(false);
    }

    Builder::new()
        .filter_level(level_filter(verbose))
        .format_timestamp(None)
        .target(Target::Stderr)
        .init();
}
