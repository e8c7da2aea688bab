//! Terminal logger setup

use crate::io::error::{MosaicError, Result};
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Level filter for the requested verbosity
///
/// Quiet wins over verbose.
pub const fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Warn,
        (false, true) => LevelFilter::Debug,
        (false, false) => LevelFilter::Info,
    }
}

/// Install a terminal logger writing to stderr
///
/// # Errors
///
/// Returns [`MosaicError::Logging`] if a global logger is already installed
pub fn init_logging(level: LevelFilter) -> Result<()> {
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();

    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto).map_err(|e| {
        MosaicError::Logging {
            reason: e.to_string(),
        }
    })
}
