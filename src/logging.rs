// src/logging.rs
// =============================================================================
// Logging setup.
//
// We log through the `log` facade and print with `env_logger`, on stderr so
// the JSON on stdout stays clean. RUST_LOG still works for finer control.
// =============================================================================

use log::{debug, LevelFilter};

/// Picks the log level from the --verbose / --quiet flags
///
/// --quiet wins when both are given.
pub fn level(verbose: bool, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Off
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

pub fn init_logger(verbose: bool, quiet: bool) {
    let level = level(verbose, quiet);

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();

    debug!("Logger initialized with level: {level:?}");
}
