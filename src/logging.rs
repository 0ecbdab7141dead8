#![cfg(feature = "std")]

use std::env;
use log::{self, LevelFilter, Metadata, Record};

struct SimpleLogger;

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{} [{}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: SimpleLogger = SimpleLogger;

/// Initialize logging with a level taken from the `HITSEEKER_LOG` environment variable.
/// Defaults to `info`, or `debug` when `verbose` is set, if the variable is not set or invalid.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let level = env::var("HITSEEKER_LOG")
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(fallback);
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}
