//! Console logger of relief crates with per-target levels
#![warn(missing_docs)]

pub use log::{debug, error, info, log, log_enabled, trace, warn, Level, LevelFilter};
use once_cell::sync::OnceCell;
use std::time::Instant;

static LOG: OnceCell<Log> = OnceCell::new();

/// Any target
const ANY_TARGET: &str = "*";

/// Maximal level of records from targets starting with the prefix
struct Filter {
    prefix: String,
    level: LevelFilter,
}

impl Filter {
    fn matches(&self, target: &str) -> bool {
        self.prefix == ANY_TARGET || target.starts_with(self.prefix.as_str())
    }
}

/// Logger configuration, records of targets without a filter are dropped
pub struct Log {
    started: Instant,
    filters: Vec<Filter>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            started: Instant::now(),
            filters: Vec::new(),
        }
    }
}

impl Log {
    /// Adds max logging level for targets starting with the prefix
    ///
    /// The first matching filter decides, `"*"` matches any target.
    pub fn level(mut self, prefix: impl Into<String>, level: LevelFilter) -> Self {
        self.filters.push(Filter {
            prefix: prefix.into(),
            level,
        });
        self
    }

    /// Returns true if a record of the level should be printed for the target
    pub fn accepts(&self, target: &str, level: Level) -> bool {
        self.filters
            .iter()
            .find(|filter| filter.matches(target))
            .map(|filter| level <= filter.level)
            .unwrap_or(false)
    }

    /// Installs the configuration as the global logger
    ///
    /// Panics if a logger was already installed.
    pub fn subscribe(self) {
        let max_level = self
            .filters
            .iter()
            .map(|filter| filter.level)
            .max()
            .unwrap_or(LevelFilter::Off);

        if LOG.set(self).is_err() {
            panic!("Log subscription must be initiated only once");
        }
        if let Some(logger) = LOG.get() {
            log::set_logger(logger).expect("Other log subscription already exists");
            log::set_max_level(max_level);
        }
    }
}

impl log::Log for Log {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.accepts(metadata.target(), metadata.level())
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let elapsed = self.started.elapsed().as_secs_f64();
            println!(
                "{:.4} {} {} - {}",
                elapsed,
                level_mark(record.level()),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

fn level_mark(level: Level) -> &'static str {
    match level {
        Level::Error => "!!",
        Level::Warn => "!~",
        Level::Info => "--",
        Level::Debug => "**",
        Level::Trace => "->",
    }
}
