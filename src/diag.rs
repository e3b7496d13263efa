//! Per-container diagnostics.
//!
//! Records go through the [`log`] facade under the `segy` target, but only
//! when the container's own verbosity allows them. The crate never installs
//! or configures a logger; that is left to the application.

use std::fmt;

use log::{Level, LevelFilter};

/// Log target used for every record emitted by this crate.
pub const TARGET: &str = "segy";

/// Verbosity threshold carried by a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostics {
    verbosity: LevelFilter,
}

impl Diagnostics {
    /// Emit records at `verbosity` and above.
    pub fn new(verbosity: LevelFilter) -> Self {
        Self { verbosity }
    }

    /// Emit nothing.
    pub fn silent() -> Self {
        Self::new(LevelFilter::Off)
    }

    /// Current threshold.
    pub fn verbosity(&self) -> LevelFilter {
        self.verbosity
    }

    /// Whether a record at `level` would be emitted.
    pub fn enabled(&self, level: Level) -> bool {
        level <= self.verbosity
    }

    /// Log `args` at `level` if enabled.
    pub fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        if self.enabled(level) {
            log::log!(target: TARGET, level, "{args}");
        }
    }

    /// Log at `Debug`.
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Debug, args);
    }

    /// Log at `Info`.
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, args);
    }

    /// Log at `Warn`.
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Warn, args);
    }
}

impl Default for Diagnostics {
    /// Warnings only.
    fn default() -> Self {
        Self::new(LevelFilter::Warn)
    }
}
