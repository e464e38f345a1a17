use log::{log_enabled, warn, Level};
use std::time::Instant;

use crate::error::PhysicsError;

/// Scoped trace span around one phase of the tick.
pub struct ScopedTimer<'a> {
    label: &'a str,
    start: Instant,
}

impl<'a> ScopedTimer<'a> {
    pub fn new(label: &'a str) -> Self {
        if log_enabled!(Level::Trace) {
            log::trace!("start {label}");
        }
        Self {
            label,
            start: Instant::now(),
        }
    }
}

impl<'a> Drop for ScopedTimer<'a> {
    fn drop(&mut self) {
        if log_enabled!(Level::Trace) {
            log::trace!("end {} ({} µs)", self.label, self.start.elapsed().as_micros());
        }
    }
}

/// Logs a failed lifecycle call and hands the error back.
pub fn warn_on_error(context: &str, error: PhysicsError) -> PhysicsError {
    warn!("{context}: {error}");
    error
}
