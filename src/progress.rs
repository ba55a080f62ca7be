//! Conversion progress reporting.
//!
//! Progress is purely observational: reporters never influence the sprite
//! being built.
//!
//! # Example
//!
//! ```
//! use charsprite::progress::{LogProgress, ProgressEvent, ProgressReporter};
//!
//! let reporter = LogProgress::new();
//! reporter.report(ProgressEvent::Started { width: 64, height: 32 });
//! reporter.report(ProgressEvent::RowsCompleted { rows_done: 10, total_rows: 32 });
//! ```

/// Rows between two `RowsCompleted` notifications.
pub const REPORT_EVERY_ROWS: u32 = 10;

/// Events that can be reported during a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Conversion of a `width`x`height` grid started
    Started { width: u32, height: u32 },
    /// `rows_done` of `total_rows` rows have been mapped
    RowsCompleted { rows_done: u32, total_rows: u32 },
}

impl ProgressEvent {
    /// Completion percentage for `RowsCompleted`, `None` otherwise.
    pub fn percent(&self) -> Option<f64> {
        match *self {
            ProgressEvent::Started { .. } => None,
            ProgressEvent::RowsCompleted { rows_done, total_rows } => {
                if total_rows == 0 {
                    Some(100.0)
                } else {
                    Some(rows_done as f64 / total_rows as f64 * 100.0)
                }
            }
        }
    }
}

/// Whether a notification is due after `rows_done` of `total_rows` rows.
pub fn should_report(rows_done: u32, total_rows: u32) -> bool {
    rows_done % REPORT_EVERY_ROWS == 0 || rows_done == total_rows
}

/// Trait for progress reporters.
pub trait ProgressReporter {
    /// Report a progress event.
    fn report(&self, event: ProgressEvent);
}

/// A progress reporter that discards all events.
#[derive(Debug, Default)]
pub struct NullProgress;

impl NullProgress {
    pub fn new() -> Self {
        Self
    }
}

impl ProgressReporter for NullProgress {
    fn report(&self, _event: ProgressEvent) {}
}

/// Reports progress through `tracing` at info level.
#[derive(Debug, Default)]
pub struct LogProgress;

impl LogProgress {
    pub fn new() -> Self {
        Self
    }
}

impl ProgressReporter for LogProgress {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::Started { width, height } => {
                tracing::info!("Converting {}x{} image...", width, height);
            }
            ProgressEvent::RowsCompleted { rows_done, total_rows } => {
                tracing::info!(
                    "Processing row {}/{} ({:.1}%)",
                    rows_done,
                    total_rows,
                    event.percent().unwrap_or(100.0)
                );
            }
        }
    }
}
