//! Human-facing render progress.
//!
//! Progress is informational only: reporters never influence the image.

use std::io::Write;

/// Receives a notification each time a worker finishes a row.
///
/// Called concurrently from every worker thread.
pub trait ProgressReporter: Sync {
    /// `rows_done` counts completed rows across all workers.
    fn row_completed(&self, rows_done: usize, total_rows: usize);

    /// Called once after every worker has finished.
    fn finished(&self) {}
}

/// Discards all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn row_completed(&self, _rows_done: usize, _total_rows: usize) {}
}

/// Rewrites a single "Scanlines remaining" line on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrProgress;

impl ProgressReporter for StderrProgress {
    fn row_completed(&self, rows_done: usize, total_rows: usize) {
        let mut err = std::io::stderr().lock();
        // Write errors are ignored
        let _ = write!(err, "\rScanlines remaining: {} ", total_rows.saturating_sub(rows_done));
        let _ = err.flush();
    }

    fn finished(&self) {
        let _ = writeln!(std::io::stderr(), "\nDone.");
    }
}
