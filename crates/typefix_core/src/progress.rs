use std::path::Path;

/// Receives one notification per processed file. Purely observational:
/// nothing flows back into the run from an implementation.
pub trait ProgressSink {
    /// `percent` is whole-number completion after this file, `total` the
    /// number of discovered files.
    fn file_processed(&mut self, percent: usize, total: usize, path: &Path);
}

/// Sink that discards all notifications, for library callers and tests.
#[derive(Debug, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn file_processed(&mut self, _percent: usize, _total: usize, _path: &Path) {}
}
