/// Receives progress of the long-running fetch passes.
///
/// A pass calls [`start`](ProgressReporter::start) once with the number of
/// steps (pages or releases), [`advance`](ProgressReporter::advance) after
/// every step and [`finish`](ProgressReporter::finish) when it ends, also
/// when it ends early.
pub trait ProgressReporter {
    fn start(&mut self, label: &str, total: u64);
    fn advance(&mut self);
    fn finish(&mut self);
}

/// Discards all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn start(&mut self, _label: &str, _total: u64) {}
    fn advance(&mut self) {}
    fn finish(&mut self) {}
}
