use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::discogs::ProgressReporter;

const TEMPLATE: &str = "{spinner:.blue} {msg:<10} [{bar:30.cyan/blue}] {pos}/{len} ({elapsed}, eta {eta})";

/// Draws one progress bar per pass on the terminal.
#[derive(Default)]
pub struct BarProgress {
    bar: Option<ProgressBar>,
}

impl BarProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for BarProgress {
    fn start(&mut self, label: &str, total: u64) {
        self.finish();

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::with_template(TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .progress_chars("=> "),
        );
        pb.set_message(label.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(pb);
    }

    fn advance(&mut self) {
        if let Some(pb) = &self.bar {
            pb.inc(1);
        }
    }

    fn finish(&mut self) {
        if let Some(pb) = self.bar.take() {
            pb.finish();
        }
    }
}
