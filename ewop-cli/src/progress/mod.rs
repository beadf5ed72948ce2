//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter for row processing
///
/// Draws on stderr; indicatif hides the bar when stderr is not a terminal.
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    /// Initialize progress bar for row processing
    pub fn init_rows(&mut self, total_rows: u64) {
        if self.quiet {
            return;
        }

        let style = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} rows {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");

        let pb = ProgressBar::new(total_rows);
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Record one processed row
    pub fn row_completed(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.inc(1);
        }
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message("Complete");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(reporter: &ProgressReporter) -> u64 {
        reporter.progress_bar.as_ref().map_or(0, ProgressBar::position)
    }

    #[test]
    fn test_quiet_reporter_has_no_bar() {
        let mut reporter = ProgressReporter::new(true);
        reporter.init_rows(10);
        reporter.row_completed();
        assert_eq!(position(&reporter), 0);
        reporter.finish();
    }

    #[test]
    fn test_rows_are_counted() {
        let mut reporter = ProgressReporter::new(false);
        reporter.init_rows(3);
        reporter.row_completed();
        reporter.row_completed();
        assert_eq!(position(&reporter), 2);
        reporter.finish();
    }
}
