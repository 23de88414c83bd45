use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;

/// StderrProgressReporter adapter for the scan-processing batch.
///
/// Drives one progress bar across the file batch on stderr, so report
/// JSON on stdout stays clean. The message slot carries the file
/// currently being correlated; plain messages are routed through the
/// bar while it is active so they do not tear the bar line.
pub struct StderrProgressReporter {
    bar: RefCell<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    const TEMPLATE: &'static str =
        "   {spinner:.green} correlating [{bar:30.cyan/blue}] {pos}/{len} {msg}";

    pub fn new() -> Self {
        Self {
            bar: RefCell::new(None),
        }
    }

    /// Returns the active bar, or starts a fresh one when the batch
    /// length changes (a new `scan` invocation through the same reporter).
    fn bar_for(&self, total: usize) -> ProgressBar {
        let mut slot = self.bar.borrow_mut();
        match slot.as_ref() {
            Some(existing) if existing.length() == Some(total as u64) => existing.clone(),
            _ => {
                let bar = ProgressBar::new(total as u64);
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template(Self::TEMPLATE)
                        .expect("progress template is valid")
                        .progress_chars("##-"),
                );
                *slot = Some(bar.clone());
                bar
            }
        }
    }

    fn clear_bar(&self) {
        if let Some(bar) = self.bar.borrow_mut().take() {
            bar.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        match self.bar.borrow().as_ref() {
            Some(bar) if !bar.is_finished() => bar.println(message),
            _ => eprintln!("{}", message),
        }
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        let bar = self.bar_for(total);
        bar.set_position(current as u64);
        if let Some(file_label) = message {
            bar.set_message(file_label.to_string());
        }
    }

    fn report_error(&self, message: &str) {
        self.clear_bar();
        eprintln!("{}", message);
    }

    fn report_completion(&self, message: &str) {
        self.clear_bar();
        eprintln!();
        eprintln!("{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_reporting_sequence_does_not_panic() {
        let reporter = StderrProgressReporter::new();
        reporter.report_progress(0, 2, Some("Processing profile.json"));
        reporter.report("💡 profile.json: Ubuntu 22.04 (1 system components)");
        reporter.report_progress(1, 2, Some("Processing inventory.json"));
        reporter.report_error("⚠️  inventory.json: unrecognized scan format");
        reporter.report_completion("✅ Processed 2 file(s), found 0 potential vulnerabilities");
    }

    #[test]
    fn test_new_batch_length_starts_a_fresh_bar() {
        let reporter = StderrProgressReporter::new();
        let first = reporter.bar_for(3);
        assert_eq!(first.length(), Some(3));

        // Same length reuses the bar, a different length replaces it
        let again = reporter.bar_for(3);
        assert_eq!(again.length(), Some(3));
        let second = reporter.bar_for(5);
        assert_eq!(second.length(), Some(5));
    }

    #[test]
    fn test_error_clears_the_active_bar() {
        let reporter = StderrProgressReporter::new();
        reporter.report_progress(1, 4, None);
        reporter.report_error("term failed");
        assert!(reporter.bar.borrow().is_none());
    }
}
