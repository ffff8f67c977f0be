use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while waiting on the policy assistant
pub struct ProgressReporter {
    spinner: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            spinner: None,
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Start a spinner for an indeterminate wait
    pub fn start_spinner(&mut self, message: &str) {
        if !self.enabled {
            return;
        }

        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(120));
        self.spinner = Some(pb);
    }

    /// Remove the spinner from the terminal
    pub fn finish_and_clear(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_reporter_never_spins() {
        let mut reporter = ProgressReporter::new(false);
        reporter.start_spinner("Generating policy");
        assert!(!reporter.is_enabled());
        assert!(reporter.spinner.is_none());
        reporter.finish_and_clear();
    }

    #[test]
    fn test_enabled_reporter_spins_until_cleared() {
        let mut reporter = ProgressReporter::new(true);
        reporter.start_spinner("Generating policy");
        assert!(reporter.spinner.is_some());
        reporter.finish_and_clear();
        assert!(reporter.spinner.is_none());
    }

    #[test]
    fn test_progress_reporter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ProgressReporter>();
    }
}
