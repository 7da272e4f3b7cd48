// Minimal reporter - registration without rich console formatting

use crate::config::Settings;
use crate::state::ErrorEvent;
use crate::utils::symbols;

use super::ResultRecorder;

/// The minimal reporting surface: counts events and keeps the suite-level
/// error log, emitting one tracing line per event.
///
/// Used standalone where only counts matter; [`Reporter`](super::Reporter)
/// embeds one for the shared registration behavior.
pub struct SimplifiedReporter {
    settings: Settings,
    passed: u32,
    failed: u32,
    errors: Vec<ErrorEvent>,
}

impl SimplifiedReporter {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            passed: 0,
            failed: 0,
            errors: Vec::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn passed_count(&self) -> u32 {
        self.passed
    }

    pub fn failed_count(&self) -> u32 {
        self.failed
    }

    /// Runtime errors registered so far, in registration order.
    pub fn errors(&self) -> &[ErrorEvent] {
        &self.errors
    }

    /// Logs a runtime error and appends it to the error log. Shared with the
    /// rich reporter, which performs its own counting on top.
    pub(crate) fn log_error(&mut self, err: &ErrorEvent) {
        tracing::error!("{}", err);
        self.errors.push(err.clone());
    }
}

impl ResultRecorder for SimplifiedReporter {
    fn register_passed(&mut self, message: &str) {
        self.passed += 1;
        tracing::debug!("{} {}", symbols::OK, message);
    }

    fn register_failed(&mut self, err: ErrorEvent) {
        self.failed += 1;
        tracing::error!("{} {}", symbols::FAIL, err);
    }

    fn register_test_error(&mut self, err: &mut ErrorEvent) {
        if err.registered {
            return;
        }
        err.registered = true;

        self.log_error(err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_registrations() {
        let mut reporter = SimplifiedReporter::new(Settings::default());

        reporter.register_passed("title matches");
        reporter.register_passed("url matches");
        reporter.register_failed(ErrorEvent::assertion_failure("body missing"));

        assert_eq!(reporter.passed_count(), 2);
        assert_eq!(reporter.failed_count(), 1);
    }

    #[test]
    fn test_register_test_error_is_idempotent() {
        let mut reporter = SimplifiedReporter::new(Settings::default());
        let mut err = ErrorEvent::runtime_error("session lost");

        reporter.register_test_error(&mut err);
        reporter.register_test_error(&mut err);

        assert_eq!(reporter.errors().len(), 1);
        assert!(err.registered);
    }
}
