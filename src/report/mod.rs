// Report module - console output and result registration

pub mod diff;
pub mod reporter;
pub mod simplified;

pub use reporter::{Reporter, SuiteOptions};
pub use simplified::SimplifiedReporter;

use crate::state::ErrorEvent;

/// Minimal result-registration capability.
///
/// The rich console reporter layers its formatting on top of this contract
/// instead of subclassing a base reporter.
pub trait ResultRecorder {
    /// Record a passing assertion. Pass events always count toward totals.
    fn register_passed(&mut self, message: &str);

    /// Record a failing assertion.
    fn register_failed(&mut self, err: ErrorEvent);

    /// Record a runtime error. Guarded by `err.registered`: registering the
    /// same event twice is a no-op.
    fn register_test_error(&mut self, err: &mut ErrorEvent);
}

/// Rich console-rendering capability, layered on top of [`ResultRecorder`].
pub trait ConsoleFormatter {
    /// Announce a test case: a banner in sequential runs, a single line in
    /// parallel mode.
    fn log_test_case(&self, test_name: &str);

    /// Render the active test case's outcome in the mode the execution
    /// context calls for.
    fn print_test_result(&self);

    /// Render the one-line status form.
    fn print_simplified_test_result(&self, ok: bool, elapsed_time_ms: u64, is_child_process: bool);

    /// Compose the failure sentence from the active case's counters.
    fn get_failure_message(&self) -> String;
}
