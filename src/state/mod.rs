// State module - result aggregation for one suite run
// Owns all counters and per-test state; the reporter layer decides policy.

pub mod error;
pub mod export;
pub mod testcase;

pub use error::{ErrorEvent, ErrorKind};
pub use export::{ExportedResults, ModuleResult};
pub use testcase::{
    AssertionOutcome, TestCaseDescriptor, TestCaseResult, TestCaseStatus,
};

use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;

/// Counters aggregated across all test cases in the current suite run.
///
/// Only events that count toward the run (per the reporter's retry policy)
/// land here; per-case raw counters live on [`TestCaseResult`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SuiteTotals {
    pub passed: u32,
    pub failed: u32,
    pub errors: u32,
    pub skipped: u32,
    pub total_elapsed_time_ms: u64,
}

/// Test results storage for one suite run.
///
/// Created once per run with the enumerated test list; every name starts on
/// the skipped roster and is struck off when it becomes the current test.
#[derive(Debug)]
pub struct TestResults {
    suite_name: String,
    testcases: Vec<TestCaseResult>,
    current: Option<usize>,
    totals: SuiteTotals,
    skipped_tests: Vec<String>,
    suite_errors: Vec<ErrorEvent>,
    suite_started: Instant,
    default_module: String,
    report_prefix: String,
}

impl TestResults {
    /// Create results storage for a suite run over the given test list
    pub fn new(tests: Vec<String>, suite_name: impl Into<String>) -> Self {
        Self {
            suite_name: suite_name.into(),
            testcases: Vec::new(),
            current: None,
            totals: SuiteTotals::default(),
            skipped_tests: tests,
            suite_errors: Vec::new(),
            suite_started: Instant::now(),
            default_module: String::new(),
            report_prefix: String::new(),
        }
    }

    /// Creates and activates a new test case with zeroed counters.
    pub fn init_current_test(&mut self, descriptor: TestCaseDescriptor) {
        self.strike_skipped(&descriptor.test_name);
        if self.default_module.is_empty() {
            self.default_module = descriptor.module.clone();
        }

        let mut case = TestCaseResult::new(descriptor);
        case.activate();
        self.testcases.push(case);
        self.current = Some(self.testcases.len() - 1);
    }

    /// Switches the active test case, preserving historical counters when the
    /// name re-enters an existing entry (the retry path).
    ///
    /// An active unnamed placeholder is adopted instead of opening a new
    /// entry, which is how anonymous tests receive their name late.
    pub fn set_current_test(&mut self, descriptor: TestCaseDescriptor) {
        self.strike_skipped(&descriptor.test_name);

        if !descriptor.test_name.is_empty() {
            let existing = self.testcases.iter().position(|c| {
                c.name == descriptor.test_name && c.module == descriptor.module
            });
            if let Some(idx) = existing {
                self.testcases[idx].activate();
                self.current = Some(idx);
                return;
            }
        }

        if let Some(idx) = self.current {
            let case = &mut self.testcases[idx];
            if case.name.is_empty() && !case.ran() {
                case.name = descriptor.test_name;
                case.module = descriptor.module;
                case.group = descriptor.group;
                case.activate();
                return;
            }
        }

        self.init_current_test(descriptor);
    }

    /// Clears the active case's name binding without discarding counters.
    pub fn reset_current_test_name(&mut self) {
        if let Some(case) = self.current_test_mut() {
            case.name.clear();
        }
    }

    /// Appends an assertion in execution order and bumps the matching counter.
    pub fn log_assertion(&mut self, outcome: AssertionOutcome) {
        self.log_assertion_with_total(outcome, true);
    }

    /// Same as [`log_assertion`](Self::log_assertion), with the failure's
    /// suite-total contribution decided by the caller's retry policy.
    pub fn log_assertion_with_total(&mut self, outcome: AssertionOutcome, increment_total: bool) {
        let passed = outcome.passed;
        if let Some(case) = self.current_test_mut() {
            case.assertions.push(outcome);
        } else {
            return;
        }

        if passed {
            self.increment_passed_count();
        } else {
            self.increment_failed_count(increment_total);
        }
    }

    /// Pass events always count toward the suite totals.
    pub fn increment_passed_count(&mut self) {
        if let Some(case) = self.current_test_mut() {
            case.passed += 1;
        }
        self.totals.passed += 1;
    }

    pub fn increment_failed_count(&mut self, increment_total: bool) {
        if let Some(case) = self.current_test_mut() {
            case.failed += 1;
            if increment_total {
                case.counted_failed += 1;
            }
        }
        if increment_total {
            self.totals.failed += 1;
        }
    }

    pub fn increment_error_count(&mut self, increment_total: bool) {
        if let Some(case) = self.current_test_mut() {
            case.errors += 1;
            if increment_total {
                case.counted_errors += 1;
            }
        }
        if increment_total {
            self.totals.errors += 1;
        }
    }

    pub fn increment_skipped_count(&mut self) {
        if let Some(case) = self.current_test_mut() {
            case.skipped += 1;
        }
    }

    /// Corrects `passed` downward, saturating at zero on both the active case
    /// and the suite totals. Used to void a partial pass count before a retry.
    pub fn subtract_passed_count(&mut self, count: u32) {
        if let Some(case) = self.current_test_mut() {
            case.passed = case.passed.saturating_sub(count);
        }
        self.totals.passed = self.totals.passed.saturating_sub(count);
    }

    /// Zeroes the active case's failure/error bookkeeping and deducts any
    /// previously counted amounts from the suite totals.
    ///
    /// The retry path calls this before re-running, so a superseded attempt
    /// can never leave its failures in the exported totals even when the
    /// suppression check was stale at registration time.
    pub fn void_current_test_failures(&mut self) {
        let Some(idx) = self.current else {
            return;
        };
        let case = &mut self.testcases[idx];

        self.totals.failed = self.totals.failed.saturating_sub(case.counted_failed);
        self.totals.errors = self.totals.errors.saturating_sub(case.counted_errors);

        case.failed = 0;
        case.errors = 0;
        case.counted_failed = 0;
        case.counted_errors = 0;
        case.retry_pending = false;
        case.last_error = None;
        case.assertions.clear();
    }

    /// Records `err` as the active case's last error; with `add_to_err_array`
    /// the event is also appended to the suite-level error list.
    pub fn set_last_error(
        &mut self,
        mut err: ErrorEvent,
        increment_total: bool,
        add_to_err_array: bool,
    ) {
        err.counts_toward_total = Some(increment_total);
        if add_to_err_array {
            self.suite_errors.push(err.clone());
        }
        if let Some(case) = self.current_test_mut() {
            case.last_error = Some(err);
        }
    }

    /// True iff the active test case recorded no failures and no errors.
    pub fn current_test_case_passed(&self) -> bool {
        self.current_test().map(|c| c.case_passed()).unwrap_or(true)
    }

    /// True iff every recorded test case passed.
    pub fn tests_passed(&self) -> bool {
        self.testcases.iter().all(|c| c.case_passed())
    }

    /// Stamps elapsed time on the active case from its monotonic start sample.
    pub fn set_elapsed_time(&mut self) {
        if let Some(case) = self.current_test_mut() {
            if let Some(started) = case.started {
                case.elapsed_time_ms = started.elapsed().as_millis() as u64;
            }
        }
    }

    /// Stamps total elapsed time for the whole suite run.
    pub fn set_total_elapsed_time(&mut self) {
        self.totals.total_elapsed_time_ms = self.suite_started.elapsed().as_millis() as u64;
    }

    /// Moves the active case into a terminal status, or parks it as
    /// retry-pending when a re-run will supersede this attempt.
    pub fn finalize_current_test(&mut self, retry_pending: bool) {
        if let Some(case) = self.current_test_mut() {
            case.finalize(retry_pending);
        }
    }

    pub fn current_test(&self) -> Option<&TestCaseResult> {
        self.current.and_then(|idx| self.testcases.get(idx))
    }

    pub fn current_test_name(&self) -> &str {
        self.current_test().map(|c| c.name.as_str()).unwrap_or("")
    }

    /// The most recent failing condition: the active case's last error, or
    /// the newest suite-level error.
    pub fn last_error(&self) -> Option<&ErrorEvent> {
        self.current_test()
            .and_then(|c| c.last_error.as_ref())
            .or_else(|| self.suite_errors.last())
    }

    pub fn suite_errors(&self) -> &[ErrorEvent] {
        &self.suite_errors
    }

    pub fn suite_name(&self) -> &str {
        &self.suite_name
    }

    pub fn testcases(&self) -> &[TestCaseResult] {
        &self.testcases
    }

    /// Suite totals with the skip roster folded in.
    pub fn suite_totals(&self) -> SuiteTotals {
        let mut totals = self.totals;
        totals.skipped = self.skipped_count();
        totals
    }

    pub fn set_axe_results(&mut self, results: serde_json::Value) {
        if let Some(case) = self.current_test_mut() {
            case.a11y = Some(results);
        }
    }

    /// Records the path of a persisted screenshot on the active case.
    pub fn log_screenshot_file(&mut self, file_name: std::path::PathBuf) {
        if let Some(case) = self.current_test_mut() {
            case.screenshots.push(file_name);
        }
    }

    pub fn report_prefix(&self) -> &str {
        &self.report_prefix
    }

    pub fn set_report_prefix(&mut self, prefix: impl Into<String>) {
        self.report_prefix = prefix.into();
    }

    /// Builds the exportable snapshot. Pure: recomputed on every call, so it
    /// always reflects the current state.
    pub fn export(&self) -> ExportedResults {
        let mut modules: BTreeMap<String, ModuleResult> = BTreeMap::new();

        for case in self.testcases.iter().filter(|c| c.ran()) {
            let key = if case.module.is_empty() {
                self.default_module.clone()
            } else {
                case.module.clone()
            };
            let entry = modules.entry(key).or_default();
            entry.tests += 1;
            entry.failures += case.counted_failed;
            entry.errors += case.counted_errors;
            entry.skipped += case.skipped;
            entry.assertions_count += case.assertions.len() as u32;
        }

        if !self.skipped_tests.is_empty() {
            let entry = modules.entry(self.default_module.clone()).or_default();
            entry.skipped += self.skipped_tests.len() as u32;
        }

        ExportedResults {
            suite_name: self.suite_name.clone(),
            modules,
            total_elapsed_time_ms: self.totals.total_elapsed_time_ms,
            print_a11y_report: None,
        }
    }

    fn skipped_count(&self) -> u32 {
        self.skipped_tests.len() as u32
            + self.testcases.iter().map(|c| c.skipped).sum::<u32>()
    }

    fn current_test_mut(&mut self) -> Option<&mut TestCaseResult> {
        self.current.and_then(|idx| self.testcases.get_mut(idx))
    }

    fn strike_skipped(&mut self, test_name: &str) {
        if test_name.is_empty() {
            return;
        }
        self.skipped_tests.retain(|name| name != test_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results_with_test(name: &str) -> TestResults {
        let mut results = TestResults::new(vec![name.to_string()], "suite");
        results.init_current_test(TestCaseDescriptor::new("mod", name, ""));
        results
    }

    #[test]
    fn test_counters_match_increment_calls() {
        let mut results = results_with_test("counts");

        results.increment_passed_count();
        results.increment_passed_count();
        results.increment_failed_count(true);
        results.increment_error_count(true);

        let case = results.current_test().unwrap();
        assert_eq!(case.passed, 2);
        assert_eq!(case.failed, 1);
        assert_eq!(case.errors, 1);
    }

    #[test]
    fn test_suppressed_increments_skip_totals_but_not_case() {
        let mut results = results_with_test("retryable");

        results.increment_failed_count(false);
        results.increment_error_count(false);

        let case = results.current_test().unwrap();
        assert_eq!(case.failed, 1);
        assert_eq!(case.errors, 1);
        assert_eq!(results.suite_totals().failed, 0);
        assert_eq!(results.suite_totals().errors, 0);
    }

    #[test]
    fn test_subtract_passed_count_clamps_at_zero() {
        let mut results = results_with_test("clamp");
        results.increment_passed_count();

        results.subtract_passed_count(5);

        assert_eq!(results.current_test().unwrap().passed, 0);
        assert_eq!(results.suite_totals().passed, 0);
    }

    #[test]
    fn test_set_current_test_preserves_history() {
        let mut results = results_with_test("first");
        results.increment_passed_count();

        results.set_current_test(TestCaseDescriptor::new("mod", "second", ""));
        results.increment_passed_count();

        results.set_current_test(TestCaseDescriptor::new("mod", "first", ""));
        let case = results.current_test().unwrap();
        assert_eq!(case.name, "first");
        assert_eq!(case.passed, 1);
        assert_eq!(results.testcases().len(), 2);
    }

    #[test]
    fn test_placeholder_adopts_first_named_test() {
        let mut results = TestResults::new(vec!["real".to_string()], "suite");
        results.init_current_test(TestCaseDescriptor::new("mod", "", ""));

        results.set_current_test(TestCaseDescriptor::new("mod", "real", ""));

        assert_eq!(results.testcases().len(), 1);
        assert_eq!(results.current_test_name(), "real");
    }

    #[test]
    fn test_reset_current_test_name_keeps_counters() {
        let mut results = results_with_test("anon");
        results.increment_passed_count();

        results.reset_current_test_name();

        assert_eq!(results.current_test_name(), "");
        assert_eq!(results.current_test().unwrap().passed, 1);
    }

    #[test]
    fn test_log_assertion_routes_by_pass_flag() {
        let mut results = results_with_test("asserts");

        results.log_assertion(AssertionOutcome::passed("visible"));
        results.log_assertion(AssertionOutcome::failed("missing", "trace"));

        let case = results.current_test().unwrap();
        assert_eq!(case.assertions.len(), 2);
        assert_eq!(case.passed, 1);
        assert_eq!(case.failed, 1);
        assert_eq!(results.suite_totals().failed, 1);
    }

    #[test]
    fn test_void_current_test_failures_reconciles_totals() {
        let mut results = results_with_test("flaky");
        results.log_assertion(AssertionOutcome::failed("nope", ""));
        results.increment_error_count(true);
        assert_eq!(results.suite_totals().failed, 1);
        assert_eq!(results.suite_totals().errors, 1);

        results.void_current_test_failures();

        let case = results.current_test().unwrap();
        assert!(case.case_passed());
        assert!(case.assertions.is_empty());
        assert!(case.last_error.is_none());
        assert_eq!(results.suite_totals().failed, 0);
        assert_eq!(results.suite_totals().errors, 0);
        assert!(results.tests_passed());
    }

    #[test]
    fn test_skip_roster_shrinks_as_tests_run() {
        let mut results = TestResults::new(
            vec!["one".to_string(), "two".to_string(), "three".to_string()],
            "suite",
        );
        assert_eq!(results.suite_totals().skipped, 3);

        results.init_current_test(TestCaseDescriptor::new("mod", "one", ""));
        results.set_current_test(TestCaseDescriptor::new("mod", "two", ""));

        assert_eq!(results.suite_totals().skipped, 1);
        let export = results.export();
        assert_eq!(export.modules["mod"].skipped, 1);
    }

    #[test]
    fn test_export_is_fresh_not_cached() {
        let mut results = results_with_test("fresh");
        results.increment_passed_count();

        let first = results.export();
        let second = results.export();
        assert_eq!(first, second);

        results.log_assertion(AssertionOutcome::failed("late failure", ""));
        let third = results.export();
        assert_ne!(first, third);
        assert_eq!(third.modules["mod"].failures, 1);
    }

    #[test]
    fn test_set_last_error_records_policy_decision() {
        let mut results = results_with_test("err");

        results.set_last_error(ErrorEvent::runtime_error("boom"), false, true);

        let case_err = results.current_test().unwrap().last_error.as_ref().unwrap();
        assert_eq!(case_err.counts_toward_total, Some(false));
        assert_eq!(results.suite_errors().len(), 1);
        assert_eq!(results.last_error().unwrap().message, "boom");
    }
}
