// Per-test-case result structures

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

use crate::state::error::ErrorEvent;

/// Identifies one test case within a suite run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestCaseDescriptor {
    pub module: String,
    pub test_name: String,
    pub group: String,
}

impl TestCaseDescriptor {
    pub fn new(
        module: impl Into<String>,
        test_name: impl Into<String>,
        group: impl Into<String>,
    ) -> Self {
        Self {
            module: module.into(),
            test_name: test_name.into(),
            group: group.into(),
        }
    }
}

/// One expectation check, recorded in execution order.
///
/// Order is significant: failure replay prints assertions exactly as they ran.
#[derive(Debug, Clone, Serialize)]
pub struct AssertionOutcome {
    pub message: String,
    pub passed: bool,
    pub stack_trace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
}

impl AssertionOutcome {
    /// Create a passing assertion record
    pub fn passed(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            passed: true,
            stack_trace: String::new(),
            expected: None,
            actual: None,
        }
    }

    /// Create a failing assertion record
    pub fn failed(message: impl Into<String>, stack_trace: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            passed: false,
            stack_trace: stack_trace.into(),
            expected: None,
            actual: None,
        }
    }

    /// Attach the expected/actual rendering used for diff output on failure.
    pub fn with_values(mut self, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self.actual = Some(actual.into());
        self
    }
}

/// Lifecycle of a test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TestCaseStatus {
    Pending,
    Running,
    Passed,
    Failed,
    Errored,
}

/// One test case's aggregate state.
#[derive(Debug, Clone, Serialize)]
pub struct TestCaseResult {
    pub name: String,
    pub module: String,
    pub group: String,
    pub status: TestCaseStatus,
    /// A failed attempt will be superseded by a retry; its counts are kept
    /// out of the suite totals until the retry resolves.
    pub retry_pending: bool,
    pub passed: u32,
    pub failed: u32,
    pub errors: u32,
    pub skipped: u32,
    /// Failures that count toward the suite totals (retry-suppressed ones
    /// are tallied in `failed` but not here).
    pub counted_failed: u32,
    pub counted_errors: u32,
    pub assertions: Vec<AssertionOutcome>,
    pub elapsed_time_ms: u64,
    #[serde(skip)]
    pub(crate) started: Option<Instant>,
    pub last_error: Option<ErrorEvent>,
    pub screenshots: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a11y: Option<serde_json::Value>,
}

impl TestCaseResult {
    pub fn new(descriptor: TestCaseDescriptor) -> Self {
        Self {
            name: descriptor.test_name,
            module: descriptor.module,
            group: descriptor.group,
            status: TestCaseStatus::Pending,
            retry_pending: false,
            passed: 0,
            failed: 0,
            errors: 0,
            skipped: 0,
            counted_failed: 0,
            counted_errors: 0,
            assertions: Vec::new(),
            elapsed_time_ms: 0,
            started: None,
            last_error: None,
            screenshots: Vec::new(),
            a11y: None,
        }
    }

    /// True iff no failures and no errors were recorded for this case.
    pub fn case_passed(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }

    /// Whether this case saw any activity. The reporter opens a placeholder
    /// entry before the first test is named; placeholders that never ran are
    /// excluded from the export.
    pub(crate) fn ran(&self) -> bool {
        !self.assertions.is_empty()
            || self.passed + self.failed + self.errors + self.skipped > 0
            || matches!(
                self.status,
                TestCaseStatus::Passed | TestCaseStatus::Failed | TestCaseStatus::Errored
            )
    }

    pub(crate) fn activate(&mut self) {
        self.status = TestCaseStatus::Running;
        self.retry_pending = false;
        self.started = Some(Instant::now());
    }

    pub(crate) fn finalize(&mut self, retry_pending: bool) {
        self.retry_pending = retry_pending;
        self.status = if self.errors > 0 {
            TestCaseStatus::Errored
        } else if self.failed > 0 {
            TestCaseStatus::Failed
        } else {
            TestCaseStatus::Passed
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_case_is_pending_with_zero_counters() {
        let case = TestCaseResult::new(TestCaseDescriptor::new("login", "signInWithSso", ""));

        assert_eq!(case.status, TestCaseStatus::Pending);
        assert_eq!(case.passed + case.failed + case.errors + case.skipped, 0);
        assert!(case.assertions.is_empty());
        assert!(case.case_passed());
    }

    #[test]
    fn test_case_passed_false_on_failure() {
        let mut case = TestCaseResult::new(TestCaseDescriptor::default());
        case.failed = 1;

        assert!(!case.case_passed());
    }

    #[test]
    fn test_case_passed_false_on_error() {
        let mut case = TestCaseResult::new(TestCaseDescriptor::default());
        case.errors = 1;

        assert!(!case.case_passed());
    }

    #[test]
    fn test_finalize_picks_terminal_status() {
        let mut case = TestCaseResult::new(TestCaseDescriptor::default());
        case.finalize(false);
        assert_eq!(case.status, TestCaseStatus::Passed);

        case.failed = 2;
        case.finalize(false);
        assert_eq!(case.status, TestCaseStatus::Failed);

        // errors take precedence over failures
        case.errors = 1;
        case.finalize(true);
        assert_eq!(case.status, TestCaseStatus::Errored);
        assert!(case.retry_pending);
    }

    #[test]
    fn test_placeholder_never_ran() {
        let case = TestCaseResult::new(TestCaseDescriptor::new("mod", "", ""));
        assert!(!case.ran());

        let mut active = TestCaseResult::new(TestCaseDescriptor::new("mod", "t", ""));
        active.assertions.push(AssertionOutcome::passed("ok"));
        assert!(active.ran());
    }

    #[test]
    fn test_assertion_outcome_with_values() {
        let outcome = AssertionOutcome::failed("expected title", "at steps.rs:10")
            .with_values("Home", "Login");

        assert!(!outcome.passed);
        assert_eq!(outcome.expected.as_deref(), Some("Home"));
        assert_eq!(outcome.actual.as_deref(), Some("Login"));
    }
}
