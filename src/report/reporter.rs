// Rich console reporter
// Converts raw execution/error signals into TestResults mutations and
// console/file output. Storage lives in TestResults; retry policy lookups
// are delegated to SuiteRetries.

use std::path::Path;

use console::Style;
use once_cell::sync::Lazy;

use crate::config::Settings;
use crate::context::{ExecutionContext, ProcessContext};
use crate::retry::SuiteRetries;
use crate::state::{
    AssertionOutcome, ErrorEvent, ExportedResults, TestCaseDescriptor, TestCaseResult,
    TestResults,
};
use crate::utils::{self, Screenshots, symbols};

use super::{ConsoleFormatter, ResultRecorder, SimplifiedReporter, diff};

static GREEN: Lazy<Style> = Lazy::new(|| Style::new().green());
static RED: Lazy<Style> = Lazy::new(|| Style::new().red());
static CYAN: Lazy<Style> = Lazy::new(|| Style::new().cyan());
static YELLOW: Lazy<Style> = Lazy::new(|| Style::new().yellow());
static MUTED: Lazy<Style> = Lazy::new(|| Style::new().dim());
static WORKER_TAG: Lazy<Style> = Lazy::new(|| Style::new().white().on_black());

/// Suite metadata handed to the reporter at construction.
#[derive(Debug, Clone, Default)]
pub struct SuiteOptions {
    pub suite_name: String,
    pub module_key: String,
    pub group_name: String,
    pub report_prefix: String,
}

/// The detailed reporter: owns the suite's [`TestResults`], decides the
/// count-increment policy from error metadata and retry state, and renders
/// progress/failure output.
pub struct Reporter {
    base: SimplifiedReporter,
    test_results: TestResults,
    suite_retries: Option<SuiteRetries>,
    suite_name: String,
    context: Box<dyn ExecutionContext>,
    print_a11y: bool,
}

impl Reporter {
    /// Create a reporter for one suite run over the enumerated test list
    pub fn new(tests: Vec<String>, settings: Settings, options: SuiteOptions) -> Self {
        let mut test_results = TestResults::new(tests, options.suite_name.clone());
        test_results.set_report_prefix(options.report_prefix);
        test_results.init_current_test(TestCaseDescriptor::new(
            options.module_key,
            "",
            options.group_name,
        ));

        Self {
            base: SimplifiedReporter::new(settings),
            test_results,
            suite_retries: None,
            suite_name: options.suite_name,
            context: Box::new(ProcessContext),
            print_a11y: false,
        }
    }

    pub fn with_suite_retries(mut self, suite_retries: SuiteRetries) -> Self {
        self.suite_retries = Some(suite_retries);
        self
    }

    pub fn with_context(mut self, context: Box<dyn ExecutionContext>) -> Self {
        self.context = context;
        self
    }

    pub fn settings(&self) -> &Settings {
        self.base.settings()
    }

    pub fn suite_name(&self) -> &str {
        &self.suite_name
    }

    /// The live test object handed to user test code.
    pub fn current_test(&self) -> Option<&TestCaseResult> {
        self.test_results.current_test()
    }

    pub fn results(&self) -> &TestResults {
        &self.test_results
    }

    pub fn unit_tests_mode(&self) -> bool {
        self.settings().unit_tests_mode
    }

    pub fn current_test_case_passed(&self) -> bool {
        self.test_results.current_test_case_passed()
    }

    pub fn all_tests_passed(&self) -> bool {
        self.test_results.tests_passed()
    }

    ////////////////////////////////////////////////////////////
    // Test case lifecycle
    ////////////////////////////////////////////////////////////

    pub fn init_current_test(&mut self, descriptor: TestCaseDescriptor) {
        self.test_results.init_current_test(descriptor);
    }

    pub fn set_current_test(&mut self, descriptor: TestCaseDescriptor) {
        self.test_results.set_current_test(descriptor);
    }

    pub fn reset_current_test_name(&mut self) {
        self.test_results.reset_current_test_name();
    }

    pub fn set_elapsed_time(&mut self) {
        self.test_results.set_elapsed_time();
    }

    /// Stamps elapsed time and moves the case into its terminal status, or
    /// parks it retry-pending when a re-run will supersede this attempt.
    pub fn test_case_finished(&mut self) {
        self.test_results.set_elapsed_time();

        let retry_pending =
            !self.test_results.current_test_case_passed() && self.retry_eligible();
        self.test_results.finalize_current_test(retry_pending);
    }

    pub fn test_suite_finished(&mut self) {
        self.test_results.set_total_elapsed_time();
    }

    /// Voids the superseded attempt's bookkeeping and spends one retry
    /// attempt, so only the final attempt lands in the exported totals.
    pub fn retry_current_test(&mut self) {
        let test_name = self.test_results.current_test_name().to_string();
        if let Some(retries) = self.suite_retries.as_mut() {
            retries.increment_test_retries(&test_name);
        }

        self.reset_current_test_passed_count();
        self.test_results.void_current_test_failures();
    }

    /// Subtracts the current test case's passed assertions from the totals.
    pub fn reset_current_test_passed_count(&mut self) {
        let assertions_count = self
            .test_results
            .current_test()
            .map(|case| case.passed)
            .unwrap_or(0);

        self.test_results.subtract_passed_count(assertions_count);
    }

    ////////////////////////////////////////////////////////////
    // Count policy
    ////////////////////////////////////////////////////////////

    /// Whether a failure/error should count toward the suite totals.
    ///
    /// Defaults to true; false when the event carries an explicit suppression
    /// or when the active test is eligible for a retry, since a subsequent
    /// attempt will supersede this one.
    pub fn should_increment_total_count(&self, err: &ErrorEvent) -> bool {
        let mut increment_total = err.counts_toward_total.unwrap_or(true);
        if self.retry_eligible() {
            increment_total = false;
        }

        increment_total
    }

    fn retry_eligible(&self) -> bool {
        let test_name = self.test_results.current_test_name();
        if test_name.is_empty() {
            return false;
        }

        self.suite_retries
            .as_ref()
            .is_some_and(|retries| retries.should_retry_test(test_name))
    }

    ////////////////////////////////////////////////////////////
    // Results logging
    ////////////////////////////////////////////////////////////

    /// Records an assertion outcome, applying the retry policy to failures.
    pub fn log_assert_result(&mut self, outcome: AssertionOutcome) {
        let increment_total = outcome.passed || self.failure_counts_toward_total();
        self.test_results
            .log_assertion_with_total(outcome, increment_total);
    }

    fn failure_counts_toward_total(&self) -> bool {
        !self.retry_eligible()
    }

    pub fn set_file_name_prefix(&mut self, prefix: impl Into<String>) {
        self.test_results.set_report_prefix(prefix);
    }

    ////////////////////////////////////////////////////////////
    // Rendering
    ////////////////////////////////////////////////////////////

    /// True when the one-line form must be rendered instead of the detailed
    /// banners: inside a worker process, with detailed output off, or in a
    /// unit-tests run.
    pub fn uses_simplified_output(&self) -> bool {
        self.context.is_worker_process()
            || !self.settings().detailed_output
            || self.unit_tests_mode()
    }

    /// Replays the failed assertions' stack traces in execution order.
    pub fn print_assertions(testcase: &TestCaseResult) {
        for assertion in &testcase.assertions {
            if assertion.passed {
                continue;
            }

            let mut message = assertion.message.clone();
            if !assertion.stack_trace.is_empty() {
                message.push('\n');
                message.push_str(&assertion.stack_trace);
            }
            utils::show_stack_trace(&message);

            if let (Some(expected), Some(actual)) = (&assertion.expected, &assertion.actual) {
                println!("{}", diff::render_diff(expected, actual));
            }
        }
    }

    fn log_detailed(&self, message: &str) {
        if self.settings().detailed_output && !self.settings().silent {
            println!("{}", message);
        }
    }

    ////////////////////////////////////////////////////////////
    // Accessibility audits
    ////////////////////////////////////////////////////////////

    /// Attach an accessibility-audit result to the active test case.
    pub fn set_axe_results(&mut self, results: serde_json::Value) {
        self.test_results.set_axe_results(results);
    }

    /// Flag the export to include the accessibility report.
    pub fn print_a11y_report(&mut self) {
        self.print_a11y = true;
    }

    pub fn a11y_report_enabled(&self) -> bool {
        self.print_a11y
    }

    ////////////////////////////////////////////////////////////
    // Screenshots
    ////////////////////////////////////////////////////////////

    /// Persists failure evidence and records its path on the results.
    ///
    /// Best-effort: a write failure is logged and never affects counters.
    #[deprecated(note = "only used by the legacy JSON wire protocol")]
    pub fn save_error_screenshot(&mut self, screenshot_content: &[u8]) {
        if !self.settings().screenshots.on_error || screenshot_content.is_empty() {
            return;
        }

        let Some(case) = self.test_results.current_test() else {
            return;
        };
        let prefix = format!(
            "{}/{}{}",
            case.module,
            self.test_results.report_prefix(),
            case.name
        );
        let path = self.settings().screenshots.path.clone();

        let file_name = Screenshots::file_name_for(&prefix, true, Path::new(&path));
        match Screenshots::write_screenshot(&file_name, screenshot_content) {
            Ok(()) => self.test_results.log_screenshot_file(file_name),
            Err(err) => tracing::warn!("Failed to save error screenshot: {:#}", err),
        }
    }

    ////////////////////////////////////////////////////////////
    // Export
    ////////////////////////////////////////////////////////////

    /// The exportable snapshot, with the accessibility flag folded in.
    pub fn export_results(&self) -> ExportedResults {
        let mut results = self.test_results.export();
        if self.print_a11y {
            results.print_a11y_report = Some(true);
        }

        results
    }
}

impl ConsoleFormatter for Reporter {
    fn log_test_case(&self, test_name: &str) {
        if self.settings().live_output || !self.settings().parallel_mode {
            let leader = if self.settings().silent { "\n" } else { "\n\n\n" };
            println!(
                "{}  Running {}{}",
                leader,
                GREEN.apply_to(test_name),
                MUTED.apply_to(":")
            );

            let columns = console::Term::stdout().size().1 as usize;
            let width = std::cmp::max(100, columns / 2);
            println!("{}", MUTED.apply_to("─".repeat(width)));
        } else {
            println!();
            println!(" – {}\n", GREEN.apply_to(test_name));
        }
    }

    fn print_test_result(&self) {
        let ok = self.test_results.current_test_case_passed();
        let elapsed_time = self
            .test_results
            .current_test()
            .map(|case| case.elapsed_time_ms)
            .unwrap_or(0);

        if self.uses_simplified_output() {
            self.print_simplified_test_result(ok, elapsed_time, self.context.is_worker_process());
            return;
        }

        let Some(case) = self.test_results.current_test() else {
            return;
        };

        if ok && case.passed > 0 {
            self.log_detailed(&format!(
                "\n  {} {} assertions. ({})",
                GREEN.apply_to("PASSED."),
                GREEN.apply_to(case.passed),
                utils::format_elapsed_time(elapsed_time, true)
            ));
        } else if ok && case.passed == 0 {
            if self.settings().start_session {
                self.log_detailed(&format!("{}", MUTED.apply_to("No assertions ran.\n")));
            }
        } else {
            self.log_detailed(&format!(
                "\n  {} {} ({})",
                RED.apply_to("FAILED:"),
                self.get_failure_message(),
                utils::format_elapsed_time(elapsed_time, true)
            ));
        }
    }

    /// One-line status form: glyph, optional worker tag, suite tag, test
    /// name, and an elapsed-time suffix for anything over 20ms.
    fn print_simplified_test_result(&self, ok: bool, elapsed_time_ms: u64, is_child_process: bool) {
        let mut line: Vec<String> = Vec::new();

        let glyph = if ok { symbols::OK } else { symbols::FAIL };
        let glyph_style = if ok { &*GREEN } else { &*RED };
        line.push(glyph_style.apply_to(glyph).to_string());

        if !self.unit_tests_mode() {
            if is_child_process {
                if let Some(label) = self.context.env_label() {
                    line.push(WORKER_TAG.apply_to(label).to_string());
                }
            }

            line.push(CYAN.apply_to(format!("[{}]", self.suite_name)).to_string());
        }

        let test_name = self.test_results.current_test_name();
        line.push(if ok {
            test_name.to_string()
        } else {
            RED.apply_to(test_name).to_string()
        });

        if elapsed_time_ms > 20 {
            line.push(
                YELLOW
                    .apply_to(format!(
                        "({})",
                        utils::format_elapsed_time(elapsed_time_ms, true)
                    ))
                    .to_string(),
            );
        }

        println!("{}", line.join(" "));

        if ok {
            return;
        }

        let Some(case) = self.test_results.current_test() else {
            return;
        };

        if self.unit_tests_mode() {
            if let Some(err) = &case.last_error {
                tracing::error!("{}", err);
            }
        } else {
            Self::print_assertions(case);
        }
    }

    /// Fixed order (failed, errors, passed, skipped), zero segments omitted,
    /// " and " before the final segment.
    fn get_failure_message(&self) -> String {
        let Some(case) = self.test_results.current_test() else {
            return String::new();
        };

        let mut segments: Vec<String> = Vec::new();

        if case.failed > 0 {
            let noun = if case.failed == 1 { "assertion" } else { "assertions" };
            segments.push(format!("{} {} failed", case.failed, noun));
        }

        if case.errors > 0 {
            let noun = if case.errors == 1 { "error" } else { "errors" };
            segments.push(format!("{} {}", case.errors, noun));
        }

        if case.passed > 0 {
            segments.push(format!("{} passed", case.passed));
        }

        if case.skipped > 0 {
            segments.push(format!("{} skipped", case.skipped));
        }

        let mut message = segments.join(", ");
        if let Some(last_comma) = message.rfind(", ") {
            message.replace_range(last_comma..last_comma + 2, " and ");
        }

        message
    }
}

impl ResultRecorder for Reporter {
    fn register_passed(&mut self, message: &str) {
        self.log_detailed(&format!("  {} {}", GREEN.apply_to(symbols::OK), message));
        self.test_results.increment_passed_count();
    }

    fn register_failed(&mut self, err: ErrorEvent) {
        let increment_total = self.should_increment_total_count(&err);

        self.test_results.set_last_error(err, increment_total, false);
        self.test_results.increment_failed_count(increment_total);
    }

    fn register_test_error(&mut self, err: &mut ErrorEvent) {
        if err.registered {
            return;
        }

        self.base.register_test_error(err);

        let increment_total = self.should_increment_total_count(err);

        self.test_results
            .set_last_error(err.clone(), increment_total, true);
        self.test_results.increment_error_count(increment_total);
    }
}
