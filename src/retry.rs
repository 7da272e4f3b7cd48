// Retry budgets per test and per suite

use std::collections::HashMap;

/// Tracks how many retry attempts remain for each test and for the suite.
///
/// The reporter consults [`should_retry_test`](Self::should_retry_test) when
/// deciding whether a failure counts toward the suite totals; the runner
/// increments the attempt counters when it actually re-runs something.
#[derive(Debug, Clone, Default)]
pub struct SuiteRetries {
    test_max_retries: u32,
    suite_max_retries: u32,
    test_retries: HashMap<String, u32>,
    suite_retries: u32,
}

impl SuiteRetries {
    pub fn new(test_max_retries: u32, suite_max_retries: u32) -> Self {
        Self {
            test_max_retries,
            suite_max_retries,
            test_retries: HashMap::new(),
            suite_retries: 0,
        }
    }

    /// True while the named test still has retry attempts left.
    pub fn should_retry_test(&self, test_name: &str) -> bool {
        self.test_max_retries > self.test_attempts(test_name)
    }

    /// True while the whole suite still has retry attempts left.
    pub fn should_retry_suite(&self) -> bool {
        self.suite_max_retries > self.suite_retries
    }

    pub fn increment_test_retries(&mut self, test_name: &str) {
        *self.test_retries.entry(test_name.to_string()).or_insert(0) += 1;
    }

    pub fn increment_suite_retries(&mut self) {
        self.suite_retries += 1;
    }

    pub fn test_attempts(&self, test_name: &str) -> u32 {
        self.test_retries.get(test_name).copied().unwrap_or(0)
    }

    pub fn suite_attempts(&self) -> u32 {
        self.suite_retries
    }
}
