// Error events raised during test execution

use serde::Serialize;
use thiserror::Error;

/// Classification of a failing condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Expected vs. actual mismatch, counted as `failed`.
    AssertionFailure,
    /// Uncaught error during test execution, counted as `errors`.
    RuntimeError,
}

/// A failure or error signal raised by test execution.
///
/// The total-count override and the registration guard are explicit fields,
/// so callers never have to probe ad hoc properties on a generic error value.
#[derive(Debug, Clone, Error, Serialize)]
#[error("{message}")]
pub struct ErrorEvent {
    pub kind: ErrorKind,
    pub message: String,
    pub stack_trace: String,
    /// Explicit override of the total-count policy; `None` means default.
    pub counts_toward_total: Option<bool>,
    /// Set once the event has been registered. Registering again is a no-op.
    pub registered: bool,
}

impl ErrorEvent {
    /// Create an assertion failure event
    pub fn assertion_failure(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::AssertionFailure,
            message: message.into(),
            stack_trace: String::new(),
            counts_toward_total: None,
            registered: false,
        }
    }

    /// Create a runtime error event
    pub fn runtime_error(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::RuntimeError,
            message: message.into(),
            stack_trace: String::new(),
            counts_toward_total: None,
            registered: false,
        }
    }

    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = stack_trace.into();
        self
    }

    /// Declare that this event must not count toward the suite totals.
    pub fn suppress_total_count(mut self) -> Self {
        self.counts_toward_total = Some(false);
        self
    }
}
