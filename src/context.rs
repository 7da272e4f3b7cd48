// Execution context - how the core learns about its surrounding process

/// Environment variable set on spawned worker processes.
pub const ENV_WORKER: &str = "WEBTESTIFY_WORKER";

/// Environment variable carrying the environment label a worker runs against.
pub const ENV_LABEL: &str = "WEBTESTIFY_ENV";

/// Capability describing the process this suite run executes in.
///
/// Injected at reporter construction so the core never inspects process
/// globals directly; worker detection affects output formatting only.
pub trait ExecutionContext: Send + Sync {
    /// True when running inside a spawned worker process (parallel mode).
    fn is_worker_process(&self) -> bool;

    /// Label identifying the environment this worker was spawned for.
    fn env_label(&self) -> Option<String> {
        None
    }
}

/// Reads worker state from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessContext;

impl ExecutionContext for ProcessContext {
    fn is_worker_process(&self) -> bool {
        std::env::var(ENV_WORKER).is_ok_and(|v| v == "1" || v == "true")
    }

    fn env_label(&self) -> Option<String> {
        std::env::var(ENV_LABEL).ok().filter(|v| !v.is_empty())
    }
}

/// Fixed context for embedders that track worker state themselves.
#[derive(Debug, Clone, Default)]
pub struct StaticContext {
    pub worker: bool,
    pub env_label: Option<String>,
}

impl StaticContext {
    pub fn worker(env_label: impl Into<String>) -> Self {
        Self {
            worker: true,
            env_label: Some(env_label.into()),
        }
    }
}

impl ExecutionContext for StaticContext {
    fn is_worker_process(&self) -> bool {
        self.worker
    }

    fn env_label(&self) -> Option<String> {
        self.env_label.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_context_defaults_to_main_process() {
        let ctx = StaticContext::default();
        assert!(!ctx.is_worker_process());
        assert!(ctx.env_label().is_none());
    }

    #[test]
    fn test_static_context_worker() {
        let ctx = StaticContext::worker("chrome");
        assert!(ctx.is_worker_process());
        assert_eq!(ctx.env_label().as_deref(), Some("chrome"));
    }
}
