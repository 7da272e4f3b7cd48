// Exported results snapshot, consumed by the outer runner/CI layer

use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated counts for one module in the exported snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleResult {
    pub tests: u32,
    pub failures: u32,
    pub errors: u32,
    pub skipped: u32,
    pub assertions_count: u32,
}

/// Read-only snapshot of a suite run.
///
/// Built on demand and never mutated after creation; two exports without an
/// intervening mutation compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedResults {
    pub suite_name: String,
    pub modules: BTreeMap<String, ModuleResult>,
    pub total_elapsed_time_ms: u64,
    #[serde(rename = "printA11Report", skip_serializing_if = "Option::is_none")]
    pub print_a11y_report: Option<bool>,
}
