//! Demo features — one free, two gated by plan
//!
//! The computations themselves know nothing about licensing; the public
//! entry points wrap them with a plan requirement.

use plangate_core::{require_plan, GateError, LicenseSource};

/// Always available.
pub fn hello() -> String {
    "Hello from core logic!".to_string()
}

/// Requires the `pro` plan.
pub fn pro_feature(source: &dyn LicenseSource, x: i64, y: i64) -> Result<String, GateError> {
    require_plan(source, "pro", product).call((x, y))
}

/// Requires the `enterprise` plan.
pub fn enterprise_feature(source: &dyn LicenseSource, name: &str) -> Result<String, GateError> {
    require_plan(source, "enterprise", advanced_run).call(name)
}

fn product((x, y): (i64, i64)) -> String {
    format!("[PRO] Computed product of {x} * {y} = {}", x.saturating_mul(y))
}

fn advanced_run(name: &str) -> String {
    format!("[ENTERPRISE] Running advanced feature set for project '{name}'")
}
