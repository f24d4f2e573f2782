//! Default command — enforce the license once, then run every demo feature

use anyhow::Result;
use colored::Colorize;
use plangate_core::Enforcer;
use std::process::ExitCode;

use super::{print_gated, print_license_error};
use crate::features;

pub const PRO_BLOCKED: &str = "[PRO FEATURE BLOCKED]";
pub const ENTERPRISE_BLOCKED: &str = "[ENTERPRISE FEATURE BLOCKED]";

/// Runs the demo.
///
/// A licensing failure stops the process with a non-zero exit code. A plan
/// that doesn't cover a feature only skips that feature.
pub fn run(enforcer: &Enforcer) -> Result<ExitCode> {
    let status = match enforcer.enforce_license() {
        Ok(status) => status,
        Err(e) => {
            print_license_error(&e);
            return Ok(ExitCode::FAILURE);
        }
    };

    println!(
        "{} License verified for {} (plan={})",
        "\u{2714}".green(),
        status.customer_or_unknown().bold(),
        status.plan_or_unassigned().cyan()
    );

    println!("{}", features::hello());

    let ok = print_gated(PRO_BLOCKED, features::pro_feature(enforcer, 3, 4))
        && print_gated(
            ENTERPRISE_BLOCKED,
            features::enterprise_feature(enforcer, "Sentinel"),
        );

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
