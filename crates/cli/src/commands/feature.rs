//! Single-feature commands (`hello`, `pro`, `enterprise`)

use anyhow::Result;
use plangate_core::{Enforcer, GateError};
use std::process::ExitCode;

use super::demo::{ENTERPRISE_BLOCKED, PRO_BLOCKED};
use super::print_gated;
use crate::features;

pub fn run_hello() -> Result<ExitCode> {
    println!("{}", features::hello());
    Ok(ExitCode::SUCCESS)
}

pub fn run_pro(enforcer: &Enforcer, x: i64, y: i64) -> Result<ExitCode> {
    Ok(finish(PRO_BLOCKED, features::pro_feature(enforcer, x, y)))
}

pub fn run_enterprise(enforcer: &Enforcer, name: &str) -> Result<ExitCode> {
    Ok(finish(
        ENTERPRISE_BLOCKED,
        features::enterprise_feature(enforcer, name),
    ))
}

/// A lone feature that was blocked or unlicensed is a failed run.
fn finish(label: &str, result: Result<String, GateError>) -> ExitCode {
    let ran = result.is_ok();
    print_gated(label, result);
    if ran {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
