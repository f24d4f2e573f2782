//! `plangate status` — show the verified license

use anyhow::Result;
use colored::Colorize;
use plangate_core::{Enforcer, LicenseStatus};
use std::process::ExitCode;

use super::print_license_error;

pub fn run(enforcer: &Enforcer) -> Result<ExitCode> {
    match enforcer.enforce_license() {
        Ok(status) => {
            print_status(&status);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            print_license_error(&e);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_status(status: &LicenseStatus) {
    println!("  {}: {}", "Customer".bold(), status.customer_or_unknown());
    println!("  {}: {}", "Plan".bold(), status.plan_or_unassigned().cyan());
    if let Some(ref id) = status.license_id {
        println!("  {}: {}", "License".bold(), id);
    }
    if let Some(seats) = status.seats {
        println!("  {}: {}", "Seats".bold(), seats);
    }
    println!("  {}: {}", "Reason".bold(), status.reason.dimmed());
}
