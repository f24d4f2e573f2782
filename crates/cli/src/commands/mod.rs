//! CLI commands

pub mod demo;
pub mod feature;
pub mod status;

use plangate_core::{GateError, LicenseValidationError};

/// What to print for one gated feature call.
#[derive(Debug, PartialEq, Eq)]
pub enum GatedLine {
    /// The feature ran; its output.
    Output(String),
    /// The plan does not cover the feature; the labelled diagnostic.
    Blocked(String),
}

/// Splits a gated result into printable output or a licensing failure.
///
/// Permission failures become a `Blocked` line so the caller can carry on;
/// licensing failures are returned as errors.
pub fn gated_line(
    label: &str,
    result: Result<String, GateError>,
) -> Result<GatedLine, LicenseValidationError> {
    match result {
        Ok(output) => Ok(GatedLine::Output(output)),
        Err(GateError::Permission(e)) => Ok(GatedLine::Blocked(format!("{label} {e}"))),
        Err(GateError::License(e)) => Err(e),
    }
}

pub(crate) fn print_license_error(err: &LicenseValidationError) {
    use colored::Colorize;

    eprintln!("{} {}", "[LICENSE ERROR]".red().bold(), err);
    tracing::debug!(kind = %err.kind(), "license enforcement failed");
}

/// Prints a gated line. Returns `false` if licensing failed.
pub(crate) fn print_gated(label: &str, result: Result<String, GateError>) -> bool {
    use colored::Colorize;

    match gated_line(label, result) {
        Ok(GatedLine::Output(output)) => {
            println!("{output}");
            true
        }
        Ok(GatedLine::Blocked(msg)) => {
            println!("{}", msg.yellow());
            true
        }
        Err(e) => {
            print_license_error(&e);
            false
        }
    }
}
