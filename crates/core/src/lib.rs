//! Plangate Core - License Enforcement Engine
//!
//! This crate validates a license key once per process and gates features by plan:
//! - Environment-driven configuration with a development bypass
//! - Remote verification against a license authority
//! - A process-wide, one-shot status cache with single-flight verification
//! - Wrappers that restrict operations to specific subscription plans

pub mod client;
pub mod config;
pub mod enforcer;
pub mod gate;
pub mod types;

use std::sync::OnceLock;

pub use client::{HttpVerifier, Verify, VerifyError};
pub use config::LicenseConfig;
pub use enforcer::Enforcer;
pub use gate::{
    authorize, require_any_plan, require_license, require_plan, GateError, Gated, LicenseSource,
    PermissionError, PlanRequirement,
};
pub use types::{FailureKind, LicenseStatus, LicenseValidationError};

/// Plangate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

static GLOBAL: OnceLock<Enforcer> = OnceLock::new();

/// The process-wide enforcer, configured from the environment on first use.
pub fn global() -> &'static Enforcer {
    GLOBAL.get_or_init(|| Enforcer::new(LicenseConfig::from_env()))
}

/// Validates the process license. See [`Enforcer::enforce_license`].
pub fn enforce_license() -> Result<LicenseStatus, LicenseValidationError> {
    global().enforce_license()
}

/// Current process license status. See [`Enforcer::license_status`].
pub fn license_status() -> Result<LicenseStatus, LicenseValidationError> {
    global().license_status()
}
