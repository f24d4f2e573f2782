//! Core types for license status and enforcement failures

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::client::VerifyError;

/// Reason reported by the synthetic status produced when checks are disabled.
pub const DEV_MODE_REASON: &str = "License check disabled via DISABLE_LICENSE_CHECK";

/// Outcome of a license check.
///
/// Validity is decided by the verifier, never by the shape of the data: a
/// status with every optional field set may still be invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseStatus {
    pub valid: bool,
    /// Always populated, even for valid licenses (e.g. "OK").
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_id: Option<String>,
    /// Subscription tier. `None` means no tier is assigned, which is not the
    /// same as `Some("")`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seats: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
}

impl LicenseStatus {
    /// Status returned when the authority does not know the key.
    pub fn not_found() -> Self {
        Self {
            valid: false,
            reason: "License not found".to_string(),
            license_id: None,
            plan: None,
            seats: None,
            customer_name: None,
        }
    }

    /// Synthetic always-valid status used when checks are disabled.
    pub fn development() -> Self {
        Self {
            valid: true,
            reason: DEV_MODE_REASON.to_string(),
            license_id: Some("DEV-MODE".to_string()),
            plan: Some("dev".to_string()),
            seats: Some(1),
            customer_name: Some("Development Mode".to_string()),
        }
    }

    pub fn customer_or_unknown(&self) -> &str {
        self.customer_name.as_deref().unwrap_or("Unknown Customer")
    }

    pub fn plan_or_unassigned(&self) -> &str {
        self.plan.as_deref().unwrap_or("unassigned")
    }
}

/// Coarse classification of why licensing could not be established.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Required local configuration is missing; nothing was sent.
    Configuration,
    /// The authority could not be reached. Not cached.
    Connectivity,
    /// The authority answered with something unusable. Not cached.
    Server,
    /// The authority says the license is invalid. Cached for the process.
    InvalidLicense,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Configuration => write!(f, "configuration"),
            FailureKind::Connectivity => write!(f, "connectivity"),
            FailureKind::Server => write!(f, "server"),
            FailureKind::InvalidLicense => write!(f, "invalid license"),
        }
    }
}

/// Licensing could not be established for this process.
#[derive(Debug, thiserror::Error)]
pub enum LicenseValidationError {
    #[error("No license key found. Set environment variable {env_var}.")]
    MissingKey { env_var: String },
    #[error(transparent)]
    Verification(#[from] VerifyError),
    #[error("Invalid license: {reason}")]
    Invalid { reason: String },
}

impl LicenseValidationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            LicenseValidationError::MissingKey { .. } => FailureKind::Configuration,
            LicenseValidationError::Verification(e) => e.kind(),
            LicenseValidationError::Invalid { .. } => FailureKind::InvalidLicense,
        }
    }
}
