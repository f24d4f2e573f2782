//! Feature gating — wraps operations with a license and plan check
//!
//! Wrapped operations stay license-unaware: the gate decides whether to call
//! them and hands back their output untouched.

use std::fmt;

use crate::enforcer::Enforcer;
use crate::types::{LicenseStatus, LicenseValidationError};

/// Anything that can answer "what is the current license status".
pub trait LicenseSource {
    fn license_status(&self) -> Result<LicenseStatus, LicenseValidationError>;
}

impl LicenseSource for Enforcer {
    fn license_status(&self) -> Result<LicenseStatus, LicenseValidationError> {
        Enforcer::license_status(self)
    }
}

/// Which plans an operation accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanRequirement {
    /// Any valid license.
    Any,
    Plan(String),
    /// Any of the listed plans. An empty list places no restriction.
    AnyOf(Vec<String>),
}

impl PlanRequirement {
    pub fn plan(plan: impl Into<String>) -> Self {
        PlanRequirement::Plan(plan.into())
    }

    pub fn any_of<I, S>(plans: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PlanRequirement::AnyOf(plans.into_iter().map(Into::into).collect())
    }

    fn is_unrestricted(&self) -> bool {
        match self {
            PlanRequirement::Any => true,
            PlanRequirement::Plan(_) => false,
            PlanRequirement::AnyOf(plans) => plans.is_empty(),
        }
    }

    fn permits(&self, actual: &str) -> bool {
        match self {
            PlanRequirement::Any => true,
            PlanRequirement::Plan(plan) => plan == actual,
            PlanRequirement::AnyOf(plans) => plans.iter().any(|p| p == actual),
        }
    }

    /// Checks a license plan against this requirement.
    pub fn check(&self, plan: Option<&str>) -> Result<(), PermissionError> {
        if self.is_unrestricted() {
            return Ok(());
        }
        match plan {
            None => Err(PermissionError::MissingPlan {
                required: self.clone(),
            }),
            Some(actual) if self.permits(actual) => Ok(()),
            Some(actual) => Err(PermissionError::WrongPlan {
                required: self.clone(),
                actual: actual.to_string(),
            }),
        }
    }
}

impl fmt::Display for PlanRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanRequirement::Any => write!(f, "a valid license"),
            PlanRequirement::Plan(plan) => write!(f, "plan '{plan}'"),
            PlanRequirement::AnyOf(plans) => write!(f, "one of plans [{}]", plans.join(", ")),
        }
    }
}

/// The license is valid but does not cover the requested operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PermissionError {
    #[error("This feature requires {required}, but your license has no plan assigned.")]
    MissingPlan { required: PlanRequirement },
    #[error("This feature requires {required}, but your license plan is '{actual}'.")]
    WrongPlan {
        required: PlanRequirement,
        actual: String,
    },
}

/// Why a gated operation did not run.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// Licensing itself could not be established.
    #[error(transparent)]
    License(#[from] LicenseValidationError),
    /// Licensing is fine but the plan is insufficient.
    #[error(transparent)]
    Permission(#[from] PermissionError),
}

/// Checks the current license against a requirement and returns the status.
pub fn authorize(
    source: &dyn LicenseSource,
    requirement: &PlanRequirement,
) -> Result<LicenseStatus, GateError> {
    let status = source.license_status()?;
    requirement.check(status.plan.as_deref())?;
    Ok(status)
}

/// An operation that only runs when the license satisfies a requirement.
///
/// Multi-argument operations take their arguments as a tuple.
pub struct Gated<'a, F> {
    source: &'a dyn LicenseSource,
    requirement: PlanRequirement,
    operation: F,
}

impl<'a, F> Gated<'a, F> {
    pub fn new(source: &'a dyn LicenseSource, requirement: PlanRequirement, operation: F) -> Self {
        Self {
            source,
            requirement,
            operation,
        }
    }

    pub fn requirement(&self) -> &PlanRequirement {
        &self.requirement
    }

    /// Runs the operation if permitted. Its output, including any `Result`
    /// it returns, is passed through unchanged.
    pub fn call<I, O>(&self, input: I) -> Result<O, GateError>
    where
        F: Fn(I) -> O,
    {
        authorize(self.source, &self.requirement)?;
        Ok((self.operation)(input))
    }
}

/// Requires a valid license with any plan.
pub fn require_license<F>(source: &dyn LicenseSource, operation: F) -> Gated<'_, F> {
    Gated::new(source, PlanRequirement::Any, operation)
}

/// Requires exactly `plan`.
pub fn require_plan<F>(
    source: &dyn LicenseSource,
    plan: impl Into<String>,
    operation: F,
) -> Gated<'_, F> {
    Gated::new(source, PlanRequirement::plan(plan), operation)
}

/// Requires one of `plans`; an empty list accepts any valid license.
pub fn require_any_plan<I, S, F>(
    source: &dyn LicenseSource,
    plans: I,
    operation: F,
) -> Gated<'_, F>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Gated::new(source, PlanRequirement::any_of(plans), operation)
}
