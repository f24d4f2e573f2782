use plangate_core::{
    authorize, require_any_plan, require_license, require_plan, Enforcer, FailureKind, GateError,
    Gated, LicenseConfig, LicenseStatus, PermissionError, PlanRequirement, Verify, VerifyError,
};
use std::cell::Cell;

struct FixedVerifier(LicenseStatus);

impl Verify for FixedVerifier {
    fn verify(&self, _key: &str) -> Result<LicenseStatus, VerifyError> {
        Ok(self.0.clone())
    }
}

fn enforcer_with_plan(plan: Option<&str>) -> Enforcer {
    let status = LicenseStatus {
        valid: true,
        reason: "OK".to_string(),
        license_id: Some("LIC-7".to_string()),
        plan: plan.map(str::to_string),
        seats: None,
        customer_name: None,
    };
    Enforcer::with_verifier(LicenseConfig::default(), FixedVerifier(status))
        .with_key_lookup(|_| Some("KEY".to_string()))
}

fn multiply((x, y): (i64, i64)) -> String {
    format!("{x} * {y} = {}", x * y)
}

fn permission_error(result: Result<String, GateError>) -> PermissionError {
    match result {
        Err(GateError::Permission(e)) => e,
        other => panic!("expected permission error, got {other:?}"),
    }
}

// --- Single plan ---

#[test]
fn matching_plan_runs_operation_unchanged() {
    let enforcer = enforcer_with_plan(Some("enterprise"));
    let gated = require_plan(&enforcer, "enterprise", multiply);
    assert_eq!(gated.call((3, 4)).unwrap(), "3 * 4 = 12");
}

#[test]
fn wrong_plan_names_required_and_actual() {
    let enforcer = enforcer_with_plan(Some("pro"));
    let gated = require_plan(&enforcer, "enterprise", multiply);

    let err = permission_error(gated.call((3, 4)));
    assert_eq!(
        err,
        PermissionError::WrongPlan {
            required: PlanRequirement::plan("enterprise"),
            actual: "pro".to_string(),
        }
    );
    assert_eq!(
        err.to_string(),
        "This feature requires plan 'enterprise', but your license plan is 'pro'."
    );
}

#[test]
fn missing_plan_names_required_plan() {
    let enforcer = enforcer_with_plan(None);
    let gated = require_plan(&enforcer, "pro", multiply);

    let err = permission_error(gated.call((1, 1)));
    assert!(matches!(err, PermissionError::MissingPlan { .. }));
    assert_eq!(
        err.to_string(),
        "This feature requires plan 'pro', but your license has no plan assigned."
    );
}

#[test]
fn empty_plan_string_is_a_plan_not_an_absence() {
    let enforcer = enforcer_with_plan(Some(""));
    let gated = require_plan(&enforcer, "pro", multiply);

    let err = permission_error(gated.call((1, 1)));
    assert!(matches!(err, PermissionError::WrongPlan { ref actual, .. } if actual.is_empty()));
}

// --- Any of ---

#[test]
fn any_of_accepts_listed_plan() {
    let enforcer = enforcer_with_plan(Some("pro"));
    let gated = require_any_plan(&enforcer, ["pro", "enterprise"], multiply);
    assert_eq!(gated.call((2, 5)).unwrap(), "2 * 5 = 10");
}

#[test]
fn any_of_without_plan_names_the_set() {
    let enforcer = enforcer_with_plan(None);
    let gated = require_any_plan(&enforcer, ["pro", "enterprise"], multiply);

    let msg = permission_error(gated.call((2, 5))).to_string();
    assert_eq!(
        msg,
        "This feature requires one of plans [pro, enterprise], but your license has no plan assigned."
    );
}

#[test]
fn any_of_with_other_plan_names_set_and_actual() {
    let enforcer = enforcer_with_plan(Some("free"));
    let gated = require_any_plan(&enforcer, ["pro", "enterprise"], multiply);

    let msg = permission_error(gated.call((2, 5))).to_string();
    assert!(msg.contains("pro"));
    assert!(msg.contains("enterprise"));
    assert!(msg.contains("'free'"));
}

#[test]
fn empty_any_of_places_no_restriction() {
    let enforcer = enforcer_with_plan(None);
    let gated = require_any_plan(&enforcer, Vec::<String>::new(), multiply);
    assert_eq!(gated.call((6, 7)).unwrap(), "6 * 7 = 42");
}

// --- No plan requirement ---

#[test]
fn require_license_accepts_any_plan() {
    let enforcer = enforcer_with_plan(None);
    let gated = require_license(&enforcer, |name: &str| format!("hello {name}"));
    assert_eq!(gated.call("acme").unwrap(), "hello acme");
    assert_eq!(gated.requirement(), &PlanRequirement::Any);
}

// --- Propagation ---

#[test]
fn license_failure_propagates_and_skips_operation() {
    let enforcer = Enforcer::with_verifier(
        LicenseConfig::default(),
        FixedVerifier(LicenseStatus::not_found()),
    )
    .with_key_lookup(|_| None);
    let ran = Cell::new(false);
    let gated = require_license(&enforcer, |_: ()| ran.set(true));

    match gated.call(()) {
        Err(GateError::License(e)) => assert_eq!(e.kind(), FailureKind::Configuration),
        other => panic!("expected license error, got {other:?}"),
    }
    assert!(!ran.get());
}

#[test]
fn invalid_license_is_a_license_error_not_a_permission_error() {
    let enforcer = Enforcer::with_verifier(
        LicenseConfig::default(),
        FixedVerifier(LicenseStatus::not_found()),
    )
    .with_key_lookup(|_| Some("KEY".to_string()));
    let gated = require_plan(&enforcer, "pro", multiply);

    match gated.call((1, 2)) {
        Err(GateError::License(e)) => {
            assert_eq!(e.to_string(), "Invalid license: License not found")
        }
        other => panic!("expected license error, got {other:?}"),
    }
}

#[test]
fn operation_errors_pass_through_unchanged() {
    let enforcer = enforcer_with_plan(Some("pro"));
    let gated = require_plan(&enforcer, "pro", |input: &str| input.parse::<u32>());

    assert_eq!(gated.call("42").unwrap(), Ok(42));
    assert!(gated.call("forty-two").unwrap().is_err());
}

#[test]
fn permission_is_evaluated_per_gate() {
    let enforcer = enforcer_with_plan(Some("pro"));
    let pro = require_plan(&enforcer, "pro", multiply);
    let enterprise = require_plan(&enforcer, "enterprise", multiply);

    assert!(enterprise.call((1, 1)).is_err());
    assert!(pro.call((1, 1)).is_ok());
    assert!(enterprise.call((1, 1)).is_err());
}

// --- authorize / Gated::new ---

#[test]
fn authorize_returns_status() {
    let enforcer = enforcer_with_plan(Some("team"));
    let status = authorize(&enforcer, &PlanRequirement::any_of(["team"])).unwrap();
    assert_eq!(status.license_id.as_deref(), Some("LIC-7"));

    let err = authorize(&enforcer, &PlanRequirement::plan("pro")).unwrap_err();
    assert!(matches!(err, GateError::Permission(_)));
}

#[test]
fn gated_new_with_explicit_requirement() {
    let enforcer = enforcer_with_plan(Some("enterprise"));
    let gated = Gated::new(
        &enforcer,
        PlanRequirement::any_of(["enterprise"]),
        |name: String| name.to_uppercase(),
    );
    assert_eq!(gated.call("sentinel".to_string()).unwrap(), "SENTINEL");
}

// --- PlanRequirement ---

#[test]
fn requirement_display() {
    assert_eq!(PlanRequirement::plan("pro").to_string(), "plan 'pro'");
    assert_eq!(
        PlanRequirement::any_of(["pro", "team"]).to_string(),
        "one of plans [pro, team]"
    );
}

#[test]
fn requirement_check() {
    assert!(PlanRequirement::Any.check(None).is_ok());
    assert!(PlanRequirement::plan("pro").check(Some("pro")).is_ok());
    assert!(PlanRequirement::plan("pro").check(Some("PRO")).is_err());
    assert!(PlanRequirement::any_of(["a", "b"]).check(Some("b")).is_ok());
    assert!(PlanRequirement::AnyOf(vec![]).check(None).is_ok());
}
