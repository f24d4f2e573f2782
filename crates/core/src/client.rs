//! HTTP client for license verification against the configured authority

use serde::Deserialize;
use std::time::Duration;

use crate::config::{LicenseConfig, SERVER_URL_VAR};
use crate::types::{FailureKind, LicenseStatus};

/// Turns a license key into a [`LicenseStatus`].
///
/// One attempt per call. Retry policy, if any, belongs to the caller.
pub trait Verify {
    fn verify(&self, key: &str) -> Result<LicenseStatus, VerifyError>;
}

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("{0}")]
    Configuration(String),
    #[error("Could not contact license server: {0}")]
    Connectivity(String),
    #[error("License server error ({status}): {body}")]
    Server { status: u16, body: String },
    #[error("License server returned a malformed response: {0}")]
    MalformedResponse(String),
}

impl VerifyError {
    pub fn kind(&self) -> FailureKind {
        match self {
            VerifyError::Configuration(_) => FailureKind::Configuration,
            VerifyError::Connectivity(_) => FailureKind::Connectivity,
            VerifyError::Server { .. } | VerifyError::MalformedResponse(_) => FailureKind::Server,
        }
    }
}

/// Wire schema of a successful `/verify` response.
///
/// Every field may be absent or `null`. `valid` then defaults to `false` and
/// `reason` to `"Unknown"`.
#[derive(Debug, Deserialize)]
pub struct VerifyResponse {
    #[serde(default)]
    pub valid: Option<bool>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub license_id: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub seats: Option<i64>,
    #[serde(default)]
    pub customer_name: Option<String>,
}

impl From<VerifyResponse> for LicenseStatus {
    fn from(resp: VerifyResponse) -> Self {
        LicenseStatus {
            valid: resp.valid.unwrap_or(false),
            reason: resp.reason.unwrap_or_else(|| "Unknown".to_string()),
            license_id: resp.license_id,
            plan: resp.plan,
            seats: resp.seats,
            customer_name: resp.customer_name,
        }
    }
}

/// Verifies keys with `GET <server_url>/verify?key=<key>`.
#[derive(Debug, Clone)]
pub struct HttpVerifier {
    server_url: String,
    timeout: Duration,
    disable_check: bool,
}

impl HttpVerifier {
    pub fn new(config: &LicenseConfig) -> Self {
        Self {
            server_url: config.server_url.clone(),
            timeout: config.timeout,
            disable_check: config.disable_check,
        }
    }

    /// Full verification endpoint, or a configuration error if no base URL is set.
    pub fn endpoint(&self) -> Result<String, VerifyError> {
        let base = self.server_url.trim();
        if base.is_empty() {
            return Err(VerifyError::Configuration(format!(
                "{SERVER_URL_VAR} is not configured."
            )));
        }
        Ok(format!("{}/verify", base.trim_end_matches('/')))
    }
}

impl Verify for HttpVerifier {
    fn verify(&self, key: &str) -> Result<LicenseStatus, VerifyError> {
        // The enforcer handles the override before reading a key; this keeps
        // a standalone verifier from reaching the network in dev mode too.
        if self.disable_check {
            return Ok(LicenseStatus::development());
        }

        let url = self.endpoint()?;
        tracing::debug!(%url, "verifying license key");

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| VerifyError::Connectivity(e.to_string()))?;

        let resp = client
            .get(&url)
            .query(&[("key", key)])
            .send()
            .map_err(|e| VerifyError::Connectivity(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .map_err(|e| VerifyError::Connectivity(e.to_string()))?;

        status_from_response(status, &body)
    }
}

/// Maps an HTTP status code and body to a license status.
///
/// 404 is an ordinary negative answer, not an error.
pub fn status_from_response(status: u16, body: &str) -> Result<LicenseStatus, VerifyError> {
    if status == 404 {
        return Ok(LicenseStatus::not_found());
    }

    if !(200..300).contains(&status) {
        return Err(VerifyError::Server {
            status,
            body: body.to_string(),
        });
    }

    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| VerifyError::MalformedResponse(e.to_string()))?;
    if !value.is_object() {
        return Err(VerifyError::MalformedResponse(
            "expected a JSON object".to_string(),
        ));
    }

    let data: VerifyResponse = serde_json::from_value(value)
        .map_err(|e| VerifyError::MalformedResponse(e.to_string()))?;

    Ok(data.into())
}
