//! License configuration read from the process environment

use std::time::Duration;

pub const SERVER_URL_VAR: &str = "LICENSE_SERVER_URL";
pub const KEY_VAR_NAME_VAR: &str = "LICENSE_ENV_VAR_NAME";
pub const DISABLE_CHECK_VAR: &str = "DISABLE_LICENSE_CHECK";

pub const DEFAULT_SERVER_URL: &str = "https://license.example.com";
pub const DEFAULT_KEY_VAR: &str = "PLANGATE_LICENSE_KEY";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Settings for license verification. Built once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseConfig {
    /// Base URL of the verification authority (`/verify` is appended).
    pub server_url: String,
    /// Name of the environment variable holding the license key.
    pub key_env_var: String,
    /// Development bypass. Never enable in production.
    pub disable_check: bool,
    pub timeout: Duration,
}

impl Default for LicenseConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            key_env_var: DEFAULT_KEY_VAR.to_string(),
            disable_check: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl LicenseConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    ///
    /// Unset variables fall back to defaults. An explicitly empty
    /// `LICENSE_SERVER_URL` is kept as-is and rejected at verification time.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            server_url: lookup(SERVER_URL_VAR).unwrap_or(defaults.server_url),
            key_env_var: lookup(KEY_VAR_NAME_VAR).unwrap_or(defaults.key_env_var),
            disable_check: lookup(DISABLE_CHECK_VAR)
                .map(|v| is_truthy(&v))
                .unwrap_or(false),
            timeout: defaults.timeout,
        }
    }

    /// Sets the verification request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}
