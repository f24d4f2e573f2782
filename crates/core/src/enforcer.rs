//! Process-wide license enforcement with a one-shot status cache

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::client::{HttpVerifier, Verify};
use crate::config::LicenseConfig;
use crate::types::{LicenseStatus, LicenseValidationError};

type KeyLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Validates the license once and remembers the outcome.
///
/// The cache slot is filled by the first verification that returns a status,
/// valid or not, and is never refreshed afterwards: there is no TTL and no
/// invalidation. A process that started with a valid license keeps it until
/// exit, and one that got an invalid answer fails fast on every later call
/// without contacting the server again. Verification errors (unreachable
/// server, bad response) leave the slot empty so the next call retries.
///
/// The slot lock is held while verifying, so concurrent first callers wait
/// for the single in-flight verification and then read its result.
pub struct Enforcer {
    config: LicenseConfig,
    verifier: Box<dyn Verify + Send + Sync>,
    key_lookup: KeyLookup,
    slot: Mutex<Option<LicenseStatus>>,
}

impl Enforcer {
    /// Enforcer backed by [`HttpVerifier`] and the process environment.
    pub fn new(config: LicenseConfig) -> Self {
        let verifier = HttpVerifier::new(&config);
        Self::with_verifier(config, verifier)
    }

    pub fn with_verifier<V>(config: LicenseConfig, verifier: V) -> Self
    where
        V: Verify + Send + Sync + 'static,
    {
        Self {
            config,
            verifier: Box::new(verifier),
            key_lookup: Box::new(|name| std::env::var(name).ok()),
            slot: Mutex::new(None),
        }
    }

    /// Replaces the environment lookup used to read the license key.
    pub fn with_key_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.key_lookup = Box::new(lookup);
        self
    }

    pub fn config(&self) -> &LicenseConfig {
        &self.config
    }

    /// Returns the cached status without triggering verification.
    pub fn cached(&self) -> Option<LicenseStatus> {
        self.lock().clone()
    }

    /// Validates the license, verifying against the server on first use.
    ///
    /// Call this early at startup. Later calls are answered from the cache.
    pub fn enforce_license(&self) -> Result<LicenseStatus, LicenseValidationError> {
        let mut slot = self.lock();

        if let Some(cached) = slot.as_ref() {
            tracing::debug!(valid = cached.valid, "license status served from cache");
            return ensure_valid(cached);
        }

        let status = if self.config.disable_check {
            tracing::warn!("license check disabled, using development status");
            LicenseStatus::development()
        } else {
            let key = self.license_key()?;
            self.verifier
                .verify(&key)
                .inspect_err(|e| tracing::warn!(error = %e, "license verification failed"))?
        };

        tracing::info!(
            valid = status.valid,
            plan = status.plan.as_deref().unwrap_or("-"),
            "license status cached for process lifetime"
        );
        *slot = Some(status.clone());

        ensure_valid(&status)
    }

    /// Current license status, validating lazily if nothing is cached yet.
    pub fn license_status(&self) -> Result<LicenseStatus, LicenseValidationError> {
        if let Some(cached) = self.lock().as_ref() {
            return ensure_valid(cached);
        }
        self.enforce_license()
    }

    fn license_key(&self) -> Result<String, LicenseValidationError> {
        let key = (self.key_lookup)(&self.config.key_env_var)
            .map(|k| k.trim().to_string())
            .unwrap_or_default();
        if key.is_empty() {
            return Err(LicenseValidationError::MissingKey {
                env_var: self.config.key_env_var.clone(),
            });
        }
        Ok(key)
    }

    fn lock(&self) -> MutexGuard<'_, Option<LicenseStatus>> {
        // The slot holds plain data, so a poisoned lock is still usable.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn ensure_valid(status: &LicenseStatus) -> Result<LicenseStatus, LicenseValidationError> {
    if status.valid {
        Ok(status.clone())
    } else {
        Err(LicenseValidationError::Invalid {
            reason: status.reason.clone(),
        })
    }
}
