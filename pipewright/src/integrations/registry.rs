//! The integration registry: cheap registration, best-effort activation.

use super::{ActivationContext, Integration, IntegrationHandle, IntegrationResolver};
use crate::errors::IntegrationError;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Activation status of a registered integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationStatus {
    /// Registered, not yet activated.
    Registered,
    /// Activation completed.
    Active,
    /// Resolution or activation failed. A failed entry stays failed until
    /// it is registered again.
    Failed,
}

impl IntegrationStatus {
    /// Returns the snake_case name of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Active => "active",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for IntegrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
struct Entry {
    handle: IntegrationHandle,
    status: IntegrationStatus,
    epoch: u64,
    activating: bool,
}

#[derive(Debug, Default)]
struct Inner {
    order: Vec<String>,
    entries: HashMap<String, Entry>,
    next_epoch: u64,
}

enum Claim {
    Missing,
    Terminal,
    Busy,
    Run {
        component: Arc<dyn Integration>,
        epoch: u64,
    },
    Resolve {
        locator: String,
        resolver: IntegrationResolver,
        epoch: u64,
    },
}

/// Insertion-ordered registry of optional integrations.
///
/// Registration is cheap, infallible and repeatable; the heavyweight work
/// happens in `activate_all`, which resolves lazy handles and runs
/// activation hooks best-effort. Expected failures are logged, recorded on
/// the entry and in the returned report, and never raised to the caller.
#[derive(Debug, Default)]
pub struct IntegrationRegistry {
    inner: RwLock<Inner>,
}

impl IntegrationRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an integration handle under a key.
    ///
    /// Registering an existing key replaces the handle, resets the entry to
    /// `Registered` and forgets any earlier failure; the last registration
    /// wins. The key keeps its original position in the activation order.
    pub fn register(&self, key: impl Into<String>, handle: IntegrationHandle) {
        let key = key.into();
        let mut inner = self.inner.write();
        inner.next_epoch += 1;
        let epoch = inner.next_epoch;
        if !inner.entries.contains_key(&key) {
            inner.order.push(key.clone());
        }
        debug!(integration = %key, lazy = handle.is_lazy(), "integration registered");
        inner.entries.insert(
            key,
            Entry {
                handle,
                status: IntegrationStatus::Registered,
                epoch,
                activating: false,
            },
        );
    }

    /// Registers an already constructed component.
    pub fn register_eager(&self, key: impl Into<String>, integration: Arc<dyn Integration>) {
        self.register(key, IntegrationHandle::eager(integration));
    }

    /// Registers a component produced on first activation.
    pub fn register_lazy<F>(&self, key: impl Into<String>, locator: impl Into<String>, resolver: F)
    where
        F: Fn() -> Result<Arc<dyn Integration>, IntegrationError> + Send + Sync + 'static,
    {
        self.register(key, IntegrationHandle::lazy(locator, resolver));
    }

    /// Activates every registered integration that still needs it.
    ///
    /// Entries are visited in registration order. Already `Active` entries
    /// are skipped so the pass is idempotent; `Failed` entries are skipped
    /// too, because a bare second pass is not a retry (re-registering the
    /// key is). Resolution and activation hooks run outside the registry
    /// lock, so slow integrations never block the read model.
    ///
    /// An [`IntegrationError`] from resolution or from the hook marks the
    /// entry `Failed`, emits a warning naming the key and the cause, and
    /// the pass moves on. Anything else a hook does wrong (a panic) is a
    /// programming fault and propagates. The call itself never fails.
    pub fn activate_all(&self, ctx: &ActivationContext) -> ActivationReport {
        let keys: Vec<String> = self.inner.read().order.clone();
        let mut report = ActivationReport::default();

        for key in keys {
            self.activate_entry(&key, ctx, &mut report);
        }

        info!(
            activated = report.activated.len(),
            failed = report.failed.len(),
            skipped = report.skipped.len(),
            "integration activation pass complete"
        );
        report
    }

    fn activate_entry(&self, key: &str, ctx: &ActivationContext, report: &mut ActivationReport) {
        let claim = self.claim(key);

        let (component, epoch) = match claim {
            Claim::Missing => return,
            Claim::Terminal | Claim::Busy => {
                report.skipped.push(key.to_string());
                return;
            }
            Claim::Run { component, epoch } => (component, epoch),
            Claim::Resolve {
                locator,
                resolver,
                epoch,
            } => match resolver.as_ref()() {
                Ok(component) => {
                    debug!(integration = %key, locator = %locator, "integration resolved");
                    if !self.commit_component(key, epoch, Arc::clone(&component)) {
                        report.skipped.push(key.to_string());
                        return;
                    }
                    (component, epoch)
                }
                Err(e) => {
                    warn!(
                        integration = %key,
                        locator = %locator,
                        error = %e,
                        "integration unavailable, continuing without it"
                    );
                    self.commit_status(key, epoch, IntegrationStatus::Failed);
                    report.failed.push(ActivationFailure {
                        key: key.to_string(),
                        reason: e.to_string(),
                    });
                    return;
                }
            },
        };

        match component.activate(ctx) {
            Ok(()) => {
                debug!(integration = %key, "integration activated");
                self.commit_status(key, epoch, IntegrationStatus::Active);
                report.activated.push(key.to_string());
            }
            Err(e) => {
                warn!(
                    integration = %key,
                    error = %e,
                    "integration activation failed, continuing without it"
                );
                self.commit_status(key, epoch, IntegrationStatus::Failed);
                report.failed.push(ActivationFailure {
                    key: key.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    // Marks the entry in-flight and extracts what activation needs, under a
    // single short write lock.
    fn claim(&self, key: &str) -> Claim {
        let mut inner = self.inner.write();
        let Some(entry) = inner.entries.get_mut(key) else {
            return Claim::Missing;
        };
        match entry.status {
            IntegrationStatus::Active | IntegrationStatus::Failed => Claim::Terminal,
            IntegrationStatus::Registered if entry.activating => Claim::Busy,
            IntegrationStatus::Registered => {
                entry.activating = true;
                let epoch = entry.epoch;
                match &entry.handle {
                    IntegrationHandle::Eager(component) => Claim::Run {
                        component: Arc::clone(component),
                        epoch,
                    },
                    IntegrationHandle::Lazy { locator, resolver } => Claim::Resolve {
                        locator: locator.clone(),
                        resolver: Arc::clone(resolver),
                        epoch,
                    },
                }
            }
        }
    }

    // Upgrades a lazy handle to its resolved component. Returns false when
    // the entry was re-registered mid-flight, in which case the newer
    // registration is left alone.
    fn commit_component(&self, key: &str, epoch: u64, component: Arc<dyn Integration>) -> bool {
        let mut inner = self.inner.write();
        match inner.entries.get_mut(key) {
            Some(entry) if entry.epoch == epoch => {
                entry.handle = IntegrationHandle::eager(component);
                true
            }
            _ => false,
        }
    }

    fn commit_status(&self, key: &str, epoch: u64, status: IntegrationStatus) {
        let mut inner = self.inner.write();
        if let Some(entry) = inner.entries.get_mut(key) {
            if entry.epoch == epoch {
                entry.status = status;
                entry.activating = false;
            }
        }
    }

    /// Returns the status of a key, or `None` when it is not registered.
    #[must_use]
    pub fn status(&self, key: &str) -> Option<IntegrationStatus> {
        self.inner.read().entries.get(key).map(|e| e.status)
    }

    /// Returns true when the key is registered and activated.
    #[must_use]
    pub fn is_active(&self, key: &str) -> bool {
        self.status(key) == Some(IntegrationStatus::Active)
    }

    /// Returns the component registered under a key.
    ///
    /// Only constructed components are returned: eager handles always,
    /// lazy handles once resolution has happened. An unresolved or failed
    /// lazy entry yields `None`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<dyn Integration>> {
        self.inner.read().entries.get(key)?.handle.component()
    }

    /// Returns the keys in registration order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.inner.read().order.clone()
    }

    /// Returns the number of registered integrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    /// Returns true when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }
}

/// A single failure within an activation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivationFailure {
    /// The registry key that failed.
    pub key: String,
    /// Why it failed.
    pub reason: String,
}

/// Outcome of one `activate_all` pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivationReport {
    /// Keys whose activation hook completed in this pass.
    pub activated: Vec<String>,
    /// Keys that failed in this pass, with reasons.
    pub failed: Vec<ActivationFailure>,
    /// Keys skipped because they were already activated or failed.
    pub skipped: Vec<String>,
}

impl ActivationReport {
    /// True when nothing failed in this pass.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// Human readable summary naming failed keys.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.failed.is_empty() {
            format!(
                "Activated {} integration(s), {} skipped",
                self.activated.len(),
                self.skipped.len()
            )
        } else {
            let failed: Vec<&str> = self.failed.iter().map(|f| f.key.as_str()).collect();
            format!(
                "Activated {} integration(s), {} skipped, {} failed: {}",
                self.activated.len(),
                self.skipped.len(),
                self.failed.len(),
                failed.join(", ")
            )
        }
    }
}
