//! Per-provider health tracking.
//!
//! Consecutive failures accumulate per provider; reaching the limit
//! disables the provider until the failure timeout has elapsed since its
//! last recorded failure, at which point a sweep re-enables it. A single
//! success wipes the record clean.

use compact_str::CompactString;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Mutable health record for one provider.
#[derive(Debug, Clone, Default)]
pub struct ProviderHealth {
    /// Consecutive failures since the last success or reset.
    pub failures: u32,
    /// When the most recent failure was recorded. `None` means never.
    pub last_failure: Option<Instant>,
    /// Whether the provider is currently excluded from selection.
    pub disabled: bool,
}

/// Health records for the whole provider table.
#[derive(Debug)]
pub struct HealthBoard {
    entries: BTreeMap<CompactString, ProviderHealth>,
    max_failures: u32,
    failure_timeout: Duration,
}

impl HealthBoard {
    /// Create a board with one pristine record per provider id.
    pub fn new(
        ids: impl IntoIterator<Item = CompactString>,
        max_failures: u32,
        failure_timeout: Duration,
    ) -> Self {
        let entries = ids
            .into_iter()
            .map(|id| (id, ProviderHealth::default()))
            .collect();
        Self {
            entries,
            max_failures,
            failure_timeout,
        }
    }

    /// Record a successful call: the failure streak and the disabled flag
    /// are both cleared.
    pub fn record_success(&mut self, id: &str) {
        if let Some(health) = self.entries.get_mut(id) {
            health.failures = 0;
            health.disabled = false;
        }
    }

    /// Record a failed call, disabling the provider once the streak
    /// reaches the limit.
    pub fn record_failure(&mut self, id: &str) {
        let Some(health) = self.entries.get_mut(id) else {
            return;
        };
        health.failures += 1;
        health.last_failure = Some(Instant::now());
        if health.failures >= self.max_failures && !health.disabled {
            health.disabled = true;
            tracing::warn!(
                "provider '{id}' disabled after {} consecutive failures",
                health.failures
            );
        }
    }

    /// Re-enable every disabled provider whose last failure is older than
    /// the failure timeout. Returns how many were re-enabled.
    pub fn sweep(&mut self) -> usize {
        let mut reenabled = 0;
        for (id, health) in &mut self.entries {
            if !health.disabled {
                continue;
            }
            let expired = health
                .last_failure
                .is_none_or(|at| at.elapsed() > self.failure_timeout);
            if expired {
                health.disabled = false;
                health.failures = 0;
                reenabled += 1;
                tracing::info!("re-enabling provider '{id}' after failure timeout");
            }
        }
        reenabled
    }

    /// Reset one record, or every record when `id` is `None`.
    pub fn reset(&mut self, id: Option<&str>) {
        match id {
            Some(id) => {
                if let Some(health) = self.entries.get_mut(id) {
                    *health = ProviderHealth::default();
                }
            }
            None => {
                for health in self.entries.values_mut() {
                    *health = ProviderHealth::default();
                }
            }
        }
    }

    /// Whether a provider is currently excluded from selection.
    pub fn is_disabled(&self, id: &str) -> bool {
        self.entries.get(id).is_some_and(|h| h.disabled)
    }

    /// A copy of one provider's record.
    pub fn get(&self, id: &str) -> Option<ProviderHealth> {
        self.entries.get(id).cloned()
    }

    /// Human-readable state for the administrative surface.
    pub fn state(&self, id: &str) -> String {
        let Some(health) = self.entries.get(id) else {
            return "Unknown".to_owned();
        };
        if health.disabled {
            let elapsed = health
                .last_failure
                .map(|at| at.elapsed())
                .unwrap_or(self.failure_timeout);
            let remaining = self.failure_timeout.saturating_sub(elapsed);
            let secs = remaining.as_millis().div_ceil(1000);
            return format!("Disabled ({secs}s until retry)");
        }
        if health.failures > 0 {
            return format!("Degraded ({}/{} failures)", health.failures, self.max_failures);
        }
        "Healthy".to_owned()
    }

    /// The configured failure limit.
    pub fn max_failures(&self) -> u32 {
        self.max_failures
    }

    /// The configured failure timeout.
    pub fn failure_timeout(&self) -> Duration {
        self.failure_timeout
    }
}
