//! The translation coordinator.
//!
//! Owns the provider lookup table, the per-provider health board, and the
//! session cache. `translate` walks healthy providers in strict priority
//! order and degrades to the original text when all of them fail;
//! `translate_all` runs one `translate` per fragment concurrently,
//! guarded so only one bulk pass is active at a time.

use crate::cache::TranslationCache;
use crate::health::{HealthBoard, ProviderHealth};
use crate::prefs::LanguagePrefs;
use anyhow::{Result, bail};
use compact_str::CompactString;
use futures_util::future::join_all;
use provider::{Credentials, Provider, ProviderConfig, build_provider, default_fleet};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use translate::{Client, FragmentId, Lang, PageSnapshot, Translator};

/// Coordinator tuning knobs and the provider fleet.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Provider fleet. Must not be empty.
    pub providers: Vec<ProviderConfig>,
    /// Consecutive failures before a provider is disabled.
    pub max_failures: u32,
    /// Seconds a disabled provider stays out of selection.
    pub failure_timeout_secs: u64,
    /// Seconds between re-enable sweeps.
    pub sweep_period_secs: u64,
    /// Where the language preference is persisted. `None` disables
    /// persistence.
    pub prefs_path: Option<PathBuf>,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            providers: default_fleet(),
            max_failures: 5,
            failure_timeout_secs: 10,
            sweep_period_secs: 5,
            prefs_path: Some(LanguagePrefs::path()),
        }
    }
}

impl CoordinatorConfig {
    /// How long a disabled provider stays out of selection.
    pub fn failure_timeout(&self) -> Duration {
        Duration::from_secs(self.failure_timeout_secs)
    }

    /// The period of the re-enable sweep.
    pub fn sweep_period(&self) -> Duration {
        Duration::from_secs(self.sweep_period_secs)
    }
}

/// Reportable status for one provider entry.
#[derive(Debug, Clone)]
pub struct ProviderStatus {
    /// Provider id.
    pub id: CompactString,
    /// Display name.
    pub name: CompactString,
    /// Whether the entry participates in selection.
    pub enabled: bool,
    /// Whether credentials have been supplied.
    pub configured: bool,
    /// Current health record.
    pub health: ProviderHealth,
    /// Human-readable state: `Healthy`, `Degraded (f/max failures)`, or
    /// `Disabled (Ns until retry)`.
    pub state: String,
}

/// The translation coordinator.
///
/// Cheap to clone; clones share all state. Locks are released before any
/// await point — provider calls run on clones of the adapters.
#[derive(Clone)]
pub struct Coordinator {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator").finish_non_exhaustive()
    }
}

struct Inner {
    /// Lookup table from provider id to its config and built adapter.
    providers: RwLock<BTreeMap<CompactString, (ProviderConfig, Provider)>>,
    health: RwLock<HealthBoard>,
    cache: TranslationCache,
    language: RwLock<Lang>,
    /// Guard: only one bulk pass at a time.
    translating: AtomicBool,
    config: CoordinatorConfig,
    /// Shared HTTP client, reused when adapters are rebuilt.
    client: Client,
}

impl Coordinator {
    /// Build a coordinator from config.
    ///
    /// Validates and constructs every provider, seeds pristine health
    /// records, and restores the saved language preference when
    /// persistence is configured.
    pub fn new(config: CoordinatorConfig) -> Result<Self> {
        if config.providers.is_empty() {
            bail!("at least one provider config is required");
        }

        let client = Client::new();
        let mut providers = BTreeMap::new();
        for provider_config in &config.providers {
            let provider = build_provider(provider_config, client.clone())?;
            let entry = (provider_config.clone(), provider);
            if providers.insert(provider_config.id.clone(), entry).is_some() {
                bail!("duplicate provider id '{}'", provider_config.id);
            }
        }

        let health = HealthBoard::new(
            providers.keys().cloned(),
            config.max_failures,
            config.failure_timeout(),
        );
        let language = match &config.prefs_path {
            Some(path) => LanguagePrefs::load_from(path)?
                .language
                .unwrap_or(Lang::SOURCE),
            None => Lang::SOURCE,
        };

        Ok(Self {
            inner: Arc::new(Inner {
                providers: RwLock::new(providers),
                health: RwLock::new(health),
                cache: TranslationCache::default(),
                language: RwLock::new(language),
                translating: AtomicBool::new(false),
                config,
                client,
            }),
        })
    }

    /// Translate one piece of text.
    ///
    /// Returns the input unchanged when the target is the source language
    /// or when every healthy provider fails — provider errors never reach
    /// the caller.
    pub async fn translate(&self, text: &str, target: Lang) -> String {
        if target == Lang::SOURCE {
            return text.to_owned();
        }
        if let Some(hit) = self.inner.cache.get(text, target) {
            return hit;
        }

        for (id, provider) in self.healthy_providers() {
            match provider.translate(text, target).await {
                Ok(result) if !result.is_empty() && result != text => {
                    self.health_mut().record_success(&id);
                    self.inner.cache.insert(text, target, result.clone());
                    return result;
                }
                // A no-op result is neither success nor failure: the next
                // provider gets a chance and this one's health is untouched.
                Ok(_) => {
                    tracing::debug!("provider '{id}' returned a no-op translation");
                }
                Err(e) => {
                    tracing::warn!("provider '{id}' failed: {e}");
                    self.health_mut().record_failure(&id);
                }
            }
        }

        tracing::warn!("all healthy providers failed, returning original text");
        text.to_owned()
    }

    /// Translate every fragment of a page snapshot concurrently.
    ///
    /// At most one bulk pass runs at a time: a second invocation while
    /// one is in flight is a no-op and returns `None`. Completion is
    /// gated on every fragment settling, including the ones that degraded
    /// to their original text.
    pub async fn translate_all(
        &self,
        page: &PageSnapshot,
        target: Lang,
    ) -> Option<Vec<(FragmentId, String)>> {
        if self.inner.translating.swap(true, Ordering::SeqCst) {
            tracing::debug!("bulk translation already in flight, skipping");
            return None;
        }

        let results = join_all(page.fragments().iter().map(|fragment| async move {
            (fragment.id, self.translate(&fragment.text, target).await)
        }))
        .await;

        self.inner.translating.store(false, Ordering::SeqCst);
        Some(results)
    }

    /// The originally captured text for every fragment, bypassing
    /// providers and cache entirely.
    pub fn restore_original(&self, page: &PageSnapshot) -> Vec<(FragmentId, String)> {
        page.originals()
    }

    /// The current target language.
    pub fn language(&self) -> Lang {
        *self.inner.language.read().expect("language lock poisoned")
    }

    /// Switch the session language, persist the preference, and produce
    /// the write-back set: originals for the source language, a bulk
    /// translation pass otherwise (empty when a pass is already running).
    pub async fn change_language(
        &self,
        page: &PageSnapshot,
        lang: Lang,
    ) -> Result<Vec<(FragmentId, String)>> {
        *self.inner.language.write().expect("language lock poisoned") = lang;
        if let Some(path) = &self.inner.config.prefs_path {
            LanguagePrefs {
                language: Some(lang),
            }
            .save_to(path)?;
        }

        if lang == Lang::SOURCE {
            return Ok(self.restore_original(page));
        }
        Ok(self.translate_all(page, lang).await.unwrap_or_default())
    }

    /// Set credentials on a provider and enable it. Rebuilds the adapter
    /// so the credentials take effect immediately.
    pub fn configure(&self, id: &str, credentials: Credentials) -> Result<()> {
        let mut providers = self.inner.providers.write().expect("provider lock poisoned");
        let Some((config, provider)) = providers.get_mut(id) else {
            bail!("provider '{id}' not found");
        };
        config.credentials = Some(credentials);
        config.enabled = true;
        *provider = build_provider(config, self.inner.client.clone())?;
        tracing::info!("provider '{id}' configured and enabled");
        Ok(())
    }

    /// Reset one provider's health record, or every record when `id` is
    /// `None`.
    pub fn reset_health(&self, id: Option<&str>) {
        self.health_mut().reset(id);
    }

    /// Run one re-enable sweep by hand. The periodic sweeper calls this
    /// on its own schedule. Returns how many providers were re-enabled.
    pub fn sweep(&self) -> usize {
        self.health_mut().sweep()
    }

    /// Per-provider status for the administrative surface, in priority
    /// order.
    pub fn status(&self) -> Vec<ProviderStatus> {
        let providers = self.inner.providers.read().expect("provider lock poisoned");
        let health = self.inner.health.read().expect("health lock poisoned");
        let mut statuses: Vec<_> = providers
            .values()
            .map(|(config, _)| {
                (
                    config.priority,
                    ProviderStatus {
                        id: config.id.clone(),
                        name: config.name.clone(),
                        enabled: config.enabled,
                        configured: config
                            .credentials
                            .as_ref()
                            .is_some_and(|c| !c.api_key.is_empty()),
                        health: health.get(&config.id).unwrap_or_default(),
                        state: health.state(&config.id),
                    },
                )
            })
            .collect();
        statuses.sort_by_key(|(priority, _)| *priority);
        statuses.into_iter().map(|(_, status)| status).collect()
    }

    /// One provider's current health record.
    pub fn health(&self, id: &str) -> Option<ProviderHealth> {
        self.inner.health.read().expect("health lock poisoned").get(id)
    }

    /// Cached translation for a pair, if any.
    pub fn cached(&self, text: &str, target: Lang) -> Option<String> {
        self.inner.cache.get(text, target)
    }

    /// The configured sweep period.
    pub fn sweep_period(&self) -> Duration {
        self.inner.config.sweep_period()
    }

    /// Enabled, non-disabled providers in ascending priority order.
    ///
    /// Clones the adapters so no lock is held during provider calls.
    fn healthy_providers(&self) -> Vec<(CompactString, Provider)> {
        let providers = self.inner.providers.read().expect("provider lock poisoned");
        let health = self.inner.health.read().expect("health lock poisoned");
        let mut healthy: Vec<_> = providers
            .iter()
            .filter(|(id, (config, _))| config.enabled && !health.is_disabled(id))
            .map(|(id, (config, provider))| (config.priority, id.clone(), provider.clone()))
            .collect();
        // Stable sort: entries sharing a priority keep id order.
        healthy.sort_by_key(|(priority, _, _)| *priority);
        healthy
            .into_iter()
            .map(|(_, id, provider)| (id, provider))
            .collect()
    }

    fn health_mut(&self) -> std::sync::RwLockWriteGuard<'_, HealthBoard> {
        self.inner.health.write().expect("health lock poisoned")
    }
}
