//! Provider configuration.
//!
//! One [`ProviderConfig`] entry per provider, discriminated by
//! [`ProviderKind`]. Entries are immutable after construction except
//! `enabled` and `credentials`, which the coordinator's `configure`
//! operation updates.

use anyhow::{Result, bail};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Which wire adapter a provider entry uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderKind {
    /// LibreTranslate-compatible JSON endpoint. No key required.
    #[serde(rename = "libretranslate")]
    LibreTranslate,
    /// MyMemory public API. No key required.
    #[serde(rename = "mymemory")]
    MyMemory,
    /// Microsoft Translator v3. Requires key and region.
    #[serde(rename = "microsoft")]
    Microsoft,
    /// DeepL v2. Requires key.
    #[serde(rename = "deepl")]
    DeepL,
}

impl ProviderKind {
    /// Whether this adapter cannot run without credentials.
    pub fn requires_credentials(&self) -> bool {
        matches!(self, ProviderKind::Microsoft | ProviderKind::DeepL)
    }
}

/// API credentials for key-gated providers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    /// API key.
    pub api_key: String,
    /// Deployment region (Microsoft only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Credentials {
    /// Credentials with a key only.
    pub fn key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            region: None,
        }
    }

    /// Credentials with a key and region.
    pub fn key_and_region(api_key: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            region: Some(region.into()),
        }
    }
}

/// Configuration for one provider entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Unique identifier for this entry.
    pub id: CompactString,
    /// Human-readable display name.
    pub name: CompactString,
    /// Which wire adapter to use.
    pub kind: ProviderKind,
    /// Endpoint URL.
    pub endpoint: String,
    /// Whether the entry participates in selection.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Selection priority; lower is tried first.
    pub priority: u8,
    /// Per-request timeout in seconds. `None` means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Credentials for key-gated adapters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,
}

impl ProviderConfig {
    /// The per-request timeout as a [`Duration`].
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Validate structural invariants.
    ///
    /// Credential checks apply only to enabled entries — a disabled
    /// key-gated entry without credentials is the normal out-of-the-box
    /// state until `configure` supplies a key.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            bail!("provider id must not be empty");
        }
        if Url::parse(&self.endpoint).is_err() {
            bail!("provider '{}' has an invalid endpoint URL", self.id);
        }
        if self.enabled && self.kind.requires_credentials() {
            let Some(credentials) = &self.credentials else {
                bail!("provider '{}' requires credentials", self.id);
            };
            if credentials.api_key.is_empty() {
                bail!("provider '{}' requires an API key", self.id);
            }
            if self.kind == ProviderKind::Microsoft
                && credentials.region.as_deref().unwrap_or_default().is_empty()
            {
                bail!("provider '{}' requires a region", self.id);
            }
        }
        Ok(())
    }
}

/// The out-of-the-box provider fleet.
///
/// Keyless public instances come first; key-gated providers ship disabled
/// until `configure` supplies credentials; MyMemory is the last resort
/// because of its small free quota.
pub fn default_fleet() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig {
            id: "libretranslate".into(),
            name: "LibreTranslate".into(),
            kind: ProviderKind::LibreTranslate,
            endpoint: "https://libretranslate.de/translate".to_owned(),
            enabled: true,
            priority: 1,
            timeout_secs: Some(5),
            credentials: None,
        },
        ProviderConfig {
            id: "libretranslate_alt".into(),
            name: "LibreTranslate Alt".into(),
            kind: ProviderKind::LibreTranslate,
            endpoint: "https://translate.argosopentech.com/translate".to_owned(),
            enabled: true,
            priority: 2,
            timeout_secs: Some(5),
            credentials: None,
        },
        ProviderConfig {
            id: "microsoft".into(),
            name: "Microsoft Translator".into(),
            kind: ProviderKind::Microsoft,
            endpoint: "https://api.cognitive.microsofttranslator.com/translate".to_owned(),
            enabled: false,
            priority: 3,
            timeout_secs: None,
            credentials: None,
        },
        ProviderConfig {
            id: "deepl".into(),
            name: "DeepL".into(),
            kind: ProviderKind::DeepL,
            endpoint: "https://api-free.deepl.com/v2/translate".to_owned(),
            enabled: false,
            priority: 4,
            timeout_secs: None,
            credentials: None,
        },
        ProviderConfig {
            id: "mymemory".into(),
            name: "MyMemory".into(),
            kind: ProviderKind::MyMemory,
            endpoint: "https://api.mymemory.translated.net/get".to_owned(),
            enabled: true,
            priority: 5,
            timeout_secs: None,
            credentials: None,
        },
    ]
}

fn default_enabled() -> bool {
    true
}
