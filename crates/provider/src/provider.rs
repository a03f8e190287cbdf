//! Provider implementation.
//!
//! Unified [`Provider`] enum with enum dispatch over the wire adapters.
//! The coordinator keeps a lookup table from provider id to a built
//! variant and never matches on identifiers itself.

use crate::config::{ProviderConfig, ProviderKind};
use crate::{DeepL, LibreTranslate, Microsoft, MyMemory};
use anyhow::Result;
use translate::{Client, HttpTransport, Lang, Translator};

/// Unified translation provider enum.
#[derive(Clone)]
pub enum Provider {
    /// LibreTranslate-compatible endpoint.
    Libre(LibreTranslate),
    /// MyMemory public API.
    MyMemory(MyMemory),
    /// Microsoft Translator v3.
    Microsoft(Microsoft),
    /// DeepL v2.
    DeepL(DeepL),
}

/// Construct a [`Provider`] from config and a shared HTTP client.
///
/// Validates the config first. Key-gated adapters may be built without
/// credentials while disabled; they fail fast if ever invoked that way.
pub fn build_provider(config: &ProviderConfig, client: Client) -> Result<Provider> {
    config.validate()?;
    let transport = HttpTransport::new(client, config.timeout());
    let provider = match config.kind {
        ProviderKind::LibreTranslate => {
            Provider::Libre(LibreTranslate::new(transport, &config.endpoint))
        }
        ProviderKind::MyMemory => Provider::MyMemory(MyMemory::new(transport, &config.endpoint)),
        ProviderKind::Microsoft => Provider::Microsoft(Microsoft::new(
            transport,
            &config.endpoint,
            config.id.clone(),
            config.credentials.clone(),
        )),
        ProviderKind::DeepL => Provider::DeepL(DeepL::new(
            transport,
            &config.endpoint,
            config.id.clone(),
            config.credentials.clone(),
        )),
    };
    Ok(provider)
}

impl Translator for Provider {
    async fn translate(&self, text: &str, target: Lang) -> translate::Result<String> {
        match self {
            Self::Libre(p) => p.translate(text, target).await,
            Self::MyMemory(p) => p.translate(text, target).await,
            Self::Microsoft(p) => p.translate(text, target).await,
            Self::DeepL(p) => p.translate(text, target).await,
        }
    }
}
