//! Translation providers.
//!
//! One wire adapter per third-party service, plus the unified [`Provider`]
//! enum the coordinator dispatches through. Adapters share the
//! timeout-bounded transport from `pageling-translate` and differ only in
//! request/response shapes: LibreTranslate speaks JSON, MyMemory a query
//! string, DeepL a form body, Microsoft JSON with subscription headers.

pub use config::{Credentials, ProviderConfig, ProviderKind, default_fleet};
pub use deepl::DeepL;
pub use libre::LibreTranslate;
pub use microsoft::Microsoft;
pub use mymemory::MyMemory;
pub use provider::{Provider, build_provider};

pub mod config;
pub mod deepl;
pub mod libre;
pub mod microsoft;
pub mod mymemory;
mod provider;
