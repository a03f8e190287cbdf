//! Translation coordination for multilingual pages.
//!
//! The [`Coordinator`] owns the provider lookup table, the per-provider
//! health board, and the session translation cache. A periodic sweeper
//! re-enables providers that were backed off after repeated failures,
//! and the visitor's language choice is persisted across sessions.

pub use cache::TranslationCache;
pub use coordinator::{Coordinator, CoordinatorConfig, ProviderStatus};
pub use health::{HealthBoard, ProviderHealth};
pub use prefs::LanguagePrefs;

mod cache;
mod coordinator;
mod health;
mod prefs;
mod sweep;
