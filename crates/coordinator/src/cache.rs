//! Session-lifetime translation cache.

use std::collections::HashMap;
use std::sync::RwLock;
use translate::Lang;

/// Memoization layer over provider calls: at most one network call per
/// distinct `(text, language)` pair per session. Entries never expire —
/// the map lives and dies with the process.
#[derive(Debug, Default)]
pub struct TranslationCache {
    entries: RwLock<HashMap<Lang, HashMap<String, String>>>,
}

impl TranslationCache {
    /// Look up a cached translation.
    pub fn get(&self, text: &str, target: Lang) -> Option<String> {
        let entries = self.entries.read().expect("cache lock poisoned");
        entries.get(&target).and_then(|map| map.get(text)).cloned()
    }

    /// Store a translation.
    pub fn insert(&self, text: &str, target: Lang, translated: String) {
        self.entries
            .write()
            .expect("cache lock poisoned")
            .entry(target)
            .or_default()
            .insert(text.to_owned(), translated);
    }

    /// Total number of cached pairs across all languages.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .expect("cache lock poisoned")
            .values()
            .map(HashMap::len)
            .sum()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
