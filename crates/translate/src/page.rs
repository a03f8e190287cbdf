//! Page snapshot types.
//!
//! A [`PageSnapshot`] is the set of translatable fragments captured from a
//! page exactly once, before any translation runs. The snapshot keeps each
//! fragment's original text so switching back to the source language never
//! round-trips through a provider.

use serde::{Deserialize, Serialize};

/// Opaque handle identifying one translatable fragment of the page.
///
/// The extractor assigns ids in document order; the UI binding maps them
/// back to its own element references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FragmentId(pub u64);

/// One translatable fragment: a handle plus its text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Opaque handle assigned at extraction time.
    pub id: FragmentId,
    /// The fragment's text, trimmed.
    pub text: String,
}

impl Fragment {
    /// Create a fragment, trimming the text.
    pub fn new(id: FragmentId, text: impl Into<String>) -> Self {
        let text = text.into().trim().to_owned();
        Self { id, text }
    }
}

/// A page's translatable fragments with their original texts.
#[derive(Debug, Clone, Default)]
pub struct PageSnapshot {
    fragments: Vec<Fragment>,
}

impl PageSnapshot {
    /// Capture a snapshot from extracted fragments. Fragments whose text
    /// trims to empty are dropped.
    pub fn capture(fragments: impl IntoIterator<Item = Fragment>) -> Self {
        let fragments = fragments
            .into_iter()
            .filter(|f| !f.text.trim().is_empty())
            .collect();
        Self { fragments }
    }

    /// The captured fragments, in document order.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// The originally captured `(handle, text)` pairs, for restoring the
    /// source language without consulting providers or cache.
    pub fn originals(&self) -> Vec<(FragmentId, String)> {
        self.fragments
            .iter()
            .map(|f| (f.id, f.text.clone()))
            .collect()
    }

    /// Number of captured fragments.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}
