//! Translator abstraction implemented by every provider variant.

use crate::{Lang, Result};

/// A capability to translate one piece of text into a target language.
pub trait Translator {
    /// Translate `text` from the source language into `target`.
    ///
    /// Returns the text exactly as produced by the backing service —
    /// callers decide how to treat empty or unchanged results.
    fn translate(&self, text: &str, target: Lang) -> impl Future<Output = Result<String>> + Send;
}
