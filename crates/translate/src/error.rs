//! Provider error taxonomy.

use compact_str::CompactString;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by translation providers.
///
/// The coordinator records every variant except [`Error::UnsupportedLanguage`]
/// against the failing provider's health and falls through to the next one;
/// none of them reach the end caller of a translation.
#[derive(Debug, Error)]
pub enum Error {
    /// The provider requires credentials that were never supplied.
    #[error("provider '{0}' is not configured with credentials")]
    Configuration(CompactString),

    /// The endpoint reported an overload status (429 or 503).
    #[error("provider overloaded ({0})")]
    Overloaded(u16),

    /// Any other non-2xx HTTP status.
    #[error("provider returned status {0}")]
    Status(u16),

    /// The response body did not match the provider's documented shape,
    /// or carried an explicit error field.
    #[error("malformed provider payload: {0}")]
    Payload(String),

    /// The per-provider timeout elapsed before a response arrived.
    #[error("provider timed out after {0:?}")]
    Timeout(Duration),

    /// Transport-level failure (DNS, TLS, connection reset).
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// A language code outside the supported set.
    #[error("unsupported language code '{0}'")]
    UnsupportedLanguage(String),
}
