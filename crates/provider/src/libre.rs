//! LibreTranslate wire adapter.
//!
//! POST JSON `{q, source, target, format}` to a LibreTranslate-compatible
//! instance. The response carries either `translatedText` or an `error`
//! field; public instances signal overload with 429/503.

use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use translate::{Error, HttpTransport, Lang, Result, Translator};

/// Request body for the `/translate` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Request<'a> {
    /// Text to translate.
    pub q: &'a str,
    /// Source language code.
    pub source: &'a str,
    /// Target language code.
    pub target: &'a str,
    /// Always `"text"` — markup never reaches the providers.
    pub format: &'a str,
}

/// Response body for the `/translate` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// The translated text on success.
    #[serde(default)]
    pub translated_text: Option<String>,
    /// Error message some instances return with a 2xx status.
    #[serde(default)]
    pub error: Option<String>,
}

/// Adapter for LibreTranslate-compatible endpoints.
#[derive(Clone)]
pub struct LibreTranslate {
    transport: HttpTransport,
    endpoint: String,
}

impl LibreTranslate {
    /// Create an adapter for the given endpoint.
    pub fn new(transport: HttpTransport, endpoint: &str) -> Self {
        Self {
            transport,
            endpoint: endpoint.to_owned(),
        }
    }
}

impl Translator for LibreTranslate {
    async fn translate(&self, text: &str, target: Lang) -> Result<String> {
        let body = Request {
            q: text,
            source: Lang::SOURCE.code(),
            target: target.code(),
            format: "text",
        };
        tracing::debug!(
            "request: {}",
            serde_json::to_string(&body).unwrap_or_default()
        );
        let raw = self
            .transport
            .post_json(&self.endpoint, HeaderMap::new(), &[], &body)
            .await?;

        let response: Response =
            serde_json::from_str(&raw).map_err(|e| Error::Payload(e.to_string()))?;
        if let Some(message) = response.error {
            return Err(Error::Payload(message));
        }
        response
            .translated_text
            .ok_or_else(|| Error::Payload("missing translatedText".to_owned()))
    }
}
