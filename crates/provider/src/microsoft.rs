//! Microsoft Translator wire adapter.
//!
//! JSON array body with subscription key/region headers and the target
//! language in the query string. Fails fast until both key and region are
//! configured.

use compact_str::CompactString;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use translate::{Error, HttpTransport, Lang, Result, Translator};

use crate::config::Credentials;

/// One element of the request body array.
#[derive(Debug, Clone, Serialize)]
pub struct Request<'a> {
    /// Text to translate.
    pub text: &'a str,
}

/// One element of the response array.
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    /// Translations for the corresponding request element.
    pub translations: Vec<Translation>,
}

/// A single translation entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Translation {
    /// The translated text.
    pub text: String,
}

/// Adapter for the Microsoft Translator v3 API.
#[derive(Clone)]
pub struct Microsoft {
    transport: HttpTransport,
    endpoint: String,
    id: CompactString,
    credentials: Option<(String, String)>,
}

impl Microsoft {
    /// Create an adapter. Both key and region must be present for the
    /// adapter to be usable; `translate` fails fast otherwise.
    pub fn new(
        transport: HttpTransport,
        endpoint: &str,
        id: CompactString,
        credentials: Option<Credentials>,
    ) -> Self {
        let credentials = credentials.and_then(|c| {
            let region = c.region.unwrap_or_default();
            (!c.api_key.is_empty() && !region.is_empty()).then_some((c.api_key, region))
        });
        Self {
            transport,
            endpoint: endpoint.to_owned(),
            id,
            credentials,
        }
    }
}

impl Translator for Microsoft {
    async fn translate(&self, text: &str, target: Lang) -> Result<String> {
        let Some((key, region)) = &self.credentials else {
            return Err(Error::Configuration(self.id.clone()));
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            "ocp-apim-subscription-key",
            key.parse()
                .map_err(|_| Error::Configuration(self.id.clone()))?,
        );
        headers.insert(
            "ocp-apim-subscription-region",
            region
                .parse()
                .map_err(|_| Error::Configuration(self.id.clone()))?,
        );
        let body = [Request { text }];
        let raw = self
            .transport
            .post_json(
                &self.endpoint,
                headers,
                &[("api-version", "3.0"), ("to", target.code())],
                &body,
            )
            .await?;

        let response: Vec<Response> =
            serde_json::from_str(&raw).map_err(|e| Error::Payload(e.to_string()))?;
        response
            .into_iter()
            .next()
            .and_then(|r| r.translations.into_iter().next())
            .map(|t| t.text)
            .ok_or_else(|| Error::Payload("empty translations list".to_owned()))
    }
}
