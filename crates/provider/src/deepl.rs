//! DeepL wire adapter.
//!
//! Form-encoded POST authenticated with a `DeepL-Auth-Key` header.
//! DeepL wants upper-case language codes. The adapter fails fast with a
//! configuration error until a key is supplied.

use compact_str::CompactString;
use reqwest::header::{self, HeaderMap};
use serde::Deserialize;
use translate::{Error, HttpTransport, Lang, Result, Translator};

use crate::config::Credentials;

/// Response body for `/v2/translate`.
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    /// One entry per input text; exactly one is sent per request.
    pub translations: Vec<Translation>,
}

/// A single DeepL translation entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Translation {
    /// The translated text.
    pub text: String,
}

/// Adapter for the DeepL v2 API.
#[derive(Clone)]
pub struct DeepL {
    transport: HttpTransport,
    endpoint: String,
    id: CompactString,
    key: Option<String>,
}

impl DeepL {
    /// Create an adapter. A missing or empty key is tolerated here;
    /// `translate` fails fast until one is configured.
    pub fn new(
        transport: HttpTransport,
        endpoint: &str,
        id: CompactString,
        credentials: Option<Credentials>,
    ) -> Self {
        let key = credentials
            .map(|c| c.api_key)
            .filter(|key| !key.is_empty());
        Self {
            transport,
            endpoint: endpoint.to_owned(),
            id,
            key,
        }
    }
}

impl Translator for DeepL {
    async fn translate(&self, text: &str, target: Lang) -> Result<String> {
        let Some(key) = &self.key else {
            return Err(Error::Configuration(self.id.clone()));
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            format!("DeepL-Auth-Key {key}")
                .parse()
                .map_err(|_| Error::Configuration(self.id.clone()))?,
        );
        let form = [
            ("text", text.to_owned()),
            ("target_lang", target.code().to_ascii_uppercase()),
            ("source_lang", Lang::SOURCE.code().to_ascii_uppercase()),
        ];
        let raw = self.transport.post_form(&self.endpoint, headers, &form).await?;

        let response: Response =
            serde_json::from_str(&raw).map_err(|e| Error::Payload(e.to_string()))?;
        response
            .translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or_else(|| Error::Payload("empty translations list".to_owned()))
    }
}
