//! MyMemory wire adapter.
//!
//! GET with `q` and `langpair=en|<target>` query parameters. Success
//! requires `responseStatus == 200` and a populated
//! `responseData.translatedText`; the free tier rate-limits with 429.

use serde::Deserialize;
use translate::{Error, HttpTransport, Lang, Result, Translator};

/// Response envelope for the `/get` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Numeric status; anything but 200 is a failure.
    #[serde(default)]
    pub response_status: Option<i64>,
    /// Payload holding the translation.
    #[serde(default)]
    pub response_data: Option<ResponseData>,
}

/// Inner payload of a MyMemory response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseData {
    /// The translated text.
    pub translated_text: String,
}

/// Adapter for the MyMemory public API.
#[derive(Clone)]
pub struct MyMemory {
    transport: HttpTransport,
    endpoint: String,
}

impl MyMemory {
    /// Create an adapter for the given endpoint.
    pub fn new(transport: HttpTransport, endpoint: &str) -> Self {
        Self {
            transport,
            endpoint: endpoint.to_owned(),
        }
    }
}

impl Translator for MyMemory {
    async fn translate(&self, text: &str, target: Lang) -> Result<String> {
        let langpair = format!("{}|{}", Lang::SOURCE.code(), target.code());
        let raw = self
            .transport
            .get(
                &self.endpoint,
                &[("q", text.to_owned()), ("langpair", langpair)],
            )
            .await?;

        let response: Response =
            serde_json::from_str(&raw).map_err(|e| Error::Payload(e.to_string()))?;
        match (response.response_status, response.response_data) {
            (Some(200), Some(data)) => Ok(data.translated_text),
            _ => Err(Error::Payload("MyMemory translation failed".to_owned())),
        }
    }
}
