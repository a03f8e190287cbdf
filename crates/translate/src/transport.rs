//! Timeout-bounded HTTP transport shared by the wire adapters.
//!
//! Wraps a shared `reqwest::Client` with an optional per-request deadline.
//! A deadline expiry drops the in-flight request and surfaces as
//! [`Error::Timeout`]; overload statuses (429/503) are kept distinct from
//! other failure statuses so the logs show why a provider was backed off.

use crate::{Error, Result};
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use std::time::Duration;

/// HTTP transport for one provider endpoint.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Create a transport over a shared client. `timeout` bounds every
    /// request issued through this transport; `None` means unbounded.
    pub fn new(client: Client, timeout: Option<Duration>) -> Self {
        Self { client, timeout }
    }

    /// POST a JSON body, optionally with extra headers and query pairs.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        headers: HeaderMap,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<String> {
        let request = self
            .client
            .request(Method::POST, url)
            .headers(headers)
            .query(query)
            .json(body);
        self.dispatch(request).await
    }

    /// POST a form-encoded body with extra headers.
    pub async fn post_form(
        &self,
        url: &str,
        headers: HeaderMap,
        form: &[(&str, String)],
    ) -> Result<String> {
        let request = self
            .client
            .request(Method::POST, url)
            .headers(headers)
            .form(form);
        self.dispatch(request).await
    }

    /// GET with query pairs.
    pub async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String> {
        let request = self.client.request(Method::GET, url).query(query);
        self.dispatch(request).await
    }

    /// The configured per-request timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    async fn dispatch(&self, request: RequestBuilder) -> Result<String> {
        let fut = async move {
            let response = request.send().await?;
            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::SERVICE_UNAVAILABLE
            {
                return Err(Error::Overloaded(status.as_u16()));
            }
            if !status.is_success() {
                return Err(Error::Status(status.as_u16()));
            }
            let text = response.text().await?;
            tracing::trace!("response: {text}");
            Ok(text)
        };

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| Error::Timeout(limit))?,
            None => fut.await,
        }
    }
}
