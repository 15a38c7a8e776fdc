//! HTTP adapters for the Flow platform.

use crate::config::FlowClientConfig;
use crate::task::ports::{
    AttachmentFetchError, AttachmentFetchResult, AttachmentFetcher, FlowEndpoint, FlowTransport,
    FlowTransportError, FlowTransportResult, check_envelope,
};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, ORIGIN, REFERER};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Name of the single form field carrying the request document.
pub const FORM_FIELD: &str = "_JSON_";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// Encodes a request document as the platform's form body.
///
/// The JSON text is percent-encoded and then form-encoded, as the platform's
/// web client does.
#[must_use]
pub fn encode_form_body(payload: &Value) -> String {
    let document = payload.to_string();
    let component = urlencoding::encode(&document);
    format!("{FORM_FIELD}={}", urlencoding::encode(&component))
}

/// Transport that posts form-encoded JSON documents over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFlowTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpFlowTransport {
    /// Builds a transport with the fixed platform headers and the configured
    /// per-call timeout.
    ///
    /// # Errors
    ///
    /// Returns [`FlowTransportError::Connection`] when the base URL cannot be
    /// used as a header value or the client cannot be built.
    pub fn new(config: &FlowClientConfig) -> FlowTransportResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_owned();
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(
            ORIGIN,
            HeaderValue::from_str(&base_url).map_err(FlowTransportError::connection)?,
        );
        headers.insert(
            REFERER,
            HeaderValue::from_str(&format!("{base_url}/main.act"))
                .map_err(FlowTransportError::connection)?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(FlowTransportError::connection)?;
        Ok(Self { http, base_url })
    }

    fn classify(endpoint: FlowEndpoint, err: reqwest::Error) -> FlowTransportError {
        if err.is_timeout() {
            FlowTransportError::Timeout(endpoint)
        } else {
            FlowTransportError::connection(err)
        }
    }
}

#[async_trait]
impl FlowTransport for HttpFlowTransport {
    #[tracing::instrument(name = "flow.send", skip(self, payload))]
    async fn send(&self, endpoint: FlowEndpoint, payload: Value) -> FlowTransportResult<Value> {
        let url = format!("{}{}", self.base_url, endpoint.path());
        let response = self
            .http
            .post(&url)
            .body(encode_form_body(&payload))
            .send()
            .await
            .map_err(|err| Self::classify(endpoint, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FlowTransportError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| Self::classify(endpoint, err))?;
        debug!(bytes = bytes.len(), "received response");
        let body: Value = serde_json::from_slice(&bytes).map_err(FlowTransportError::decode)?;
        check_envelope(body)
    }
}

/// Attachment fetcher that downloads over HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpAttachmentFetcher {
    http: reqwest::Client,
}

impl HttpAttachmentFetcher {
    /// Builds a fetcher with a per-download timeout.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentFetchError::Network`] when the client cannot be
    /// built.
    pub fn new(timeout: Duration) -> AttachmentFetchResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AttachmentFetchError::network)?;
        Ok(Self { http })
    }
}

#[async_trait]
impl AttachmentFetcher for HttpAttachmentFetcher {
    #[tracing::instrument(name = "flow.fetch_attachment", skip(self))]
    async fn fetch(&self, url: &str) -> AttachmentFetchResult<Vec<u8>> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(AttachmentFetchError::network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(AttachmentFetchError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }
        let bytes = response
            .bytes()
            .await
            .map_err(AttachmentFetchError::network)?;
        Ok(bytes.to_vec())
    }
}
