//! HTTP transport for the single APNs exchange.
//!
//! [`Transport`] is the seam between request construction and the network.
//! [`HttpTransport`] is the real implementation on reqwest's blocking
//! client; tests substitute their own.

use std::time::Duration;

use reqwest::blocking::Client;

use super::request::PushRequest;
use crate::constants;
use crate::error::PushError;

/// Raw outcome of one HTTP exchange, before success is decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushResponse {
    /// Numeric HTTP status.
    pub status: u16,
    /// Status line, e.g. `200 OK`.
    pub status_line: String,
    /// APNs-assigned notification id, when the response carried one.
    pub apns_id: Option<String>,
    /// Full response body, byte for byte.
    pub body: Vec<u8>,
}

impl PushResponse {
    /// Body as text, for display. Invalid UTF-8 is replaced.
    pub fn body_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Performs one request/response exchange.
pub trait Transport {
    /// Sends `request` and reads the full response.
    fn execute(&self, request: &PushRequest) -> Result<PushResponse, PushError>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with the given request timeout (`None` = no timeout).
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(timeout: Option<Duration>) -> Result<Self, PushError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(PushError::Transport)?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &PushRequest) -> Result<PushResponse, PushError> {
        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }

        log::debug!("[APNs] POST {}", request.url);

        let response = builder
            .body(request.body.clone())
            .send()
            .map_err(|e| {
                if e.is_builder() {
                    PushError::RequestConstruction(e.to_string())
                } else {
                    PushError::Transport(e)
                }
            })?;

        let status = response.status();
        let apns_id = response
            .headers()
            .get(constants::APNS_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().map_err(PushError::ResponseRead)?.to_vec();

        Ok(PushResponse {
            status: status.as_u16(),
            status_line: status.to_string(),
            apns_id,
            body,
        })
    }
}
