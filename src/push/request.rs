//! Outbound APNs request construction.

use reqwest::header::HeaderValue;
use reqwest::Url;

use crate::config::ApnsConfig;
use crate::constants;
use crate::error::PushError;

/// A fully formed push request: URL, headers, body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushRequest {
    /// Target URL, `https://<host>:<port>/3/device/<device token>`.
    pub url: String,
    /// Header name/value pairs in send order.
    pub headers: Vec<(&'static str, String)>,
    /// Serialized payload.
    pub body: Vec<u8>,
}

impl PushRequest {
    /// Builds a Live Activity push for `device_token`.
    ///
    /// Device tokens are hex strings; anything outside ASCII alphanumerics
    /// would change the request path and is rejected. The URL and every
    /// header value are checked here so malformed inputs never reach the
    /// network.
    pub fn build(
        config: &ApnsConfig,
        jwt: &str,
        device_token: &str,
        body: Vec<u8>,
    ) -> Result<Self, PushError> {
        if jwt.trim().is_empty() {
            return Err(PushError::RequestConstruction(
                "bearer token is empty".to_string(),
            ));
        }
        if device_token.is_empty() {
            return Err(PushError::RequestConstruction(
                "device token is empty".to_string(),
            ));
        }
        if !device_token.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(PushError::RequestConstruction(format!(
                "device token {device_token:?} contains non-alphanumeric characters"
            )));
        }
        if config.host.trim().is_empty() {
            return Err(PushError::RequestConstruction("host is empty".to_string()));
        }

        let url = format!(
            "https://{}:{}{}{}",
            config.host,
            config.port,
            constants::APNS_DEVICE_PATH,
            device_token
        );
        Url::parse(&url)
            .map_err(|e| PushError::RequestConstruction(format!("invalid URL {url:?}: {e}")))?;

        let headers = vec![
            ("authorization", format!("bearer {jwt}")),
            ("apns-topic", config.live_activity_topic()),
            ("apns-push-type", constants::LIVE_ACTIVITY_PUSH_TYPE.to_string()),
            ("apns-priority", constants::APNS_PRIORITY_IMMEDIATE.to_string()),
            ("content-type", constants::JSON_CONTENT_TYPE.to_string()),
        ];

        for (name, value) in &headers {
            HeaderValue::from_str(value).map_err(|e| {
                PushError::RequestConstruction(format!("invalid {name} header: {e}"))
            })?;
        }

        Ok(Self { url, headers, body })
    }

    /// Value of the first header named `name`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
