//! Error types for token minting, configuration, and push delivery.
//!
//! Every error is terminal for the invocation. Nothing here is retried;
//! the binaries print the error chain and exit non-zero.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while minting a provider token.
#[derive(Error, Debug)]
pub enum TokenError {
    /// The key file could not be read.
    #[error("Failed to read signing key {path}")]
    KeyRead {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// No PEM block was found in the key buffer.
    #[error("Failed to parse PEM block: {0}")]
    KeyFormat(#[source] pem::PemError),

    /// The PEM block is not a PKCS#8 P-256 private key.
    #[error("Error parsing private key: not a PKCS#8 P-256 key ({0})")]
    KeyParse(#[source] p256::pkcs8::Error),

    /// A required claim or header field is missing.
    #[error("Invalid token claims: {0}")]
    InvalidClaims(String),

    /// Header or claims could not be serialized.
    #[error("Failed to encode token segment")]
    Encoding(#[source] serde_json::Error),

    /// The ECDSA signature operation failed.
    #[error("Error signing token")]
    Signing(#[source] p256::ecdsa::Error),
}

/// Errors produced while loading [`crate::config::ApnsConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Failed to read config file {path}")]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for the config schema.
    #[error("Failed to parse config file {path}")]
    Parse {
        /// Path that was parsed.
        path: PathBuf,
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },

    /// A field holds a value no request could be built from.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors produced while building or delivering a push.
#[derive(Error, Debug)]
pub enum PushError {
    /// URL or headers could not be formed from the inputs.
    #[error("Failed to create request: {0}")]
    RequestConstruction(String),

    /// The payload could not be serialized.
    #[error("Failed to serialize payload")]
    Serialize(#[source] serde_json::Error),

    /// Network, DNS, TLS, or timeout failure before a response arrived.
    #[error("Failed to send request")]
    Transport(#[source] reqwest::Error),

    /// The response body could not be read in full.
    #[error("Failed to read response")]
    ResponseRead(#[source] reqwest::Error),

    /// APNs answered with a non-200 status.
    #[error("APNs error: {status_line} - {}", String::from_utf8_lossy(body))]
    Delivery {
        /// Numeric HTTP status.
        status: u16,
        /// Status line as received, e.g. `410 Gone`.
        status_line: String,
        /// Response body, byte for byte.
        body: Vec<u8>,
    },
}

impl PushError {
    /// APNs `reason` code from a delivery failure body, if present.
    ///
    /// Only used for log output; the body itself is surfaced unmodified.
    pub fn reason(&self) -> Option<String> {
        let Self::Delivery { body, .. } = self else {
            return None;
        };
        serde_json::from_slice::<serde_json::Value>(body)
            .ok()?
            .get("reason")?
            .as_str()
            .map(str::to_string)
    }

    /// HTTP status of a delivery failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Delivery { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delivery(status: u16, status_line: &str, body: &str) -> PushError {
        PushError::Delivery {
            status,
            status_line: status_line.to_string(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_delivery_message_carries_status_and_body() {
        let err = delivery(410, "410 Gone", r#"{"reason":"BadDeviceToken"}"#);
        let msg = err.to_string();
        assert!(msg.contains("410"));
        assert!(msg.contains("BadDeviceToken"));
    }

    #[test]
    fn test_reason_extracted_from_json_body() {
        let err = delivery(400, "400 Bad Request", r#"{"reason":"BadTopic"}"#);
        assert_eq!(err.reason().as_deref(), Some("BadTopic"));
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_reason_absent_for_non_json_body() {
        let err = delivery(502, "502 Bad Gateway", "<html>upstream</html>");
        assert!(err.reason().is_none());
    }

    #[test]
    fn test_delivery_keeps_non_utf8_body_bytes() {
        let raw = vec![b'{', 0xff, 0xfe, b'}'];
        let err = PushError::Delivery {
            status: 500,
            status_line: "500 Internal Server Error".to_string(),
            body: raw.clone(),
        };
        assert!(err.to_string().contains("500"));
        match err {
            PushError::Delivery { body, .. } => assert_eq!(body, raw),
            other => panic!("expected Delivery, got {other:?}"),
        }
    }

    #[test]
    fn test_reason_absent_for_other_variants() {
        let err = PushError::RequestConstruction("empty device token".to_string());
        assert!(err.reason().is_none());
        assert!(err.status().is_none());
    }
}
