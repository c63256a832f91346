//! Application-wide constants for apns-live.
//!
//! Centralizes the APNs wire constants and the configuration defaults so
//! the request builder and the config loader agree on them.
//!
//! # Categories
//!
//! - **Endpoints**: APNs hosts and port
//! - **Headers**: fixed header values for Live Activity pushes
//! - **Timeouts**: network timeouts
//! - **Token**: provider token algorithm

use std::time::Duration;

// ============================================================================
// Endpoints
// ============================================================================

/// Production APNs host.
pub const APNS_PRODUCTION_HOST: &str = "api.push.apple.com";

/// Development (sandbox) APNs host.
///
/// Builds signed with a development provisioning profile receive pushes
/// only from this host.
pub const APNS_SANDBOX_HOST: &str = "api.sandbox.push.apple.com";

/// Default APNs port. Apple also accepts 2197 for networks that block 443.
pub const APNS_DEFAULT_PORT: u16 = 443;

/// Path prefix for the device endpoint; the device token is appended.
pub const APNS_DEVICE_PATH: &str = "/3/device/";

// ============================================================================
// Headers
// ============================================================================

/// `apns-push-type` value for Live Activity pushes.
pub const LIVE_ACTIVITY_PUSH_TYPE: &str = "liveactivity";

/// Suffix appended to the bundle id to form the `apns-topic` header.
pub const LIVE_ACTIVITY_TOPIC_SUFFIX: &str = ".push-type.liveactivity";

/// `apns-priority` value. 10 delivers immediately.
pub const APNS_PRIORITY_IMMEDIATE: &str = "10";

/// Request body content type.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Response header carrying the APNs-assigned notification id.
pub const APNS_ID_HEADER: &str = "apns-id";

// ============================================================================
// Timeouts
// ============================================================================

/// Default HTTP request timeout for the push exchange.
///
/// APNs usually answers within a second; 10 seconds bounds a stalled
/// connection without cutting off slow networks.
pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// Token
// ============================================================================

/// JWS algorithm identifier APNs requires for provider tokens.
pub const TOKEN_ALGORITHM: &str = "ES256";

/// JWS `typ` header value.
pub const TOKEN_TYPE: &str = "JWT";

/// PEM label of an unencrypted PKCS#8 private key (Apple `.p8` files).
pub const PKCS8_PEM_LABEL: &str = "PRIVATE KEY";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_values_are_reasonable() {
        assert!(HTTP_REQUEST_TIMEOUT >= Duration::from_secs(5));
        assert!(HTTP_REQUEST_TIMEOUT <= Duration::from_secs(60));
    }

    #[test]
    fn test_topic_suffix_matches_push_type() {
        assert!(LIVE_ACTIVITY_TOPIC_SUFFIX.ends_with(LIVE_ACTIVITY_PUSH_TYPE));
    }

    #[test]
    fn test_device_path_is_slash_terminated() {
        assert!(APNS_DEVICE_PATH.starts_with('/'));
        assert!(APNS_DEVICE_PATH.ends_with('/'));
    }
}
