//! Live Activity push delivery.
//!
//! Sends exactly one request per call. There is no retry and no backoff:
//! the caller sees the first outcome and decides what to do with it.
//!
//! # Flow
//!
//! ```text
//! NotificationPayload ──serialize──▶ body
//!                                     │
//! ApnsConfig + jwt + device token ──▶ PushRequest::build
//!                                     │
//!                              Transport::execute
//!                                     │
//!                   200 ──▶ Ok(PushResponse)
//!                   else ─▶ Err(PushError::Delivery)
//! ```

pub mod request;
pub mod transport;

pub use request::PushRequest;
pub use transport::{HttpTransport, PushResponse, Transport};

use crate::config::ApnsConfig;
use crate::error::PushError;

/// Builds the request, performs one exchange, and classifies the result.
///
/// Only status 200 counts as delivered. Any other status becomes
/// [`PushError::Delivery`] carrying the status line and body verbatim.
pub fn send<T: Transport + ?Sized>(
    transport: &T,
    config: &ApnsConfig,
    jwt: &str,
    device_token: &str,
    body: Vec<u8>,
) -> Result<PushResponse, PushError> {
    let request = PushRequest::build(config, jwt, device_token, body)?;
    let response = transport.execute(&request)?;

    if response.status != 200 {
        let err = PushError::Delivery {
            status: response.status,
            status_line: response.status_line,
            body: response.body,
        };
        log::warn!(
            "[APNs] Push rejected ({}): reason={}",
            err.status().unwrap_or_default(),
            err.reason().as_deref().unwrap_or("unknown")
        );
        return Err(err);
    }

    log::info!(
        "[APNs] Push delivered (apns-id={})",
        response.apns_id.as_deref().unwrap_or("-")
    );
    Ok(response)
}
