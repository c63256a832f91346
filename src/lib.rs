//! apns-live - APNs provider tokens and Live Activity pushes.
//!
//! This crate backs two small command-line utilities:
//!
//! - `apns-token` mints an ES256 provider authentication token
//! - `apns-live` sends one Live Activity update to one device
//!
//! # Modules
//!
//! - [`token`] - key decoding, claims, ES256 signing
//! - [`activity`] - Live Activity payload types and serialization
//! - [`push`] - request construction and the HTTP exchange
//! - [`config`] - configuration loading
//! - [`error`] - error types

pub mod activity;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod push;
pub mod token;

// Re-export commonly used types
pub use activity::{build_payload, serialize, LiveActivityEvent, NotificationPayload};
pub use config::ApnsConfig;
pub use error::{ConfigError, PushError, TokenError};
pub use push::{send, HttpTransport, PushRequest, PushResponse, Transport};
pub use token::{build_claims, decode_key, sign, AuthToken};
