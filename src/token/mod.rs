//! APNs provider authentication tokens.
//!
//! A provider token is a compact ES256 JWS:
//!
//! ```text
//! base64url({"alg":"ES256","kid":<key id>,"typ":"JWT"})
//!   . base64url({"iss":<team id>,"iat":<unix seconds>})
//!   . base64url(r || s)
//! ```
//!
//! The signing key is the `.p8` file downloaded from the developer portal,
//! a PEM-wrapped PKCS#8 P-256 private key.
//!
//! # Example
//!
//! ```no_run
//! use apns_live::token::{build_claims, decode_key, sign};
//!
//! let pem = std::fs::read("AuthKey_ABC123DEFG.p8")?;
//! let key = decode_key(&pem)?;
//! let claims = build_claims("TEAM123456", chrono::Utc::now().timestamp())?;
//! let token = sign(&claims, "ABC123DEFG", &key)?;
//! println!("{token}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod jwt;
pub mod key;

pub use jwt::{build_claims, sign, AuthClaims, AuthToken, TokenHeader};
pub use key::{decode_key, ProviderKey};

use chrono::{DateTime, Utc};

use crate::config::ApnsConfig;
use crate::error::TokenError;

/// Reads the configured key file and mints a token issued at `now`.
pub fn mint(config: &ApnsConfig, now: DateTime<Utc>) -> Result<AuthToken, TokenError> {
    let pem = std::fs::read(&config.key_path).map_err(|source| TokenError::KeyRead {
        path: config.key_path.clone(),
        source,
    })?;
    let key = decode_key(&pem)?;
    let claims = build_claims(&config.team_id, now.timestamp())?;
    let token = sign(&claims, &config.key_id, &key)?;
    log::info!(
        "[Token] Minted provider token kid={} iss={} iat={}",
        config.key_id,
        config.team_id,
        claims.issued_at
    );
    Ok(token)
}
