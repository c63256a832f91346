//! ES256 compact token encoding and signing.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD as BASE64URL, Engine};
use p256::ecdsa::signature::{Signer, Verifier};
use p256::ecdsa::{Signature, VerifyingKey};
use serde::{Deserialize, Serialize};

use super::key::ProviderKey;
use crate::constants;
use crate::error::TokenError;

/// Token header: algorithm, key id, type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    /// Always `ES256`.
    pub alg: String,
    /// Key identifier from the developer portal.
    pub kid: String,
    /// Always `JWT`.
    pub typ: String,
}

impl TokenHeader {
    fn es256(key_id: &str) -> Self {
        Self {
            alg: constants::TOKEN_ALGORITHM.to_string(),
            kid: key_id.to_string(),
            typ: constants::TOKEN_TYPE.to_string(),
        }
    }
}

/// Claims APNs reads from a provider token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClaims {
    /// Team identifier.
    #[serde(rename = "iss")]
    pub issuer: String,
    /// Unix timestamp, seconds.
    #[serde(rename = "iat")]
    pub issued_at: i64,
}

/// Builds the claim set. The issuer must be non-empty.
pub fn build_claims(issuer: &str, issued_at: i64) -> Result<AuthClaims, TokenError> {
    if issuer.is_empty() {
        return Err(TokenError::InvalidClaims("issuer is empty".to_string()));
    }
    Ok(AuthClaims {
        issuer: issuer.to_string(),
        issued_at,
    })
}

/// A signed compact token: `header.claims.signature`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    compact: String,
}

impl AuthToken {
    /// The compact string, as sent in the `authorization` header.
    pub fn as_str(&self) -> &str {
        &self.compact
    }

    /// The three base64url segments.
    pub fn segments(&self) -> Vec<&str> {
        self.compact.split('.').collect()
    }

    /// Decoded header segment.
    pub fn header(&self) -> Result<TokenHeader, TokenError> {
        decode_segment(self.segments().first().copied().unwrap_or_default())
    }

    /// Decoded claims segment.
    pub fn claims(&self) -> Result<AuthClaims, TokenError> {
        decode_segment(self.segments().get(1).copied().unwrap_or_default())
    }

    /// Checks the signature segment against the header and claims segments.
    pub fn verify(&self, public_key: &VerifyingKey) -> bool {
        let Some((signing_input, signature_b64)) = self.compact.rsplit_once('.') else {
            return false;
        };
        let Ok(raw) = BASE64URL.decode(signature_b64) else {
            return false;
        };
        let Ok(signature) = Signature::from_slice(&raw) else {
            return false;
        };
        public_key
            .verify(signing_input.as_bytes(), &signature)
            .is_ok()
    }
}

impl std::fmt::Display for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.compact)
    }
}

/// Signs `claims` with `key`, placing `key_id` in the header.
///
/// The signature is the fixed-width 64-byte `r || s` form JWS requires,
/// not DER.
pub fn sign(claims: &AuthClaims, key_id: &str, key: &ProviderKey) -> Result<AuthToken, TokenError> {
    if key_id.is_empty() {
        return Err(TokenError::InvalidClaims("key id is empty".to_string()));
    }

    let header_json = serde_json::to_vec(&TokenHeader::es256(key_id)).map_err(TokenError::Encoding)?;
    let claims_json = serde_json::to_vec(claims).map_err(TokenError::Encoding)?;

    let mut signing_input = BASE64URL.encode(header_json);
    signing_input.push('.');
    signing_input.push_str(&BASE64URL.encode(claims_json));

    let signature: Signature = key
        .signing_key()
        .try_sign(signing_input.as_bytes())
        .map_err(TokenError::Signing)?;

    let mut compact = signing_input;
    compact.push('.');
    compact.push_str(&BASE64URL.encode(signature.to_bytes()));

    Ok(AuthToken { compact })
}

fn decode_segment<T: serde::de::DeserializeOwned>(segment: &str) -> Result<T, TokenError> {
    let raw = BASE64URL
        .decode(segment)
        .map_err(|e| TokenError::InvalidClaims(format!("segment is not base64url: {e}")))?;
    serde_json::from_slice(&raw).map_err(TokenError::Encoding)
}
