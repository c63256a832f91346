//! Signing key decoding for `.p8` provider keys.

use p256::ecdsa::{SigningKey, VerifyingKey};
use p256::pkcs8::DecodePrivateKey;

use crate::constants;
use crate::error::TokenError;

/// A P-256 ECDSA private key used to sign provider tokens.
///
/// Holds the key only for the lifetime of one signing operation; it is
/// never written anywhere.
pub struct ProviderKey {
    inner: SigningKey,
}

impl std::fmt::Debug for ProviderKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderKey").finish_non_exhaustive()
    }
}

impl ProviderKey {
    /// Public half, for verifying tokens this key signed.
    pub fn verifying_key(&self) -> &VerifyingKey {
        self.inner.verifying_key()
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.inner
    }
}

/// Decodes the first PEM block in `pem_bytes` as a PKCS#8 P-256 key.
///
/// Text around the block is ignored. Returns [`TokenError::KeyFormat`] when
/// no block is found and [`TokenError::KeyParse`] when the block holds
/// anything other than a PKCS#8 EC key on P-256 (SEC1 `EC PRIVATE KEY`,
/// Ed25519, P-384, ...).
pub fn decode_key(pem_bytes: &[u8]) -> Result<ProviderKey, TokenError> {
    let block = pem::parse(pem_bytes).map_err(TokenError::KeyFormat)?;

    if block.tag() != constants::PKCS8_PEM_LABEL {
        log::debug!(
            "[Token] PEM block labelled {:?}, expected {:?}",
            block.tag(),
            constants::PKCS8_PEM_LABEL
        );
    }

    let inner = SigningKey::from_pkcs8_der(block.contents()).map_err(TokenError::KeyParse)?;
    Ok(ProviderKey { inner })
}
