use crate::error::CryptoError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::rngs::OsRng;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use tracing::debug;

/// RSA modulus size for every generated keypair.
pub const KEY_BITS: usize = 2048;

/// An RSA keypair as handed to a voter at enrollment.
#[derive(Debug, Clone)]
pub struct Keypair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
}

/// Generate a fresh 2048-bit keypair from the OS entropy source.
pub fn generate_keypair() -> Result<Keypair, CryptoError> {
    let mut rng = OsRng;
    let private_key = RsaPrivateKey::new(&mut rng, KEY_BITS)?;
    let public_key = RsaPublicKey::from(&private_key);
    debug!(bits = KEY_BITS, "generated rsa keypair");

    Ok(Keypair {
        public_key,
        private_key,
    })
}

/// Encode a public key as base64 over its SPKI DER form, the transport
/// string stored on a voter record.
pub fn encode_public_key(key: &RsaPublicKey) -> Result<String, CryptoError> {
    let der = key
        .to_public_key_der()
        .map_err(|e| CryptoError::key_encoding(e.to_string()))?;
    Ok(BASE64.encode(der.as_bytes()))
}

/// Decode a public key from its base64 SPKI DER transport string.
pub fn decode_public_key(encoded: &str) -> Result<RsaPublicKey, CryptoError> {
    let der = BASE64.decode(encoded)?;
    RsaPublicKey::from_public_key_der(&der).map_err(|e| CryptoError::key_encoding(e.to_string()))
}

/// Encode a private key as base64 over its PKCS#8 DER form.
pub fn encode_private_key(key: &RsaPrivateKey) -> Result<String, CryptoError> {
    let der = key
        .to_pkcs8_der()
        .map_err(|e| CryptoError::key_encoding(e.to_string()))?;
    Ok(BASE64.encode(der.as_bytes()))
}

/// Decode a private key from its base64 PKCS#8 DER transport string.
pub fn decode_private_key(encoded: &str) -> Result<RsaPrivateKey, CryptoError> {
    let der = BASE64.decode(encoded)?;
    RsaPrivateKey::from_pkcs8_der(&der).map_err(|e| CryptoError::key_encoding(e.to_string()))
}
