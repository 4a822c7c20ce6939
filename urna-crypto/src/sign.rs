use crate::error::CryptoError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};

/// Sign `message` with SHA-256 + RSA PKCS#1 v1.5, returning the signature
/// base64-encoded.
pub fn sign(message: &str, private_key: &RsaPrivateKey) -> Result<String, CryptoError> {
    let digest = Sha256::digest(message.as_bytes());
    let signature = private_key.sign(Pkcs1v15Sign::new::<Sha256>(), digest.as_slice())?;
    Ok(BASE64.encode(signature))
}

/// Verify a base64 signature over `message` against `public_key`.
///
/// Fail-closed: malformed base64, a wrong-length signature, or any backend
/// verification failure all return `false` rather than an error.
pub fn verify(message: &str, signature: &str, public_key: &RsaPublicKey) -> bool {
    let Ok(signature) = BASE64.decode(signature) else {
        return false;
    };
    let digest = Sha256::digest(message.as_bytes());
    public_key
        .verify(Pkcs1v15Sign::new::<Sha256>(), digest.as_slice(), &signature)
        .is_ok()
}
