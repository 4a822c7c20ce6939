use crate::error::CryptoError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::rngs::OsRng;
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};

/// Encrypt `message` to the holder of `public_key` (RSA PKCS#1 v1.5),
/// returning base64 ciphertext.
///
/// Confidentiality primitive offered alongside signing; the vote admission
/// workflow does not use it, and nothing in the ledger depends on it. The
/// plaintext must fit a single RSA block (245 bytes at a 2048-bit modulus).
pub fn encrypt(message: &str, public_key: &RsaPublicKey) -> Result<String, CryptoError> {
    let mut rng = OsRng;
    let ciphertext = public_key.encrypt(&mut rng, Pkcs1v15Encrypt, message.as_bytes())?;
    Ok(BASE64.encode(ciphertext))
}

/// Decrypt base64 ciphertext produced by [`encrypt`].
pub fn decrypt(ciphertext: &str, private_key: &RsaPrivateKey) -> Result<String, CryptoError> {
    let ciphertext = BASE64.decode(ciphertext)?;
    let plaintext = private_key.decrypt(Pkcs1v15Encrypt, &ciphertext)?;
    Ok(String::from_utf8(plaintext)?)
}
