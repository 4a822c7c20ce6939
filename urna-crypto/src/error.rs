/// Failures raised by the signature service.
///
/// Backend failures surface here instead of leaking the raw crypto crate
/// errors to callers; the admission workflow normalizes them further into
/// its rejection taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("rsa operation failed: {0}")]
    Rsa(#[from] rsa::Error),

    #[error("key encoding failed: {0}")]
    KeyEncoding(String),

    #[error("base64 decoding failed: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("plaintext is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl CryptoError {
    /// Create a key encoding error.
    pub fn key_encoding(msg: impl Into<String>) -> Self {
        Self::KeyEncoding(msg.into())
    }
}
