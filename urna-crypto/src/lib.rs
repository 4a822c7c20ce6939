pub mod cipher;
pub mod error;
pub mod keys;
pub mod sign;

pub use cipher::{decrypt, encrypt};
pub use error::CryptoError;
pub use keys::{
    decode_private_key, decode_public_key, encode_private_key, encode_public_key,
    generate_keypair, Keypair, KEY_BITS,
};
pub use sign::{sign, verify};

pub use rsa::{RsaPrivateKey, RsaPublicKey};
