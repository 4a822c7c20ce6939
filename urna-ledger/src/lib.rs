pub mod block;
pub mod chain;
pub mod hash;

pub use block::{Block, GENESIS_PREVIOUS_HASH};
pub use chain::{Ledger, DEFAULT_DIFFICULTY};
pub use hash::{merkle_root, sha256_hex};
