use crate::hash;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Previous-hash sentinel carried by the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// A sealed unit of transactions with position, linkage, and proof-of-work.
///
/// `hash` digests `{index}{timestamp_millis}{merkle_root}{previous_hash}{nonce}`
/// as plain decimal/string concatenation with no delimiters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Block {
    /// Position in the chain, 0 for genesis.
    pub index: u64,
    /// Creation instant, Unix epoch milliseconds.
    pub timestamp_millis: i64,
    /// Ordered vote transcripts carried by this block.
    pub transactions: Vec<String>,
    /// Hash of the predecessor; `"0"` for genesis, empty while unlinked.
    pub previous_hash: String,
    /// Content digest, satisfies the difficulty target once mined.
    pub hash: String,
    /// Proof-of-work search counter.
    pub nonce: u64,
    /// Merkle root over `transactions`, empty when there are none.
    pub merkle_root: String,
}

impl Block {
    /// Fresh unlinked block: no transactions, timestamp = now, nonce 0.
    pub fn new() -> Self {
        let mut block = Self {
            index: 0,
            timestamp_millis: chrono::Utc::now().timestamp_millis(),
            transactions: Vec::new(),
            previous_hash: String::new(),
            hash: String::new(),
            nonce: 0,
            merkle_root: String::new(),
        };
        block.hash = block.compute_hash();
        block
    }

    /// Fully-parameterized construction. The Merkle root is computed from
    /// the transactions when not supplied.
    pub fn with_fields(
        index: u64,
        timestamp_millis: i64,
        transactions: Vec<String>,
        previous_hash: impl Into<String>,
        merkle_root: Option<String>,
        nonce: u64,
    ) -> Self {
        let merkle_root = merkle_root.unwrap_or_else(|| hash::merkle_root(&transactions));
        let mut block = Self {
            index,
            timestamp_millis,
            transactions,
            previous_hash: previous_hash.into(),
            hash: String::new(),
            nonce,
            merkle_root,
        };
        block.hash = block.compute_hash();
        block
    }

    /// Digest of the stored fields. Pure: call [`Block::refresh_merkle_root`]
    /// first when the transactions have changed since the root was stored.
    pub fn compute_hash(&self) -> String {
        let preimage = format!(
            "{}{}{}{}{}",
            self.index, self.timestamp_millis, self.merkle_root, self.previous_hash, self.nonce
        );
        hash::sha256_hex(preimage.as_bytes())
    }

    /// Recompute and store the Merkle root from the current transactions.
    pub fn refresh_merkle_root(&mut self) {
        self.merkle_root = hash::merkle_root(&self.transactions);
    }

    /// Seal the block: refresh the Merkle root from the current transactions
    /// (when any exist), then overwrite `hash` with the digest of the stored
    /// fields.
    pub fn seal(&mut self) {
        if !self.transactions.is_empty() {
            self.refresh_merkle_root();
        }
        self.hash = self.compute_hash();
    }

    /// Brute-force the nonce until the hash starts with `difficulty` zero
    /// characters. Blocking and unbounded: expected cost grows as
    /// 16^difficulty digest evaluations, and there is no cancellation.
    pub fn mine(&mut self, difficulty: usize) {
        self.refresh_merkle_root();
        self.hash = self.compute_hash();

        while !self.meets_difficulty(difficulty) {
            self.nonce += 1;
            self.hash = self.compute_hash();
        }
        debug!(index = self.index, nonce = self.nonce, hash = %self.hash, "block mined");
    }

    /// Whether the stored hash starts with `difficulty` zero characters.
    pub fn meets_difficulty(&self, difficulty: usize) -> bool {
        self.hash.len() >= difficulty && self.hash.bytes().take(difficulty).all(|b| b == b'0')
    }

    /// Queue a transaction on an unsealed block.
    ///
    /// Silently ignores a missing transaction, and silently ignores the call
    /// while `previous_hash` is unset or still the genesis sentinel: a block
    /// only accepts transactions once it has been linked to a real
    /// predecessor.
    pub fn add_transaction(&mut self, transaction: Option<String>) {
        let Some(transaction) = transaction else {
            return;
        };
        if self.previous_hash.is_empty() || self.previous_hash == GENESIS_PREVIOUS_HASH {
            return;
        }
        self.transactions.push(transaction);
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_block_defaults() {
        let block = Block::new();
        assert_eq!(block.index, 0);
        assert!(block.transactions.is_empty());
        assert!(block.previous_hash.is_empty());
        assert_eq!(block.nonce, 0);
        assert_eq!(block.merkle_root, "");
        assert_eq!(block.hash, block.compute_hash());
        assert!(block.timestamp_millis > 0);
    }

    #[test]
    fn test_with_fields_computes_merkle_root_when_absent() {
        let txs = vec!["tx1".to_string(), "tx2".to_string()];
        let block = Block::with_fields(1, 1000, txs.clone(), "0000abcd", None, 0);

        assert_eq!(block.merkle_root, hash::merkle_root(&txs));
        assert_eq!(block.hash, block.compute_hash());
    }

    #[test]
    fn test_with_fields_keeps_supplied_merkle_root() {
        let block = Block::with_fields(
            1,
            1000,
            vec!["tx1".to_string()],
            "prev",
            Some("supplied-root".to_string()),
            0,
        );
        assert_eq!(block.merkle_root, "supplied-root");
    }

    #[test]
    fn test_compute_hash_deterministic_and_nonce_sensitive() {
        let mut block = Block::with_fields(1, 1000, Vec::new(), "prev", None, 0);

        let first = block.compute_hash();
        let second = block.compute_hash();
        assert_eq!(first, second);

        block.nonce = 1;
        assert_ne!(block.compute_hash(), first);
    }

    #[test]
    fn test_identical_blocks_hash_identically() {
        let txs = vec!["tx1".to_string(), "tx2".to_string()];
        let a = Block::with_fields(1, 1_619_712_345_000, txs.clone(), "0000abcd", None, 0);
        let b = Block::with_fields(1, 1_619_712_345_000, txs, "0000abcd", None, 0);

        assert_eq!(a.compute_hash(), b.compute_hash());
    }

    #[test]
    fn test_seal_refreshes_merkle_root_after_transaction_change() {
        let mut block =
            Block::with_fields(1, 1000, vec!["tx1".to_string(), "tx2".to_string()], "prev", None, 0);
        let before = block.hash.clone();

        block.transactions.push("tx3".to_string());
        block.seal();

        assert_eq!(block.merkle_root, hash::merkle_root(&block.transactions));
        assert_ne!(block.hash, before);
    }

    #[test]
    fn test_seal_leaves_merkle_root_alone_when_empty() {
        let mut block = Block::with_fields(1, 1000, Vec::new(), "prev", Some(String::new()), 7);
        block.seal();
        assert_eq!(block.merkle_root, "");
        assert_eq!(block.hash, block.compute_hash());
    }

    #[test]
    fn test_mine_meets_difficulty() {
        let mut block =
            Block::with_fields(1, 1000, vec!["tx1".to_string(), "tx2".to_string()], "prev", None, 0);

        block.mine(2);

        assert!(block.hash.starts_with("00"));
        assert!(block.meets_difficulty(2));
        // Mined hash reflects the refreshed Merkle root and final nonce.
        assert_eq!(block.hash, block.compute_hash());
    }

    #[test]
    fn test_add_transaction_requires_real_predecessor() {
        let mut block = Block::new();

        // Unlinked: silently dropped.
        block.add_transaction(Some("tx1".to_string()));
        assert!(block.transactions.is_empty());

        // Genesis sentinel: silently dropped.
        block.previous_hash = GENESIS_PREVIOUS_HASH.to_string();
        block.add_transaction(Some("tx1".to_string()));
        assert!(block.transactions.is_empty());

        // Real predecessor link: accepted, in order.
        block.previous_hash = "00ab".to_string();
        block.add_transaction(Some("tx1".to_string()));
        block.add_transaction(Some("tx2".to_string()));
        assert_eq!(block.transactions, vec!["tx1", "tx2"]);

        // Missing transaction: silently dropped.
        block.add_transaction(None);
        assert_eq!(block.transactions.len(), 2);
    }

    #[test]
    fn test_block_serde_round_trip() {
        let block = Block::with_fields(3, 1000, vec!["tx".to_string()], "prev", None, 42);
        let json = serde_json::to_string(&block).unwrap();
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
    }
}
