use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 digest of `input` (64 characters).
pub fn sha256_hex(input: &[u8]) -> String {
    hex::encode(Sha256::digest(input))
}

/// Merkle root over an ordered list of transaction transcripts.
///
/// The leaf layer digests each transcript in order. Each parent digests the
/// *string* concatenation of its two children's hex digests (not their raw
/// bytes); an odd layer pairs its last digest with itself. An empty list
/// yields the empty string, a sentinel rather than a digest.
pub fn merkle_root(transactions: &[String]) -> String {
    if transactions.is_empty() {
        return String::new();
    }

    let mut layer: Vec<String> = transactions
        .iter()
        .map(|tx| sha256_hex(tx.as_bytes()))
        .collect();

    while layer.len() > 1 {
        let mut next = Vec::with_capacity((layer.len() + 1) / 2);
        for pair in layer.chunks(2) {
            let combined = match pair {
                [left, right] => format!("{}{}", left, right),
                [last] => format!("{}{}", last, last),
                _ => unreachable!("chunks(2) yields one or two digests"),
            };
            next.push(sha256_hex(combined.as_bytes()));
        }
        layer = next;
    }

    layer.remove(0)
}
