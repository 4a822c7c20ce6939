use urna_crypto::CryptoError;
use urna_election::admission::VotingError;
use urna_election::store::StoreError;

/// Errors that can occur in the node
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("voting error: {0}")]
    Voting(#[from] VotingError),

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("database initialization failed: {0}")]
    DatabaseInit(String),

    #[error("rpc initialization failed: {0}")]
    RpcInit(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl NodeError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a database initialization error
    pub fn db_init(msg: impl Into<String>) -> Self {
        Self::DatabaseInit(msg.into())
    }

    /// Create an RPC initialization error
    pub fn rpc_init(msg: impl Into<String>) -> Self {
        Self::RpcInit(msg.into())
    }
}
