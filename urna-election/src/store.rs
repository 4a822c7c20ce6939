use crate::model::{Candidate, Election, Voter};

/// Failures surfaced by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Create a backend error.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Voter records, looked up and flagged by the admission workflow.
#[cfg_attr(test, mockall::automock)]
pub trait VoterStore: Send + Sync {
    fn find_by_id(&self, id: &str) -> Result<Option<Voter>, StoreError>;
    fn save(&self, voter: &Voter) -> Result<(), StoreError>;
}

/// Candidate records and their running tallies.
#[cfg_attr(test, mockall::automock)]
pub trait CandidateStore: Send + Sync {
    fn find_by_id(&self, id: &str) -> Result<Option<Candidate>, StoreError>;
    fn save(&self, candidate: &Candidate) -> Result<(), StoreError>;
    fn find_by_election(&self, election_id: &str) -> Result<Vec<Candidate>, StoreError>;
}

/// Election records.
#[cfg_attr(test, mockall::automock)]
pub trait ElectionStore: Send + Sync {
    fn find_by_id(&self, id: &str) -> Result<Option<Election>, StoreError>;
    fn save(&self, election: &Election) -> Result<(), StoreError>;
    fn find_all(&self) -> Result<Vec<Election>, StoreError>;
}
