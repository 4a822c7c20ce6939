use crate::database::{DatabaseError, RocksDb, CF_CANDIDATES, CF_ELECTIONS, CF_VOTERS};
use std::sync::Arc;
use urna_election::model::{Candidate, Election, Voter};
use urna_election::store::{CandidateStore, ElectionStore, StoreError, VoterStore};

impl From<DatabaseError> for StoreError {
    fn from(err: DatabaseError) -> Self {
        StoreError::backend(err.to_string())
    }
}

/// Voter records persisted as serde_json values keyed by voter id.
pub struct RocksVoterStore {
    db: Arc<RocksDb>,
}

impl RocksVoterStore {
    pub fn new(db: Arc<RocksDb>) -> Self {
        Self { db }
    }
}

impl VoterStore for RocksVoterStore {
    fn find_by_id(&self, id: &str) -> Result<Option<Voter>, StoreError> {
        match self.db.get(CF_VOTERS, id.as_bytes())? {
            Some(data) => Ok(Some(serde_json::from_slice(&data)?)),
            None => Ok(None),
        }
    }

    fn save(&self, voter: &Voter) -> Result<(), StoreError> {
        let value = serde_json::to_vec(voter)?;
        self.db.put(CF_VOTERS, voter.id.as_bytes(), &value)?;
        Ok(())
    }
}

/// Candidate records persisted as serde_json values keyed by candidate id.
pub struct RocksCandidateStore {
    db: Arc<RocksDb>,
}

impl RocksCandidateStore {
    pub fn new(db: Arc<RocksDb>) -> Self {
        Self { db }
    }
}

impl CandidateStore for RocksCandidateStore {
    fn find_by_id(&self, id: &str) -> Result<Option<Candidate>, StoreError> {
        match self.db.get(CF_CANDIDATES, id.as_bytes())? {
            Some(data) => Ok(Some(serde_json::from_slice(&data)?)),
            None => Ok(None),
        }
    }

    fn save(&self, candidate: &Candidate) -> Result<(), StoreError> {
        let value = serde_json::to_vec(candidate)?;
        self.db
            .put(CF_CANDIDATES, candidate.id.as_bytes(), &value)?;
        Ok(())
    }

    fn find_by_election(&self, election_id: &str) -> Result<Vec<Candidate>, StoreError> {
        let mut candidates = Vec::new();
        for data in self.db.list(CF_CANDIDATES)? {
            let candidate: Candidate = serde_json::from_slice(&data)?;
            if candidate.election_id == election_id {
                candidates.push(candidate);
            }
        }
        Ok(candidates)
    }
}

/// Election records persisted as serde_json values keyed by election id.
pub struct RocksElectionStore {
    db: Arc<RocksDb>,
}

impl RocksElectionStore {
    pub fn new(db: Arc<RocksDb>) -> Self {
        Self { db }
    }
}

impl ElectionStore for RocksElectionStore {
    fn find_by_id(&self, id: &str) -> Result<Option<Election>, StoreError> {
        match self.db.get(CF_ELECTIONS, id.as_bytes())? {
            Some(data) => Ok(Some(serde_json::from_slice(&data)?)),
            None => Ok(None),
        }
    }

    fn save(&self, election: &Election) -> Result<(), StoreError> {
        let value = serde_json::to_vec(election)?;
        self.db
            .put(CF_ELECTIONS, election.id.as_bytes(), &value)?;
        Ok(())
    }

    fn find_all(&self) -> Result<Vec<Election>, StoreError> {
        let mut elections = Vec::new();
        for data in self.db.list(CF_ELECTIONS)? {
            elections.push(serde_json::from_slice(&data)?);
        }
        Ok(elections)
    }
}
