use crate::model::{Candidate, Election};
use crate::store::{CandidateStore, ElectionStore, StoreError};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Election and candidate lifecycle management.
///
/// Operations on an unknown election return `Ok(None)` rather than failing;
/// store errors are the only error path.
pub struct ElectionService {
    elections: Arc<dyn ElectionStore>,
    candidates: Arc<dyn CandidateStore>,
}

impl ElectionService {
    pub fn new(elections: Arc<dyn ElectionStore>, candidates: Arc<dyn CandidateStore>) -> Self {
        Self {
            elections,
            candidates,
        }
    }

    /// Create an inactive election with a fresh id.
    pub fn create_election(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Election, StoreError> {
        let election = Election::new(Uuid::new_v4().to_string(), title, description);
        self.elections.save(&election)?;
        info!(election = %election.id, title = %election.title, "election created");
        Ok(election)
    }

    pub fn all_elections(&self) -> Result<Vec<Election>, StoreError> {
        self.elections.find_all()
    }

    pub fn election_by_id(&self, id: &str) -> Result<Option<Election>, StoreError> {
        self.elections.find_by_id(id)
    }

    /// Activate an election and stamp its start time.
    pub fn start_election(&self, id: &str) -> Result<Option<Election>, StoreError> {
        let Some(mut election) = self.elections.find_by_id(id)? else {
            return Ok(None);
        };
        election.active = true;
        election.start_millis = Some(chrono::Utc::now().timestamp_millis());
        self.elections.save(&election)?;
        info!(election = %election.id, "election started");
        Ok(Some(election))
    }

    /// Deactivate an election and stamp its end time.
    pub fn end_election(&self, id: &str) -> Result<Option<Election>, StoreError> {
        let Some(mut election) = self.elections.find_by_id(id)? else {
            return Ok(None);
        };
        election.active = false;
        election.end_millis = Some(chrono::Utc::now().timestamp_millis());
        self.elections.save(&election)?;
        info!(election = %election.id, "election ended");
        Ok(Some(election))
    }

    /// Register a candidate under an existing election.
    pub fn add_candidate(
        &self,
        election_id: &str,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Option<Candidate>, StoreError> {
        let Some(mut election) = self.elections.find_by_id(election_id)? else {
            return Ok(None);
        };

        let candidate = Candidate::new(Uuid::new_v4().to_string(), name, description, election_id);
        self.candidates.save(&candidate)?;

        election.add_candidate_id(candidate.id.clone());
        self.elections.save(&election)?;

        info!(election = %election_id, candidate = %candidate.id, "candidate added");
        Ok(Some(candidate))
    }

    pub fn candidates_for(&self, election_id: &str) -> Result<Vec<Candidate>, StoreError> {
        self.candidates.find_by_election(election_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::{MemCandidateStore, MemElectionStore};

    fn service() -> ElectionService {
        ElectionService::new(
            Arc::new(MemElectionStore::default()),
            Arc::new(MemCandidateStore::default()),
        )
    }

    #[test]
    fn test_create_election_is_inactive() {
        let service = service();
        let election = service.create_election("Board 2026", "Annual").unwrap();

        assert!(!election.active);
        assert!(!election.id.is_empty());
        assert_eq!(
            service.election_by_id(&election.id).unwrap(),
            Some(election)
        );
    }

    #[test]
    fn test_start_and_end_election() {
        let service = service();
        let election = service.create_election("Board 2026", "").unwrap();

        let started = service.start_election(&election.id).unwrap().unwrap();
        assert!(started.active);
        assert!(started.start_millis.is_some());
        assert!(started.end_millis.is_none());

        let ended = service.end_election(&election.id).unwrap().unwrap();
        assert!(!ended.active);
        assert!(ended.end_millis.is_some());
    }

    #[test]
    fn test_unknown_election_yields_none() {
        let service = service();
        assert!(service.start_election("nope").unwrap().is_none());
        assert!(service.end_election("nope").unwrap().is_none());
        assert!(service.add_candidate("nope", "Bob", "").unwrap().is_none());
    }

    #[test]
    fn test_add_candidate_registers_on_election() {
        let service = service();
        let election = service.create_election("Board 2026", "").unwrap();

        let candidate = service
            .add_candidate(&election.id, "Bob", "Incumbent")
            .unwrap()
            .unwrap();
        assert_eq!(candidate.election_id, election.id);
        assert_eq!(candidate.vote_count, 0);

        let reloaded = service.election_by_id(&election.id).unwrap().unwrap();
        assert_eq!(reloaded.candidate_ids, vec![candidate.id.clone()]);

        let roster = service.candidates_for(&election.id).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].id, candidate.id);
    }

    #[test]
    fn test_all_elections_lists_created() {
        let service = service();
        service.create_election("A", "").unwrap();
        service.create_election("B", "").unwrap();

        assert_eq!(service.all_elections().unwrap().len(), 2);
    }
}
