use crate::model::Vote;
use crate::store::{CandidateStore, StoreError, VoterStore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use urna_ledger::{Block, Ledger};

/// Why a vote was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Voter unknown, or has already voted.
    NotEligible,
    /// Voter identity not yet confirmed by the registrar.
    NotVerified,
    /// Transcript signature did not verify against the voter's public key,
    /// or the key/signature could not be decoded at all.
    InvalidSignature,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::NotEligible => "voter is not eligible to vote",
            Self::NotVerified => "voter is not verified",
            Self::InvalidSignature => "invalid vote signature",
        };
        f.write_str(msg)
    }
}

/// Outcome of the admission workflow. Rejection is data, not an error:
/// callers branch on the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum AdmissionOutcome {
    Admitted(Vote),
    Rejected(RejectReason),
}

/// Infrastructure failures distinct from vote rejection.
#[derive(Debug, thiserror::Error)]
pub enum VotingError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("ledger lock poisoned")]
    LedgerPoisoned,
}

/// The ledger's sole writer: checks eligibility and signature, updates the
/// voter flag and candidate tally, and appends the admitted transcript.
pub struct VotingService {
    ledger: Arc<Mutex<Ledger>>,
    voters: Arc<dyn VoterStore>,
    candidates: Arc<dyn CandidateStore>,
}

impl VotingService {
    pub fn new(
        ledger: Arc<Mutex<Ledger>>,
        voters: Arc<dyn VoterStore>,
        candidates: Arc<dyn CandidateStore>,
    ) -> Self {
        Self {
            ledger,
            voters,
            candidates,
        }
    }

    /// Run a vote through the admission workflow.
    ///
    /// Checks, in order: the voter exists and has not voted, the voter is
    /// verified, and the vote's signature verifies against the voter's
    /// stored public key over the canonical transcript. On success the voter
    /// flag and candidate tally are persisted and the transcript is appended
    /// to the ledger in a single-transaction block (blocking proof-of-work
    /// under the ledger lock).
    ///
    /// The three success-path writes are not transactional: a failure
    /// between them leaves the voter flagged without a matching tally or
    /// ledger entry. Callers must not invoke this concurrently for the same
    /// voter.
    pub fn cast_vote(&self, vote: Vote) -> Result<AdmissionOutcome, VotingError> {
        let Some(mut voter) = self.voters.find_by_id(&vote.voter_id)? else {
            warn!(voter = %vote.voter_id, "vote rejected: unknown voter");
            return Ok(AdmissionOutcome::Rejected(RejectReason::NotEligible));
        };
        if voter.has_voted {
            warn!(voter = %vote.voter_id, "vote rejected: already voted");
            return Ok(AdmissionOutcome::Rejected(RejectReason::NotEligible));
        }
        if !voter.verified {
            warn!(voter = %vote.voter_id, "vote rejected: not verified");
            return Ok(AdmissionOutcome::Rejected(RejectReason::NotVerified));
        }

        let transcript = vote.transcript();
        let signature_valid = urna_crypto::decode_public_key(&voter.public_key)
            .map(|key| urna_crypto::verify(&transcript, &vote.signature, &key))
            .unwrap_or(false);
        if !signature_valid {
            warn!(voter = %vote.voter_id, "vote rejected: signature did not verify");
            return Ok(AdmissionOutcome::Rejected(RejectReason::InvalidSignature));
        }

        voter.has_voted = true;
        self.voters.save(&voter)?;

        if let Some(mut candidate) = self.candidates.find_by_id(&vote.candidate_id)? {
            candidate.increment_vote_count();
            self.candidates.save(&candidate)?;
        }

        let mut ledger = self.ledger.lock().map_err(|_| VotingError::LedgerPoisoned)?;
        let block = ledger.append_transactions(vec![transcript]);
        info!(
            voter = %vote.voter_id,
            candidate = %vote.candidate_id,
            index = block.index,
            "vote admitted"
        );

        Ok(AdmissionOutcome::Admitted(vote))
    }

    /// Every transcript recorded on the ledger, in chain order.
    pub fn ledger_transcripts(&self) -> Result<Vec<String>, VotingError> {
        let ledger = self.ledger.lock().map_err(|_| VotingError::LedgerPoisoned)?;
        Ok(ledger
            .blocks()
            .iter()
            .flat_map(|block| block.transactions.iter().cloned())
            .collect())
    }

    /// Tally for one candidate, as maintained by the admission workflow.
    pub fn vote_count_for_candidate(&self, candidate_id: &str) -> Result<u64, VotingError> {
        let count = self
            .candidates
            .find_by_id(candidate_id)?
            .map(|candidate| candidate.vote_count)
            .unwrap_or(0);
        Ok(count)
    }

    /// Run the ledger integrity check.
    pub fn is_ledger_valid(&self) -> Result<bool, VotingError> {
        let ledger = self.ledger.lock().map_err(|_| VotingError::LedgerPoisoned)?;
        Ok(ledger.is_valid())
    }

    /// Read-only snapshot of the whole chain.
    pub fn chain_snapshot(&self) -> Result<Vec<Block>, VotingError> {
        let ledger = self.ledger.lock().map_err(|_| VotingError::LedgerPoisoned)?;
        Ok(ledger.blocks().to_vec())
    }
}
