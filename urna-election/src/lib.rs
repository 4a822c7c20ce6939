pub mod admission;
pub mod election;
pub mod model;
pub mod store;

pub use admission::{AdmissionOutcome, RejectReason, VotingError, VotingService};
pub use election::ElectionService;
pub use model::{Candidate, Election, Vote, Voter};
pub use store::{CandidateStore, ElectionStore, StoreError, VoterStore};
