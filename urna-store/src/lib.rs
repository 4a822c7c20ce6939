pub mod database;
pub mod store;

pub use database::{DatabaseError, RocksDb, CF_CANDIDATES, CF_ELECTIONS, CF_VOTERS};
pub use store::{RocksCandidateStore, RocksElectionStore, RocksVoterStore};
