use crate::{config::NodeConfig, error::NodeError};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};
use urna_election::admission::{VotingError, VotingService};
use urna_election::election::ElectionService;
use urna_election::store::{CandidateStore, ElectionStore, VoterStore};
use urna_ledger::Ledger;
use urna_store::{RocksCandidateStore, RocksDb, RocksElectionStore, RocksVoterStore};

/// Services container for all node components
pub struct NodeServices {
    /// Database connection (shared across stores)
    pub db: Arc<RocksDb>,
    /// Voter records
    pub voters: Arc<dyn VoterStore>,
    /// Candidate records and tallies
    pub candidates: Arc<dyn CandidateStore>,
    /// Election records
    pub elections: Arc<dyn ElectionStore>,
    /// The vote ledger; the admission workflow is its only writer
    pub ledger: Arc<Mutex<Ledger>>,
    /// Vote admission workflow
    pub voting: Arc<VotingService>,
    /// Election lifecycle management
    pub election_service: Arc<ElectionService>,
}

impl NodeServices {
    /// Initialize all services from configuration
    pub fn new(config: &NodeConfig) -> Result<Self, NodeError> {
        info!("Initializing node services...");

        let db = Arc::new(Self::init_database(&config.db_path)?);

        let voters: Arc<dyn VoterStore> = Arc::new(RocksVoterStore::new(db.clone()));
        let candidates: Arc<dyn CandidateStore> = Arc::new(RocksCandidateStore::new(db.clone()));
        let elections: Arc<dyn ElectionStore> = Arc::new(RocksElectionStore::new(db.clone()));
        debug!("Storage services initialized");

        let ledger = Arc::new(Mutex::new(Ledger::new(config.difficulty)));
        let voting = Arc::new(VotingService::new(
            ledger.clone(),
            voters.clone(),
            candidates.clone(),
        ));
        let election_service = Arc::new(ElectionService::new(
            elections.clone(),
            candidates.clone(),
        ));

        info!(
            difficulty = config.difficulty,
            "All services initialized successfully"
        );

        Ok(Self {
            db,
            voters,
            candidates,
            elections,
            ledger,
            voting,
            election_service,
        })
    }

    /// Initialize the RocksDB database
    fn init_database(db_path: &Path) -> Result<RocksDb, NodeError> {
        info!("Initializing database at {:?}", db_path);

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                NodeError::db_init(format!("Failed to create database directory: {}", e))
            })?;
        }

        let db = RocksDb::new(db_path)
            .map_err(|e| NodeError::db_init(format!("Failed to open database: {}", e)))?;

        info!("Database initialized successfully");
        Ok(db)
    }

    /// Number of blocks on the ledger (genesis included)
    pub fn chain_length(&self) -> Result<usize, NodeError> {
        let ledger = self
            .ledger
            .lock()
            .map_err(|_| NodeError::Voting(VotingError::LedgerPoisoned))?;
        Ok(ledger.len())
    }
}
