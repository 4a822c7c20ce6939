//! HTTP RPC server for the election node
//!
//! - GET  /health                    -> node status
//! - POST /votes                     -> cast a vote through the admission workflow
//! - GET  /votes                     -> transcripts recorded on the ledger
//! - GET  /votes/count/:candidate_id -> tally for one candidate
//! - GET  /chain                     -> full block snapshot
//! - GET  /chain/valid               -> ledger integrity verdict
//! - POST /elections                 -> create an election
//! - GET  /elections                 -> list elections
//! - GET  /elections/:id             -> one election
//! - PUT  /elections/:id/start       -> open an election
//! - PUT  /elections/:id/end         -> close an election
//! - POST /elections/:id/candidates  -> add a candidate
//! - GET  /elections/:id/candidates  -> election roster
//! - POST /voters                    -> register a voter (unverified)
//! - PUT  /voters/:id/verify         -> confirm a voter's identity
//! - GET  /voters/:id                -> one voter

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use uuid::Uuid;

use crate::error::NodeError;
use crate::services::NodeServices;
use urna_election::admission::AdmissionOutcome;
use urna_election::model::{Candidate, Election, Vote, Voter};
use urna_ledger::Block;

/// RPC server handle
pub struct RpcServer {
    addr: SocketAddr,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
}

impl RpcServer {
    /// Start the RPC server on `127.0.0.1:port` (0 = auto-select).
    /// Returns the server handle and the actual port bound.
    pub async fn start(
        services: Arc<NodeServices>,
        port: u16,
    ) -> Result<(Self, u16), NodeError> {
        let listener = TcpListener::bind(("127.0.0.1", port))
            .await
            .map_err(|e| NodeError::rpc_init(format!("Failed to bind RPC: {}", e)))?;

        let addr = listener
            .local_addr()
            .map_err(|e| NodeError::rpc_init(format!("Failed to get addr: {}", e)))?;

        info!("RPC server starting on {}", addr);

        let app = router(RpcState { services });

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });

            if let Err(e) = server.await {
                error!("RPC server error: {}", e);
            }
        });

        let server = RpcServer { addr, shutdown_tx };
        Ok((server, addr.port()))
    }

    /// Get the bound port
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Shutdown the RPC server
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        info!("RPC server shutting down");
    }
}

fn router(state: RpcState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/votes", post(cast_vote).get(get_transcripts))
        .route("/votes/count/:candidate_id", get(get_vote_count))
        .route("/chain", get(get_chain))
        .route("/chain/valid", get(get_chain_valid))
        .route("/elections", post(create_election).get(list_elections))
        .route("/elections/:id", get(get_election))
        .route("/elections/:id/start", put(start_election))
        .route("/elections/:id/end", put(end_election))
        .route(
            "/elections/:id/candidates",
            post(add_candidate).get(list_candidates),
        )
        .route("/voters", post(register_voter))
        .route("/voters/:id", get(get_voter))
        .route("/voters/:id/verify", put(verify_voter))
        .with_state(state)
}

#[derive(Clone)]
struct RpcState {
    services: Arc<NodeServices>,
}

/// Request/Response types
#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub blocks: usize,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}

#[derive(Serialize, Deserialize)]
pub struct ValidResponse {
    pub valid: bool,
}

#[derive(Serialize, Deserialize)]
pub struct CreateElectionRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Serialize, Deserialize)]
pub struct AddCandidateRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Serialize, Deserialize)]
pub struct RegisterVoterRequest {
    pub name: String,
    pub email: String,
    pub public_key: String,
}

/// Handlers
async fn health_check(State(state): State<RpcState>) -> Result<Json<HealthResponse>, StatusCode> {
    let blocks = state
        .services
        .chain_length()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        blocks,
    }))
}

async fn cast_vote(State(state): State<RpcState>, Json(vote): Json<Vote>) -> Response {
    // Admission blocks on proof-of-work; keep it off the async runtime.
    let services = state.services.clone();
    let outcome = tokio::task::spawn_blocking(move || services.voting.cast_vote(vote)).await;

    match outcome {
        Ok(Ok(AdmissionOutcome::Admitted(vote))) => {
            (StatusCode::CREATED, Json(vote)).into_response()
        }
        Ok(Ok(AdmissionOutcome::Rejected(reason))) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: reason.to_string(),
            }),
        )
            .into_response(),
        Ok(Err(e)) => {
            error!("Vote admission failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!("Vote admission task panicked: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn get_transcripts(
    State(state): State<RpcState>,
) -> Result<Json<Vec<String>>, StatusCode> {
    let transcripts = state
        .services
        .voting
        .ledger_transcripts()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(transcripts))
}

async fn get_vote_count(
    Path(candidate_id): Path<String>,
    State(state): State<RpcState>,
) -> Result<Json<CountResponse>, StatusCode> {
    let count = state
        .services
        .voting
        .vote_count_for_candidate(&candidate_id)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(CountResponse { count }))
}

async fn get_chain(State(state): State<RpcState>) -> Result<Json<Vec<Block>>, StatusCode> {
    let chain = state
        .services
        .voting
        .chain_snapshot()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(chain))
}

async fn get_chain_valid(
    State(state): State<RpcState>,
) -> Result<Json<ValidResponse>, StatusCode> {
    let valid = state
        .services
        .voting
        .is_ledger_valid()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(ValidResponse { valid }))
}

async fn create_election(
    State(state): State<RpcState>,
    Json(req): Json<CreateElectionRequest>,
) -> Result<(StatusCode, Json<Election>), StatusCode> {
    let election = state
        .services
        .election_service
        .create_election(req.title, req.description)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok((StatusCode::CREATED, Json(election)))
}

async fn list_elections(
    State(state): State<RpcState>,
) -> Result<Json<Vec<Election>>, StatusCode> {
    let elections = state
        .services
        .election_service
        .all_elections()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(elections))
}

async fn get_election(
    Path(id): Path<String>,
    State(state): State<RpcState>,
) -> Result<Json<Election>, StatusCode> {
    let election = state
        .services
        .election_service
        .election_by_id(&id)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(election))
}

async fn start_election(
    Path(id): Path<String>,
    State(state): State<RpcState>,
) -> Result<Json<Election>, StatusCode> {
    let election = state
        .services
        .election_service
        .start_election(&id)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(election))
}

async fn end_election(
    Path(id): Path<String>,
    State(state): State<RpcState>,
) -> Result<Json<Election>, StatusCode> {
    let election = state
        .services
        .election_service
        .end_election(&id)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(election))
}

async fn add_candidate(
    Path(id): Path<String>,
    State(state): State<RpcState>,
    Json(req): Json<AddCandidateRequest>,
) -> Result<(StatusCode, Json<Candidate>), StatusCode> {
    let candidate = state
        .services
        .election_service
        .add_candidate(&id, req.name, req.description)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

async fn list_candidates(
    Path(id): Path<String>,
    State(state): State<RpcState>,
) -> Result<Json<Vec<Candidate>>, StatusCode> {
    let candidates = state
        .services
        .election_service
        .candidates_for(&id)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(candidates))
}

async fn register_voter(
    State(state): State<RpcState>,
    Json(req): Json<RegisterVoterRequest>,
) -> Result<(StatusCode, Json<Voter>), StatusCode> {
    let voter = Voter::new(
        Uuid::new_v4().to_string(),
        req.name,
        req.email,
        req.public_key,
    );
    state
        .services
        .voters
        .save(&voter)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    info!(voter = %voter.id, "voter registered");
    Ok((StatusCode::CREATED, Json(voter)))
}

async fn get_voter(
    Path(id): Path<String>,
    State(state): State<RpcState>,
) -> Result<Json<Voter>, StatusCode> {
    let voter = state
        .services
        .voters
        .find_by_id(&id)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(voter))
}

async fn verify_voter(
    Path(id): Path<String>,
    State(state): State<RpcState>,
) -> Result<Json<Voter>, StatusCode> {
    let mut voter = state
        .services
        .voters
        .find_by_id(&id)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;

    voter.verified = true;
    state
        .services
        .voters
        .save(&voter)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    info!(voter = %voter.id, "voter verified");
    Ok(Json(voter))
}
