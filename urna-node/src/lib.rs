pub mod config;
pub mod error;
pub mod rpc;
pub mod services;

pub use config::{ConfigError, NodeConfig};
pub use error::NodeError;
pub use rpc::{
    AddCandidateRequest, CountResponse, CreateElectionRequest, ErrorResponse, HealthResponse,
    RegisterVoterRequest, RpcServer, ValidResponse,
};
pub use services::NodeServices;
