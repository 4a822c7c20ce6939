use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use urna_election::model::Vote;
use urna_node::{NodeConfig, NodeServices, RpcServer};

#[derive(Parser)]
#[command(name = "urna-node")]
#[command(about = "Urna election ledger node")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Leading zero hex characters required of every mined block hash
    #[arg(long, global = true, default_value = "4")]
    difficulty: usize,

    /// Database path
    #[arg(long, global = true, default_value = "./data")]
    db_path: PathBuf,

    /// RPC server port (0 = auto-assign)
    #[arg(long, global = true, default_value = "0")]
    rpc_port: u16,

    /// Log level
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the node (default command)
    Run,
    /// Generate an RSA keypair for voter enrollment
    Keygen,
    /// Sign a vote and print the ready-to-post request body
    Sign {
        /// Voter id as returned at registration
        #[arg(long)]
        voter_id: String,
        /// Candidate id
        #[arg(long)]
        candidate_id: String,
        /// Election id
        #[arg(long)]
        election_id: String,
        /// Base64 PKCS#8 private key produced by `keygen`
        #[arg(long)]
        private_key: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = match cli.log_level.as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(true)
        .compact()
        .init();

    match cli.command {
        Some(Commands::Keygen) => keygen(),
        Some(Commands::Sign {
            voter_id,
            candidate_id,
            election_id,
            private_key,
        }) => sign_vote(voter_id, candidate_id, election_id, &private_key),
        _ => run_node(cli).await,
    }
}

async fn run_node(cli: Cli) -> anyhow::Result<()> {
    let config = NodeConfig {
        difficulty: cli.difficulty,
        db_path: cli.db_path,
        rpc_port: cli.rpc_port,
        log_level: cli.log_level,
    };

    info!("Starting Urna election ledger node...");
    info!("Database path: {:?}", config.db_path);
    info!("Mining difficulty: {}", config.difficulty);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    let services = match NodeServices::new(&config) {
        Ok(services) => Arc::new(services),
        Err(e) => {
            error!("Failed to initialize services: {}", e);
            std::process::exit(1);
        }
    };

    let (server, port) = RpcServer::start(services, config.rpc_port).await?;
    info!("RPC server listening on port {}", port);

    tokio::signal::ctrl_c().await?;

    server.shutdown().await;
    info!("Urna node stopped");
    Ok(())
}

fn keygen() -> anyhow::Result<()> {
    let keypair = urna_crypto::generate_keypair()?;

    println!(
        "Public key:  {}",
        urna_crypto::encode_public_key(&keypair.public_key)?
    );
    println!(
        "Private key: {}",
        urna_crypto::encode_private_key(&keypair.private_key)?
    );
    Ok(())
}

fn sign_vote(
    voter_id: String,
    candidate_id: String,
    election_id: String,
    private_key: &str,
) -> anyhow::Result<()> {
    let key = urna_crypto::decode_private_key(private_key)?;

    let mut vote = Vote::new(voter_id, candidate_id, election_id);
    vote.signature = urna_crypto::sign(&vote.transcript(), &key)?;

    // The timestamp is part of the signed transcript, so the printed body
    // must be posted as-is.
    println!("{}", serde_json::to_string_pretty(&vote)?);
    Ok(())
}
