use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use urna_ledger::DEFAULT_DIFFICULTY;

/// Urna election ledger node configuration
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "urna-node")]
#[command(about = "Urna election ledger node")]
#[command(version)]
pub struct NodeConfig {
    /// Leading zero hex characters required of every mined block hash
    #[arg(long, default_value = "4")]
    pub difficulty: usize,

    /// Database path
    #[arg(long, default_value = "./data")]
    pub db_path: PathBuf,

    /// RPC server port (0 = auto-assign)
    #[arg(long, default_value = "0")]
    pub rpc_port: u16,

    /// Log level
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl NodeConfig {
    /// Create a configuration rooted at `db_path`.
    pub fn new(db_path: impl Into<PathBuf>, difficulty: usize) -> Self {
        Self {
            difficulty,
            db_path: db_path.into(),
            rpc_port: 0,
            log_level: "info".to_string(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        // A 64-hex-character digest can never carry more zeros than that.
        if self.difficulty > 64 {
            return Err(ConfigError::InvalidDifficulty(self.difficulty));
        }

        if self.difficulty > 6 {
            eprintln!(
                "Warning: difficulty {} makes mining very slow (expected ~16^{} digests per block)",
                self.difficulty, self.difficulty
            );
        }

        Ok(())
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            db_path: PathBuf::from("./data"),
            rpc_port: 0,
            log_level: "info".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("difficulty {0} exceeds the 64 hex characters of a digest")]
    InvalidDifficulty(usize),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_config() {
        let config = NodeConfig::new("/tmp/urna", 2);
        assert_eq!(config.difficulty, 2);
        assert_eq!(config.db_path, PathBuf::from("/tmp/urna"));
        assert_eq!(config.rpc_port, 0);
    }

    #[test]
    fn test_default_config() {
        let config = NodeConfig::default();
        assert_eq!(config.difficulty, DEFAULT_DIFFICULTY);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_validate_ok() {
        assert!(NodeConfig::new("/tmp/urna", 4).validate().is_ok());
        assert!(NodeConfig::new("/tmp/urna", 0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_impossible_difficulty() {
        let config = NodeConfig::new("/tmp/urna", 65);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDifficulty(65))
        ));
    }
}
