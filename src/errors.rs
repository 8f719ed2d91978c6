use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to load one of the word lists at startup.
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A stored team record that cannot be brought up to the current schema.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("stored game state has an unexpected shape: {0}")]
    Shape(#[from] serde_json::Error),
    #[error("stored game state references unknown rule index {0}")]
    UnknownRule(String),
}

/// Something that should never happen while applying a move
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("coin balance overflow ({balance} + {reward})")]
    CoinOverflow { balance: u32, reward: u32 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("spoiler file {} is empty", .path.display())]
    EmptySpoiler { path: PathBuf },
    #[error("seed file {} is not a JSON object of team records: {source}", .path.display())]
    Seed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
