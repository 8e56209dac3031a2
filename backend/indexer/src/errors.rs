//! Indexer error types.
//!
//! Transport and payload failures are kept apart: transport errors are
//! retried by the RPC layer, payload errors mean the contract emitted
//! something we cannot interpret and are surfaced immediately.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("payload error: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("rpc error: {0}")]
    Rpc(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, IndexerError>;
