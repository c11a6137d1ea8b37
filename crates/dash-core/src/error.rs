//! Error types returned by host capabilities.

use thiserror::Error;

/// Failure reported by a durable key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage read failed: {0}")]
    Read(String),

    #[error("storage write failed: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Failure reported by an audio backend while building or scheduling nodes.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("{node} creation failed: {reason}")]
    NodeCreation { node: &'static str, reason: String },

    #[error("scheduling failed: {0}")]
    Schedule(String),

    #[error("unknown loop handle {0}")]
    UnknownLoop(u32),
}
