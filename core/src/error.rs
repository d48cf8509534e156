//! Error types for the request orchestrator.
//!
//! # Design
//! Transport and parse failures keep the underlying error as their `source()`
//! so callers can tell a refused connection from a timeout by downcasting.
//! The orchestrator itself only produces `Config`, `Transport`, `Parse` and
//! `Serialization`; the last two variants belong to the capability layer.

use std::error::Error as StdError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Neither the descriptor nor the configuration supplies a base URL.
    #[error("configuration error: {0}")]
    Config(String),

    /// The round trip did not complete (connect, DNS, I/O, body read).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The response body is not valid JSON for the expected type.
    #[error("parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// The request body could not be serialized to JSON.
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("unexpected status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("response is missing field `{0}`")]
    MissingField(String),
}

impl FetchError {
    pub fn transport(cause: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        FetchError::Transport(cause.into())
    }
}
