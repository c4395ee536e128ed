//! Error types for the POS engine.

use crate::{Collection, RecordId};
use thiserror::Error;

/// All possible errors from the POS engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("record not found in {collection}: {id}")]
    RecordNotFound {
        collection: Collection,
        id: RecordId,
    },

    #[error("record id space exhausted")]
    IdExhausted,

    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

impl Error {
    /// Whether the error means the addressed record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::RecordNotFound { .. })
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
