use std::io;

use uuid::Uuid;

/// Failures surfaced by the record store and the services over it.
///
/// Every operation resolves to one of three kinds: an unknown identifier,
/// a rejected form input, or the store itself failing. Callers display the
/// message as a one-line notice and move on; there are no retries.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{what} {id} not found")]
    NotFound { what: &'static str, id: Uuid },

    #[error("{0}")]
    Validation(String),

    #[error("store operation rejected: {source}")]
    Rejected {
        #[from]
        source: io::Error,
    },
}

impl StoreError {
    pub fn not_found(what: &'static str, id: Uuid) -> Self {
        StoreError::NotFound { what, id }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        StoreError::Validation(msg.into())
    }

    pub fn rejected(msg: impl Into<String>) -> Self {
        StoreError::Rejected {
            source: io::Error::other(msg.into()),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Rejected {
            source: io::Error::other(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
