//! Error types and result types for store operations.
//!
//! Use [`StoreResult<T>`] as the return type for fallible gateway and backend operations.
//! Request validation failures live in [`crate::validate`] and never reach a backend.

use bson::error::Error as BsonError;
use thiserror::Error;

use crate::validate::ValidationError;

/// Represents all possible errors that can occur when talking to the document store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No store handle was configured at startup.
    #[error(
        "Database not available. Check DATABASE_URL and DATABASE_NAME environment variables"
    )]
    Unavailable,
    /// Error during store initialization or connection setup.
    #[error("Initialization error: {0}")]
    Initialization(String),
    /// Conversion between an entity and its BSON document failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// A document with the given identifier already exists in the collection.
    /// The first argument is the identifier, the second is the collection name.
    #[error("Document {0} already exists in collection {1}")]
    DocumentAlreadyExists(String, String),
    /// An entity violated its invariants and was not written.
    #[error("Invalid {collection} document: {source}")]
    InvalidDocument {
        collection: String,
        source: ValidationError,
    },
    /// An error occurred in the underlying storage backend.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// A specialized `Result` type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<BsonError> for StoreError {
    fn from(err: BsonError) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
