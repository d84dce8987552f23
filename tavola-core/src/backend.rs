//! Storage backend abstraction for the store gateway.
//!
//! The [`StoreBackend`] trait is the whole contract the service needs from a document
//! store: insert one document into a named collection, read a collection back in full,
//! and list collection names. Implementations must be thread-safe (`Send + Sync`), since
//! one handle serves every request.
//!
//! # Examples
//!
//! ```ignore
//! use tavola_core::backend::StoreBackend;
//! use bson::doc;
//!
//! let backend = MyBackendImpl::new();
//!
//! let id = backend.insert_document(doc! { "name": "Alice" }, "contactmessage").await?;
//! let all = backend.find_documents("contactmessage").await?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use async_trait::async_trait;
use bson::{Bson, Document};
use std::fmt::Debug;

use crate::error::StoreResult;

/// Abstract interface for document storage backends.
///
/// # Error Handling
///
/// Every operation is a single attempt. Connectivity and driver failures are reported
/// as [`StoreError::Backend`](crate::error::StoreError::Backend); nothing is retried.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Inserts a single document into a collection.
    ///
    /// If the document carries no `_id`, the backend assigns one. The collection is
    /// created on first insert.
    ///
    /// # Returns
    ///
    /// The identifier the document was stored under.
    async fn insert_document(&self, document: Document, collection: &str) -> StoreResult<Bson>;

    /// Returns every document in a collection, `_id` included.
    ///
    /// Order is whatever the backend returns natively. A collection that does not exist
    /// yields an empty vector.
    async fn find_documents(&self, collection: &str) -> StoreResult<Vec<Document>>;

    /// Lists the names of all collections in the store.
    async fn list_collections(&self) -> StoreResult<Vec<String>>;

    /// Releases connections and other resources held by the backend.
    ///
    /// The default implementation is a no-op.
    async fn shutdown(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Factory trait for creating backend instances.
#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> StoreResult<Self::Backend>;
}
