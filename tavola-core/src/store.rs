//! The store gateway: the only component that talks to persistent storage.
//!
//! [`StoreGateway`] wraps a shared [`StoreBackend`] handle and adds the behavior the
//! routes rely on: identifier stringification, insert timestamps, and the seeding
//! protocol for demo collections.
//!
//! # Example
//!
//! ```ignore
//! use tavola_core::{store::StoreGateway, model::{MenuItem, sample_menu}};
//!
//! let gateway = StoreGateway::new(backend);
//! let menu = gateway.typed_collection::<MenuItem>().ensure_seeded(&sample_menu()).await?;
//! ```

use bson::{DateTime, Document};
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    backend::StoreBackend,
    collection::{Collection, TypedCollection},
    document::Entity,
    error::StoreResult,
    serialize::identifier_to_string,
};

/// Set on every inserted document that does not already carry it.
pub const CREATED_AT_FIELD: &str = "created_at";
/// Set on every inserted document that does not already carry it.
pub const UPDATED_AT_FIELD: &str = "updated_at";

/// Process-wide handle to the document store.
///
/// Cloning is cheap: clones share the same backend. The handle is created once at
/// startup and never reconfigured.
#[derive(Debug, Clone)]
pub struct StoreGateway {
    backend: Arc<dyn StoreBackend>,
}

impl StoreGateway {
    /// Creates a gateway owning the given backend.
    pub fn new<B: StoreBackend + 'static>(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Gets an untyped collection with the given name.
    pub fn collection(&self, name: &str) -> Collection<'_> {
        Collection::new(name.to_string(), self)
    }

    /// Gets a typed collection for the specified entity type.
    ///
    /// The collection name comes from the entity's
    /// [`CollectionKind`](crate::document::CollectionKind).
    pub fn typed_collection<E: Entity>(&self) -> TypedCollection<'_, E> {
        TypedCollection::new(self.collection(E::collection_name()))
    }

    /// Inserts `document` into the named collection and returns the new identifier.
    ///
    /// `created_at` and `updated_at` are stamped with the current time unless the
    /// document already has them.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](crate::error::StoreError) if the store is unreachable or
    /// the write fails.
    pub async fn insert(&self, collection: &str, mut document: Document) -> StoreResult<String> {
        let now = DateTime::now();
        for field in [CREATED_AT_FIELD, UPDATED_AT_FIELD] {
            if !document.contains_key(field) {
                document.insert(field, now);
            }
        }

        let id = self
            .backend
            .insert_document(document, collection)
            .await?;
        let id = identifier_to_string(&id);

        debug!(collection, id = %id, "inserted document");

        Ok(id)
    }

    /// Returns every document in the named collection in store-native order.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](crate::error::StoreError) on connectivity failure.
    pub async fn list_all(&self, collection: &str) -> StoreResult<Vec<Document>> {
        self.backend.find_documents(collection).await
    }

    /// Get-or-populate for demo collections.
    ///
    /// Reads the collection; if and only if it is empty, inserts every sample in order
    /// and reads the collection again. A non-empty collection is returned as-is.
    ///
    /// This is not atomic. Two callers that both observe an empty collection will both
    /// insert the sample set.
    ///
    /// # Errors
    ///
    /// Stops at the first failing read or insert. Samples inserted before the failure
    /// stay in the store.
    pub async fn ensure_seeded(
        &self,
        collection: &str,
        samples: Vec<Document>,
    ) -> StoreResult<Vec<Document>> {
        let existing = self.list_all(collection).await?;
        if !existing.is_empty() {
            return Ok(existing);
        }

        info!(collection, count = samples.len(), "collection is empty, seeding sample documents");

        for sample in samples {
            self.insert(collection, sample).await?;
        }

        self.list_all(collection).await
    }

    /// Lists the names of all collections in the store.
    pub async fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        self.backend.list_collections().await
    }

    /// Releases backend resources. Called once when the server stops.
    pub async fn shutdown(&self) -> StoreResult<()> {
        self.backend.shutdown().await
    }
}
