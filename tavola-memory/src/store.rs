//! In-memory storage implementation.
//!
//! Documents are kept per collection in insertion order behind an async-safe
//! read-write lock.

use async_trait::async_trait;
use bson::{Bson, Document, oid::ObjectId};
use mea::rwlock::RwLock;
use std::{collections::HashMap, sync::Arc};

use tavola_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    error::{StoreError, StoreResult},
    serialize::{INTERNAL_ID_FIELD, identifier_to_string},
};

type StoreMap = HashMap<String, Vec<Document>>;

/// Thread-safe in-memory document storage backend.
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state. Clones share
/// the same underlying data.
///
/// Listing scans the whole collection, which is fine for demo-sized data.
///
/// # Example
///
/// ```ignore
/// use tavola_memory::InMemoryStore;
/// use tavola_core::backend::StoreBackend;
/// use bson::doc;
///
/// let store = InMemoryStore::new();
/// let id = store.insert_document(doc! { "name": "Alice" }, "contactmessage").await?;
/// assert_eq!(store.find_documents("contactmessage").await?.len(), 1);
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    /// collection_name -> documents in insertion order
    store: Arc<RwLock<StoreMap>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory document store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
        }
    }

    /// Creates a builder for constructing an `InMemoryStore`.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }
}

#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn insert_document(&self, document: Document, collection: &str) -> StoreResult<Bson> {
        let mut store = self.store.write().await;
        let documents = store
            .entry(collection.to_string())
            .or_default();

        let id = document
            .get(INTERNAL_ID_FIELD)
            .cloned()
            .unwrap_or_else(|| Bson::ObjectId(ObjectId::new()));

        if documents
            .iter()
            .any(|existing| existing.get(INTERNAL_ID_FIELD) == Some(&id))
        {
            return Err(StoreError::DocumentAlreadyExists(
                identifier_to_string(&id),
                collection.to_string(),
            ));
        }

        // `_id` leads, as it does in MongoDB
        let mut stored = Document::new();
        stored.insert(INTERNAL_ID_FIELD, id.clone());
        for (key, value) in document {
            if key != INTERNAL_ID_FIELD {
                stored.insert(key, value);
            }
        }
        documents.push(stored);

        Ok(id)
    }

    async fn find_documents(&self, collection: &str) -> StoreResult<Vec<Document>> {
        Ok(
            self.store
                .read()
                .await
                .get(collection)
                .cloned()
                .unwrap_or_default()
        )
    }

    async fn list_collections(&self) -> StoreResult<Vec<String>> {
        let mut names: Vec<String> = self
            .store
            .read()
            .await
            .keys()
            .cloned()
            .collect();
        names.sort();

        Ok(names)
    }
}

/// Builder for constructing [`InMemoryStore`] instances.
#[derive(Default)]
pub struct InMemoryStoreBuilder;

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Always succeeds with a freshly initialized store.
    async fn build(self) -> StoreResult<Self::Backend> {
        Ok(InMemoryStore::new())
    }
}
