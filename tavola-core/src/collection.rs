//! Collection handles bound to a [`StoreGateway`].
//!
//! - [`Collection`] - untyped collection working on raw BSON documents
//! - [`TypedCollection`] - collection for one [`Entity`] type, named by its kind
//!
//! # Example
//!
//! ```ignore
//! let reservations = gateway.typed_collection::<Reservation>();
//! let id = reservations.insert(&reservation).await?;
//! ```

use bson::Document;
use std::marker::PhantomData;

use crate::{
    document::{Entity, EntityExt},
    error::{StoreError, StoreResult},
    store::StoreGateway,
};

/// An untyped collection.
#[derive(Debug)]
pub struct Collection<'a> {
    name: String,
    gateway: &'a StoreGateway,
}

impl<'a> Collection<'a> {
    pub(crate) fn new(name: String, gateway: &'a StoreGateway) -> Self {
        Self { name, gateway }
    }

    /// Inserts a document and returns its new identifier as a string.
    pub async fn insert(&self, document: Document) -> StoreResult<String> {
        self.gateway
            .insert(&self.name, document)
            .await
    }

    /// Seeds the collection with `samples` if it is empty. See
    /// [`StoreGateway::ensure_seeded`].
    pub async fn ensure_seeded(&self, samples: Vec<Document>) -> StoreResult<Vec<Document>> {
        self.gateway
            .ensure_seeded(&self.name, samples)
            .await
    }
}

/// A collection holding documents of entity type `E`.
#[derive(Debug)]
pub struct TypedCollection<'a, E: Entity> {
    inner: Collection<'a>,
    _marker: PhantomData<E>,
}

impl<'a, E: Entity> TypedCollection<'a, E> {
    pub(crate) fn new(inner: Collection<'a>) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }

    /// Converts an entity for writing, after [`Entity::check`] has passed.
    fn checked_document(entity: &E) -> StoreResult<Document> {
        entity
            .check()
            .map_err(|source| StoreError::InvalidDocument {
                collection: E::collection_name().to_string(),
                source,
            })?;

        entity.to_document()
    }

    /// Inserts an entity and returns its new identifier as a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity violates its invariants, cannot be converted to
    /// BSON, or the write fails.
    pub async fn insert(&self, entity: &E) -> StoreResult<String> {
        self.inner
            .insert(Self::checked_document(entity)?)
            .await
    }

    /// Seeds the collection with `samples` if it is empty and returns its documents.
    ///
    /// Every sample is checked before anything is read or written, so an invalid sample
    /// set never reaches the store.
    pub async fn ensure_seeded(&self, samples: &[E]) -> StoreResult<Vec<Document>> {
        let samples = samples
            .iter()
            .map(Self::checked_document)
            .collect::<StoreResult<Vec<Document>>>()?;

        self.inner.ensure_seeded(samples).await
    }
}
