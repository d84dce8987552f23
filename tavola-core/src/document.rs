//! Entity traits and the entity-to-collection mapping.
//!
//! Every entity stored by the service belongs to exactly one [`CollectionKind`]. The
//! mapping from kind to collection name is an explicit table, so renaming a struct never
//! moves its data.

use bson::{Document, de::deserialize_from_document, ser::serialize_to_document};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt;

use crate::{error::StoreResult, validate::ValidationError};

/// The collections this service writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    MenuItem,
    Reservation,
    ContactMessage,
}

impl CollectionKind {
    /// Returns the name of the backing collection.
    pub const fn collection_name(self) -> &'static str {
        match self {
            CollectionKind::MenuItem => "menuitem",
            CollectionKind::Reservation => "reservation",
            CollectionKind::ContactMessage => "contactmessage",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection_name())
    }
}

/// Core trait that all entities persisted through the gateway implement.
///
/// The store assigns identifiers, so an entity carries only its own fields.
///
/// # Example
///
/// ```ignore
/// use tavola_core::document::{CollectionKind, Entity};
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct ContactMessage {
///     pub name: String,
///     pub email: String,
///     pub message: String,
/// }
///
/// impl Entity for ContactMessage {
///     const KIND: CollectionKind = CollectionKind::ContactMessage;
/// }
/// ```
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + Clone + 'static {
    /// The collection this entity is stored in.
    const KIND: CollectionKind;

    /// Returns the name of the collection this entity belongs to.
    fn collection_name() -> &'static str {
        Self::KIND.collection_name()
    }

    /// Checks the invariants that must hold before the entity is written.
    ///
    /// # Errors
    ///
    /// Returns every violated constraint as a [`ValidationError`].
    fn check(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Extension trait converting entities to and from BSON documents.
///
/// Automatically implemented for every [`Entity`].
pub trait EntityExt: Entity {
    /// Converts this entity into a BSON document ready for insertion.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn to_document(&self) -> StoreResult<Document>;

    /// Rebuilds an entity from a stored document. Extra fields such as `_id` or
    /// timestamps are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing or has the wrong type.
    fn from_document(document: Document) -> StoreResult<Self>;
}

impl<E: Entity> EntityExt for E {
    fn to_document(&self) -> StoreResult<Document> {
        Ok(serialize_to_document(self)?)
    }

    fn from_document(document: Document) -> StoreResult<Self> {
        Ok(deserialize_from_document(document)?)
    }
}
