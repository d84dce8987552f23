//! Conversion of stored documents into their transport form.
//!
//! Backends hand documents back with the store-internal `_id` key and native BSON
//! date-times. Clients see a string `id` and ISO-8601 strings instead.

use bson::{Bson, DateTime, Document};
use chrono::SecondsFormat;

/// Key under which the store keeps a document's identifier.
pub const INTERNAL_ID_FIELD: &str = "_id";
/// Key under which the identifier is exposed to clients.
pub const ID_FIELD: &str = "id";

/// Renders a store identifier in its canonical string form.
///
/// Object ids become their 24-character hex form, strings are returned as-is and
/// integers are printed in decimal. Any other identifier type uses its display form.
pub fn identifier_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        Bson::Int32(n) => n.to_string(),
        Bson::Int64(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Renders a BSON date-time as an RFC 3339 string in UTC with millisecond precision.
pub fn timestamp_to_string(timestamp: &DateTime) -> String {
    timestamp
        .to_chrono()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn transport_value(value: Bson) -> Bson {
    match value {
        Bson::DateTime(timestamp) => Bson::String(timestamp_to_string(&timestamp)),
        other => other,
    }
}

/// Maps a stored document to its transport form.
///
/// An empty document is returned unchanged. Otherwise `_id` is replaced by `id` (as a
/// string) and every top-level date-time becomes an ISO-8601 string. Every other value
/// passes through untouched. Applying this to its own output changes nothing.
pub fn serialize_document(mut document: Document) -> Document {
    if document.is_empty() {
        return document;
    }

    let internal_id = document.remove(INTERNAL_ID_FIELD);
    let mut serialized = Document::new();

    if let Some(id) = &internal_id {
        serialized.insert(ID_FIELD, identifier_to_string(id));
    }

    for (key, value) in document {
        // `_id` wins over a stored `id` field
        if internal_id.is_some() && key == ID_FIELD {
            continue;
        }
        serialized.insert(key, transport_value(value));
    }

    serialized
}

/// Like [`serialize_document`], passing `None` through.
pub fn serialize_optional(document: Option<Document>) -> Option<Document> {
    document.map(serialize_document)
}
