//! In-memory document storage backend for tavola.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StoreBackend`
//! trait. It uses async-aware read-write locks for concurrent access and backs local
//! development (`DATABASE_URL=memory://`) and the test suites.
//!
//! # Features
//!
//! - **Thread-safe access** - Concurrent reads and writes using async-aware RwLock
//! - **Insertion order** - Collections are read back in the order documents were inserted
//! - **Store-assigned ids** - Documents without `_id` get a fresh ObjectId
//!
//! # Quick Start
//!
//! ```ignore
//! use tavola_core::{backend::StoreBackendBuilder, store::StoreGateway};
//! use tavola_memory::InMemoryStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let gateway = StoreGateway::new(InMemoryStore::builder().build().await.unwrap());
//!     let id = gateway.insert("contactmessage", bson::doc! { "name": "Grace" }).await.unwrap();
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as tavola_memory;

pub mod store;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
