//! MongoDB backend implementation for tavola.
//!
//! This crate provides a MongoDB-based implementation of the `StoreBackend` trait. The
//! server enables it through its `mongodb` feature (on by default) and selects it when
//! `DATABASE_URL` holds a MongoDB connection string.
//!
//! # Connection
//!
//! The driver connects lazily: building the store only parses the connection string, so
//! an unreachable server surfaces on the first read or write.
//!
//! # Example
//!
//! ```ignore
//! use tavola_core::backend::StoreBackendBuilder;
//! use tavola_mongodb::MongoDbStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MongoDbStore::builder("mongodb://localhost:27017", "restaurant")
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as tavola_mongodb;

pub mod store;

pub use store::{MongoDbStore, MongoDbStoreBuilder};
