//! Core of the tavola restaurant backend.
//!
//! This crate provides:
//!
//! - **Entities** ([`document`], [`model`]) - menu items, reservations, contact messages
//!   and the fixed entity-to-collection table
//! - **Validation** ([`validate`]) - field-level checks on creation requests
//! - **Serialization** ([`serialize`]) - stored documents to their transport form
//! - **Store backend abstraction** ([`backend`]) - the contract a document store fulfils
//! - **Store gateway** ([`store`], [`collection`]) - inserts, listings and demo seeding
//! - **Error handling** ([`error`]) - storage error and result types
//!
//! # Example
//!
//! ```ignore
//! use tavola_core::{model::Reservation, store::StoreGateway, validate::Validate};
//!
//! let reservation = request_body.validate()?;
//! let id = gateway
//!     .typed_collection::<Reservation>()
//!     .insert(&reservation)
//!     .await?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as tavola_core;

pub mod backend;
pub mod collection;
pub mod document;
pub mod error;
pub mod model;
pub mod serialize;
pub mod store;
pub mod validate;
