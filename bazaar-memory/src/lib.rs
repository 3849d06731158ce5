//! In-memory record store backend for bazaar.
//!
//! This crate provides a thread-safe, in-memory implementation of the
//! `RecordStore` trait. It keeps users, listings and orders in ordered maps
//! behind a single async-aware read-write lock.
//!
//! # Features
//!
//! - **Linearizable operations** - Every read and write runs entirely under the lock
//! - **Monotonic identifiers** - Per-collection counters that never hand out an id twice
//! - **Deterministic iteration** - Queries return records in ascending identifier order
//! - **Password side channel** - Password hashes stored apart from user records
//!
//! # Quick Start
//!
//! ```ignore
//! use bazaar::{prelude::*, memory::InMemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = InMemoryStore::builder().build().await?;
//!
//!     let seller = store.create_user(User::new("sam", "sam@x.com")).await?;
//!     let listing = store
//!         .create_listing(Listing::new(seller.id, "Phone", "Unlocked", Decimal::from(199)))
//!         .await?;
//!
//!     let hits = store
//!         .list_listings(&ListingQuery::builder().search("phone").build())
//!         .await?;
//!     assert_eq!(hits, vec![listing]);
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as bazaar_memory;

mod collection;
mod evaluator;
pub mod store;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
