//! Concurrent record store for a small marketplace.
//!
//! This crate is the primary entry point for users of bazaar. It re-exports the
//! core types from `bazaar-core` and the in-memory backend from
//! `bazaar-memory`.
//!
//! # Features
//!
//! - **Typed records** - Users, listings and orders with per-collection identifier types
//! - **One store contract** - [`RecordStore`](backend::RecordStore) covers records and password hashes alike
//! - **Filtered queries** - Listing search and paginated order listings
//! - **Marketplace flows** - Order pricing, status changes and cancellation via [`Marketplace`](store::Marketplace)
//!
//! # Quick Start
//!
//! ```ignore
//! use bazaar::{prelude::*, memory::InMemoryStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let market = Marketplace::new(InMemoryStore::new());
//!
//!     let buyer = market
//!         .register_user("alice", "a@x.com", "argon2:...")
//!         .await
//!         .unwrap();
//!
//!     let listing = market
//!         .list_item(Listing::new(buyer.id, "Phone", "Unlocked", Decimal::from(100)))
//!         .await
//!         .unwrap();
//!
//!     let order = market
//!         .place_order(buyer.id, listing.id, 3, ShippingAddress::default(), None)
//!         .await
//!         .unwrap();
//!     assert_eq!(order.total_price, Decimal::from(300));
//!
//!     let order = market
//!         .update_order_status(order.id, OrderStatus::Shipped)
//!         .await
//!         .unwrap();
//!     assert_eq!(order.total_price, Decimal::from(300));
//! }
//! ```
//!
//! # Sharing a store
//!
//! Construct one store at startup and hand clones (or an `Arc<dyn RecordStore>`)
//! to every handler. Tests build their own isolated stores.
//!
//! ```ignore
//! use std::sync::Arc;
//! use bazaar::{prelude::*, memory::InMemoryStore};
//!
//! let shared: Arc<dyn RecordStore> = Arc::new(InMemoryStore::new());
//! let market = Marketplace::new(shared.clone());
//! ```
//!
//! # Backends
//!
//! - [`memory`] - In-memory storage

pub mod prelude;

pub use bazaar_core::{backend, error, id, model, page, query, record, store};

// Re-export types that appear in record fields and trait signatures
pub use async_trait::async_trait;
pub use chrono;
pub use rust_decimal;

/// In-memory storage backend implementations.
pub mod memory {
    pub use bazaar_memory::{InMemoryStore, InMemoryStoreBuilder};
}
