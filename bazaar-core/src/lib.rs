//! Core types and traits for the bazaar marketplace record store.
//!
//! This crate defines everything a store backend and its callers share:
//!
//! - **Records** ([`record`], [`model`]) - Users, listings and orders, and the trait stores use to stamp them
//! - **Identifiers** ([`id`]) - One `i32` newtype per collection
//! - **Store backend abstraction** ([`backend`]) - The [`RecordStore`](backend::RecordStore) operation set
//! - **Queries** ([`query`]) - Listing search and order filter parameters
//! - **Pagination** ([`page`]) - Page selection and page results
//! - **Marketplace flows** ([`store`]) - Read-merge-write operations built on a store
//! - **Error handling** ([`error`]) - The failure taxonomy shared by every backend
//!
//! # Example
//!
//! ```ignore
//! use bazaar::prelude::*;
//!
//! async fn signup(store: &impl RecordStore) -> StoreResult<User> {
//!     let user = store.create_user(User::new("alice", "a@x.com")).await?;
//!     store.set_user_password(user.id, "argon2:...".to_string()).await?;
//!     Ok(user)
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as bazaar_core;

pub mod backend;
pub mod error;
pub mod id;
pub mod model;
pub mod page;
pub mod query;
pub mod record;
pub mod store;
