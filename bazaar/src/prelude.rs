//! Convenient re-exports of commonly used types from bazaar.
//!
//! ```ignore
//! use bazaar::prelude::*;
//! ```
//!
//! This provides access to:
//! - Records, identifiers and the record traits
//! - The store contract and builders
//! - Query, pagination and error types
//! - The marketplace facade

pub use bazaar_core::{
    backend::{RecordStore, RecordStoreBuilder},
    error::{StoreError, StoreResult},
    id::{ListingId, OrderId, RecordId, UserId},
    model::{Listing, MAX_LISTING_IMAGES, Order, OrderStatus, ShippingAddress, User},
    page::{DEFAULT_PAGE_SIZE, Page, PaginationParams},
    query::{ListingQuery, OrderQuery},
    record::{Record, RecordExt},
    store::{ListingPatch, Marketplace, MarketplaceConfig, OrderPatch, UserPatch},
};

pub use rust_decimal::Decimal;
