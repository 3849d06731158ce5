//! Storage backend abstraction for the record store.
//!
//! The [`RecordStore`] trait is the whole contract between request handlers and
//! whatever keeps the records. Password hashes are part of that contract, so
//! every backend offers the same capabilities and callers never need to know
//! which implementation they hold.
//!
//! # Traits
//!
//! - [`RecordStore`]: the operation set, object safe so `Arc<dyn RecordStore>` works
//! - [`RecordStoreBuilder`]: factory trait for creating backend instances
//!
//! # Examples
//!
//! ```ignore
//! use bazaar::backend::RecordStore;
//! use bazaar::model::User;
//!
//! let alice = store.create_user(User::new("alice", "a@x.com")).await?;
//! assert_eq!(alice.id.as_i32(), 1);
//!
//! let same = store.get_user_by_email("a@x.com").await?;
//! assert_eq!(same, alice);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::{fmt::Debug, sync::Arc};
use async_trait::async_trait;

use crate::{
    error::StoreResult,
    id::{ListingId, OrderId, UserId},
    model::{Listing, Order, User},
    page::Page,
    query::{ListingQuery, OrderQuery},
};

/// Abstract interface for marketplace record storage.
///
/// # Concurrency
///
/// Implementations must be shareable across tasks and threads. Every operation
/// is atomic: readers never see a partially applied write, and a read-modify-write
/// inside one operation (such as the email uniqueness check on user creation)
/// cannot interleave with another writer.
///
/// # Identifiers
///
/// Each collection assigns identifiers starting at 1 and increasing by exactly
/// one per successful create. Identifiers are never reused, even after the
/// record holding them is deleted.
///
/// # Errors
///
/// Lookups of absent records fail with
/// [`StoreError::NotFound`](crate::error::StoreError::NotFound); creating a user
/// whose email is taken fails with
/// [`StoreError::AlreadyExists`](crate::error::StoreError::AlreadyExists).
#[async_trait]
pub trait RecordStore: Send + Sync + Debug {
    /// Inserts a user with the next user identifier.
    ///
    /// Fails with `AlreadyExists` if a live user has the same email, in which
    /// case nothing is modified and no identifier is consumed.
    async fn create_user(&self, user: User) -> StoreResult<User>;

    /// Inserts a user and stores its password hash in one atomic step.
    ///
    /// Same failure modes as [`create_user`](Self::create_user); on failure no
    /// hash is stored.
    async fn create_user_with_password(&self, user: User, password_hash: String) -> StoreResult<User>;

    /// Fetches a user by identifier.
    async fn get_user(&self, id: UserId) -> StoreResult<User>;

    /// Fetches the user whose email matches exactly (case-sensitive).
    async fn get_user_by_email(&self, email: &str) -> StoreResult<User>;

    /// Replaces the stored user, keeping its identifier.
    ///
    /// Fails with `AlreadyExists` if another live user owns the new email.
    async fn update_user(&self, id: UserId, user: User) -> StoreResult<User>;

    /// Deletes a user together with its password hash.
    ///
    /// Listings and orders owned by the user are left untouched.
    async fn delete_user(&self, id: UserId) -> StoreResult<()>;

    /// Stores (or overwrites) the password hash of a live user.
    ///
    /// Fails with `NotFound` if no live user has this identifier, so a hash can
    /// never outlive its user.
    async fn set_user_password(&self, id: UserId, password_hash: String) -> StoreResult<()>;

    /// Returns the password hash for a user identifier, if one is stored.
    async fn get_user_password(&self, id: UserId) -> StoreResult<Option<String>>;

    /// Inserts a listing with the next listing identifier and fresh timestamps.
    async fn create_listing(&self, listing: Listing) -> StoreResult<Listing>;

    /// Fetches a listing by identifier.
    async fn get_listing(&self, id: ListingId) -> StoreResult<Listing>;

    /// Returns every listing accepted by `query`, in ascending identifier order.
    async fn list_listings(&self, query: &ListingQuery) -> StoreResult<Vec<Listing>>;

    /// Replaces the stored listing, keeping its identifier and creation time and
    /// stamping a new update time.
    async fn update_listing(&self, id: ListingId, listing: Listing) -> StoreResult<Listing>;

    /// Deletes a listing. Orders referencing it are left untouched.
    async fn delete_listing(&self, id: ListingId) -> StoreResult<()>;

    /// Inserts an order with the next order identifier, fresh timestamps and
    /// `pending` status, whatever status the caller supplied.
    async fn create_order(&self, order: Order) -> StoreResult<Order>;

    /// Fetches an order by identifier.
    async fn get_order(&self, id: OrderId) -> StoreResult<Order>;

    /// Returns one page of the orders accepted by `query`, in ascending
    /// identifier order, together with the total number of matches.
    async fn list_orders(&self, query: &OrderQuery) -> StoreResult<Page<Order>>;

    /// Replaces the stored order, keeping its identifier and creation time and
    /// stamping a new update time.
    async fn update_order(&self, id: OrderId, order: Order) -> StoreResult<Order>;

    /// Deletes an order.
    async fn delete_order(&self, id: OrderId) -> StoreResult<()>;
}

macro_rules! forward_record_store {
    ($($target:tt)*) => {
        #[async_trait]
        impl<S> RecordStore for $($target)*
        where
            S: RecordStore + ?Sized,
        {
            async fn create_user(&self, user: User) -> StoreResult<User> {
                (**self).create_user(user).await
            }

            async fn create_user_with_password(&self, user: User, password_hash: String) -> StoreResult<User> {
                (**self)
                    .create_user_with_password(user, password_hash)
                    .await
            }

            async fn get_user(&self, id: UserId) -> StoreResult<User> {
                (**self).get_user(id).await
            }

            async fn get_user_by_email(&self, email: &str) -> StoreResult<User> {
                (**self).get_user_by_email(email).await
            }

            async fn update_user(&self, id: UserId, user: User) -> StoreResult<User> {
                (**self).update_user(id, user).await
            }

            async fn delete_user(&self, id: UserId) -> StoreResult<()> {
                (**self).delete_user(id).await
            }

            async fn set_user_password(&self, id: UserId, password_hash: String) -> StoreResult<()> {
                (**self)
                    .set_user_password(id, password_hash)
                    .await
            }

            async fn get_user_password(&self, id: UserId) -> StoreResult<Option<String>> {
                (**self).get_user_password(id).await
            }

            async fn create_listing(&self, listing: Listing) -> StoreResult<Listing> {
                (**self).create_listing(listing).await
            }

            async fn get_listing(&self, id: ListingId) -> StoreResult<Listing> {
                (**self).get_listing(id).await
            }

            async fn list_listings(&self, query: &ListingQuery) -> StoreResult<Vec<Listing>> {
                (**self).list_listings(query).await
            }

            async fn update_listing(&self, id: ListingId, listing: Listing) -> StoreResult<Listing> {
                (**self)
                    .update_listing(id, listing)
                    .await
            }

            async fn delete_listing(&self, id: ListingId) -> StoreResult<()> {
                (**self).delete_listing(id).await
            }

            async fn create_order(&self, order: Order) -> StoreResult<Order> {
                (**self).create_order(order).await
            }

            async fn get_order(&self, id: OrderId) -> StoreResult<Order> {
                (**self).get_order(id).await
            }

            async fn list_orders(&self, query: &OrderQuery) -> StoreResult<Page<Order>> {
                (**self).list_orders(query).await
            }

            async fn update_order(&self, id: OrderId, order: Order) -> StoreResult<Order> {
                (**self).update_order(id, order).await
            }

            async fn delete_order(&self, id: OrderId) -> StoreResult<()> {
                (**self).delete_order(id).await
            }
        }
    };
}

forward_record_store!(&S);
forward_record_store!(Arc<S>);
forward_record_store!(Box<S>);

/// Factory trait for creating configured [`RecordStore`] instances.
#[async_trait]
pub trait RecordStoreBuilder {
    type Store: RecordStore;

    async fn build(self) -> StoreResult<Self::Store>;
}
