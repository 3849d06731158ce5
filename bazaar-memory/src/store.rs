//! In-memory storage implementation for the record store.
//!
//! All three collections and the password map live behind one async-aware
//! read-write lock. Reads share the lock; every write holds it exclusively for
//! the whole operation, including the email scan on user creation.

use std::{collections::HashMap, sync::Arc};
use async_trait::async_trait;
use chrono::Utc;
use mea::rwlock::RwLock;
use tracing::{debug, warn};

use bazaar_core::{
    backend::{RecordStore, RecordStoreBuilder},
    error::{StoreError, StoreResult},
    id::{ListingId, OrderId, UserId},
    model::{Listing, Order, User},
    page::Page,
    query::{ListingQuery, OrderQuery},
    record::Record,
};

use crate::{
    collection::Collection,
    evaluator::{Evaluate, ListingEvaluator, OrderEvaluator},
};

#[derive(Debug, Default)]
struct State {
    users: Collection<User>,
    listings: Collection<Listing>,
    orders: Collection<Order>,
    passwords: HashMap<UserId, String>,
}

impl State {
    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|user| user.email == email && Some(user.id) != except)
    }

    fn insert_user(&mut self, user: User) -> StoreResult<User> {
        if self.email_taken(&user.email, None) {
            warn!(email = %user.email, "rejected user with duplicate email");
            return Err(StoreError::already_exists(user.email));
        }

        let user = self.users.insert(user, Utc::now())?;
        debug!(resource = User::resource_name(), id = %user.id, "created record");

        Ok(user)
    }
}

/// Thread-safe in-memory record store.
///
/// # Thread Safety
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state.
/// Clones share the same data, so one store can be constructed at startup and
/// handed to every request handler. Separate `InMemoryStore::new()` calls give
/// fully isolated stores.
///
/// # Referential integrity
///
/// Orders reference users and listings by identifier only. Deleting a user or
/// a listing does not touch orders that reference it, and creating an order
/// does not check that its references still exist.
///
/// # Performance
///
/// Email lookups and listing/order queries scan the whole collection.
///
/// # Example
///
/// ```ignore
/// use bazaar_memory::InMemoryStore;
/// use bazaar::prelude::*;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = InMemoryStore::new();
///
///     let user = store.create_user(User::new("alice", "a@x.com")).await?;
///     assert_eq!(store.get_user(user.id).await?, user);
///
///     Ok(())
/// }
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for constructing an `InMemoryStore` with custom options.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }

    fn with_capacity(users: usize) -> Self {
        let state = State {
            passwords: HashMap::with_capacity(users),
            ..State::default()
        };

        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Number of live users.
    pub async fn user_count(&self) -> usize {
        self.state.read().await.users.len()
    }

    /// Number of live listings.
    pub async fn listing_count(&self) -> usize {
        self.state.read().await.listings.len()
    }

    /// Number of live orders.
    pub async fn order_count(&self) -> usize {
        self.state.read().await.orders.len()
    }

    /// The identifier the next successful user creation will receive.
    pub async fn next_user_id(&self) -> UserId {
        self.state.read().await.users.next_id()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn create_user(&self, user: User) -> StoreResult<User> {
        self.state.write().await.insert_user(user)
    }

    async fn create_user_with_password(&self, user: User, password_hash: String) -> StoreResult<User> {
        let mut state = self.state.write().await;

        let user = state.insert_user(user)?;
        state.passwords.insert(user.id, password_hash);
        debug!(id = %user.id, "stored password hash");

        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> StoreResult<User> {
        self.state
            .read()
            .await
            .users
            .get(id)
            .cloned()
    }

    async fn get_user_by_email(&self, email: &str) -> StoreResult<User> {
        self.state
            .read()
            .await
            .users
            .values()
            .find(|user| user.email == email)
            .cloned()
            .ok_or_else(|| StoreError::not_found(User::resource_name(), email))
    }

    async fn update_user(&self, id: UserId, user: User) -> StoreResult<User> {
        let mut state = self.state.write().await;

        // Existence first, so an unknown id reports NotFound even if the email clashes.
        state.users.get(id)?;

        if state.email_taken(&user.email, Some(id)) {
            warn!(email = %user.email, %id, "rejected user update with duplicate email");
            return Err(StoreError::already_exists(user.email));
        }

        let user = state.users.replace(id, user, Utc::now())?;
        debug!(resource = User::resource_name(), %id, "replaced record");

        Ok(user)
    }

    async fn delete_user(&self, id: UserId) -> StoreResult<()> {
        let mut state = self.state.write().await;

        state.users.remove(id)?;
        state.passwords.remove(&id);
        debug!(resource = User::resource_name(), %id, "deleted record");

        Ok(())
    }

    async fn set_user_password(&self, id: UserId, password_hash: String) -> StoreResult<()> {
        let mut state = self.state.write().await;

        state.users.get(id)?;
        state.passwords.insert(id, password_hash);

        debug!(%id, "stored password hash");

        Ok(())
    }

    async fn get_user_password(&self, id: UserId) -> StoreResult<Option<String>> {
        Ok(
            self.state
                .read()
                .await
                .passwords
                .get(&id)
                .cloned()
        )
    }

    async fn create_listing(&self, listing: Listing) -> StoreResult<Listing> {
        let listing = self
            .state
            .write()
            .await
            .listings
            .insert(listing, Utc::now())?;

        debug!(resource = Listing::resource_name(), id = %listing.id, "created record");

        Ok(listing)
    }

    async fn get_listing(&self, id: ListingId) -> StoreResult<Listing> {
        self.state
            .read()
            .await
            .listings
            .get(id)
            .cloned()
    }

    async fn list_listings(&self, query: &ListingQuery) -> StoreResult<Vec<Listing>> {
        let evaluator = ListingEvaluator::from(query);
        let state = self.state.read().await;

        Ok(evaluator.filter(state.listings.values()))
    }

    async fn update_listing(&self, id: ListingId, listing: Listing) -> StoreResult<Listing> {
        let listing = self
            .state
            .write()
            .await
            .listings
            .replace(id, listing, Utc::now())?;

        debug!(resource = Listing::resource_name(), %id, "replaced record");

        Ok(listing)
    }

    async fn delete_listing(&self, id: ListingId) -> StoreResult<()> {
        self.state
            .write()
            .await
            .listings
            .remove(id)?;

        debug!(resource = Listing::resource_name(), %id, "deleted record");

        Ok(())
    }

    async fn create_order(&self, order: Order) -> StoreResult<Order> {
        let order = self
            .state
            .write()
            .await
            .orders
            .insert(order, Utc::now())?;

        debug!(resource = Order::resource_name(), id = %order.id, "created record");

        Ok(order)
    }

    async fn get_order(&self, id: OrderId) -> StoreResult<Order> {
        self.state
            .read()
            .await
            .orders
            .get(id)
            .cloned()
    }

    async fn list_orders(&self, query: &OrderQuery) -> StoreResult<Page<Order>> {
        let evaluator = OrderEvaluator::from(query);
        let filtered = {
            let state = self.state.read().await;
            evaluator.filter(state.orders.values())
        };

        Ok(query.pagination.paginate(filtered))
    }

    async fn update_order(&self, id: OrderId, order: Order) -> StoreResult<Order> {
        let order = self
            .state
            .write()
            .await
            .orders
            .replace(id, order, Utc::now())?;

        debug!(resource = Order::resource_name(), %id, "replaced record");

        Ok(order)
    }

    async fn delete_order(&self, id: OrderId) -> StoreResult<()> {
        self.state
            .write()
            .await
            .orders
            .remove(id)?;

        debug!(resource = Order::resource_name(), %id, "deleted record");

        Ok(())
    }
}

/// Builder for constructing [`InMemoryStore`] instances.
///
/// # Example
///
/// ```ignore
/// use bazaar_memory::InMemoryStore;
/// use bazaar::backend::RecordStoreBuilder;
///
/// #[tokio::main]
/// async fn main() {
///     let store = InMemoryStore::builder()
///         .with_capacity(1_000)
///         .build()
///         .await
///         .unwrap();
/// }
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStoreBuilder {
    capacity: usize,
}

impl InMemoryStoreBuilder {
    /// Expected number of users, used to presize the password map.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

#[async_trait]
impl RecordStoreBuilder for InMemoryStoreBuilder {
    type Store = InMemoryStore;

    /// Builds and returns a new, empty [`InMemoryStore`].
    ///
    /// This always succeeds.
    async fn build(self) -> StoreResult<Self::Store> {
        Ok(InMemoryStore::with_capacity(self.capacity))
    }
}
