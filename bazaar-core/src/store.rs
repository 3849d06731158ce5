//! Marketplace operations layered over a [`RecordStore`].
//!
//! The store itself only knows whole-record create/read/replace/delete. The
//! flows that request handlers run on top of it, such as pricing an order from
//! its listing or moving an order to a new status, live here. Each flow reads
//! the current record, merges the change and writes the merged record back.
//!
//! ```ignore
//! use bazaar::{memory::InMemoryStore, store::Marketplace};
//!
//! let market = Marketplace::new(InMemoryStore::new());
//! let seller = market.register_user("sam", "sam@x.com", "hash").await?;
//! let lamp = market
//!     .list_item(Listing::new(seller.id, "Lamp", "Brass desk lamp", Decimal::from(40)))
//!     .await?;
//! let order = market
//!     .place_order(seller.id, lamp.id, 2, address, None)
//!     .await?;
//! assert_eq!(order.total_price, Decimal::from(80));
//! ```

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{instrument, warn};

use crate::{
    backend::RecordStore,
    error::{StoreError, StoreResult},
    id::{ListingId, OrderId, RecordId, UserId},
    model::{Listing, MAX_LISTING_IMAGES, Order, OrderStatus, ShippingAddress, User},
    page::Page,
    query::{ListingQuery, OrderQuery},
};

/// Business rules enforced by [`Marketplace`] before records reach the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketplaceConfig {
    /// Maximum number of images a listing may carry.
    pub max_listing_images: usize,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            max_listing_images: MAX_LISTING_IMAGES,
        }
    }
}

/// Partial update for a listing. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub location: Option<String>,
    pub images: Option<Vec<String>>,
}

impl ListingPatch {
    fn apply(self, listing: &mut Listing) {
        if let Some(title) = self.title {
            listing.title = title;
        }
        if let Some(description) = self.description {
            listing.description = description;
        }
        if let Some(price) = self.price {
            listing.price = price;
        }
        if let Some(category) = self.category {
            listing.category = category;
        }
        if let Some(condition) = self.condition {
            listing.condition = condition;
        }
        if let Some(location) = self.location {
            listing.location = location;
        }
        if let Some(images) = self.images {
            listing.images = images;
        }
    }
}

/// Partial update for a user profile.
///
/// Absent or empty fields keep their stored value. A `password_hash` replaces
/// the stored hash.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl UserPatch {
    fn apply(self, user: &mut User) -> Option<String> {
        if let Some(username) = self.username.filter(|v| !v.is_empty()) {
            user.username = username;
        }
        if let Some(email) = self.email.filter(|v| !v.is_empty()) {
            user.email = email;
        }

        self.password_hash.filter(|v| !v.is_empty())
    }
}

/// Partial update for an order.
///
/// Absent or non-positive fields keep their stored value. Status moves through
/// [`Marketplace::update_order_status`] and [`Marketplace::cancel_order`] instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderPatch {
    pub user_id: Option<UserId>,
    pub listing_id: Option<ListingId>,
    pub quantity: Option<i32>,
    pub total_price: Option<Decimal>,
}

impl OrderPatch {
    fn apply(self, order: &mut Order) {
        if let Some(user_id) = self.user_id.filter(|id| id.is_assigned()) {
            order.user_id = user_id;
        }
        if let Some(listing_id) = self.listing_id.filter(|id| id.is_assigned()) {
            order.listing_id = listing_id;
        }
        if let Some(quantity) = self.quantity.filter(|q| *q > 0) {
            order.quantity = quantity;
        }
        if let Some(total_price) = self.total_price.filter(|p| *p > Decimal::ZERO) {
            order.total_price = total_price;
        }
    }
}

fn require(value: &str, what: &str) -> StoreResult<()> {
    if value.is_empty() {
        return Err(StoreError::Invalid(format!("{what} is required")));
    }

    Ok(())
}

/// A marketplace bound to a specific record store.
///
/// # Type Parameters
///
/// * `S` - The store implementation; `Arc<dyn RecordStore>` works too
#[derive(Debug)]
pub struct Marketplace<S: RecordStore> {
    store: S,
    config: MarketplaceConfig,
}

impl<S: RecordStore> Marketplace<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, MarketplaceConfig::default())
    }

    pub fn with_config(store: S, config: MarketplaceConfig) -> Self {
        Self { store, config }
    }

    /// Direct access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &MarketplaceConfig {
        &self.config
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Creates a user and stores its password hash.
    ///
    /// Hashing happens before this call; the hash is kept verbatim. The user and
    /// the hash are written together, so a concurrent delete cannot leave a
    /// hash behind.
    #[instrument(skip(self, password_hash))]
    pub async fn register_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> StoreResult<User> {
        require(username, "username")?;
        require(email, "email")?;
        require(password_hash, "password")?;

        self.store
            .create_user_with_password(User::new(username, email), password_hash.to_string())
            .await
    }

    /// Applies a partial update to a user, rotating the password hash if one
    /// is given.
    #[instrument(skip(self, patch))]
    pub async fn revise_user(&self, id: UserId, patch: UserPatch) -> StoreResult<User> {
        let mut user = self.store.get_user(id).await?;
        let password_hash = patch.apply(&mut user);

        let user = self.store.update_user(id, user).await?;
        if let Some(password_hash) = password_hash {
            self.store.set_user_password(id, password_hash).await?;
        }

        Ok(user)
    }

    /// Replaces a user's profile outright. Both username and email are required;
    /// the password hash changes only if one is given.
    #[instrument(skip(self, password_hash))]
    pub async fn replace_user(
        &self,
        id: UserId,
        username: &str,
        email: &str,
        password_hash: Option<&str>,
    ) -> StoreResult<User> {
        self.store.get_user(id).await?;
        require(username, "username")?;
        require(email, "email")?;

        let user = self
            .store
            .update_user(id, User::new(username, email))
            .await?;
        if let Some(password_hash) = password_hash.filter(|v| !v.is_empty()) {
            self.store
                .set_user_password(id, password_hash.to_string())
                .await?;
        }

        Ok(user)
    }

    /// Returns the user owning `email` if `password_hash` matches the stored hash.
    ///
    /// An unknown email, a missing hash and a wrong hash all fail the same way,
    /// with [`StoreError::InvalidCredentials`].
    #[instrument(skip(self, password_hash))]
    pub async fn verify_credentials(&self, email: &str, password_hash: &str) -> StoreResult<User> {
        require(email, "email")?;
        require(password_hash, "password")?;

        let user = match self.store.get_user_by_email(email).await {
            Ok(user) => user,
            Err(err) if err.is_not_found() => return Err(StoreError::InvalidCredentials),
            Err(err) => return Err(err),
        };

        match self.store.get_user_password(user.id).await? {
            Some(stored) if stored == password_hash => Ok(user),
            _ => {
                warn!(id = %user.id, "credential check failed");
                Err(StoreError::InvalidCredentials)
            }
        }
    }

    /// Creates a listing after checking its price and image count.
    #[instrument(skip(self, listing), fields(title = %listing.title))]
    pub async fn list_item(&self, listing: Listing) -> StoreResult<Listing> {
        self.check_listing(&listing)?;
        self.store.create_listing(listing).await
    }

    /// Applies a partial update to a listing.
    #[instrument(skip(self, patch))]
    pub async fn revise_listing(&self, id: ListingId, patch: ListingPatch) -> StoreResult<Listing> {
        let mut listing = self.store.get_listing(id).await?;
        patch.apply(&mut listing);
        self.check_listing(&listing)?;

        self.store.update_listing(id, listing).await
    }

    pub async fn search_listings(&self, query: &ListingQuery) -> StoreResult<Vec<Listing>> {
        self.store.list_listings(query).await
    }

    /// Places an order priced at the listing's current price times `quantity`.
    ///
    /// The listing is read once; the order keeps that total even if the listing
    /// is repriced or deleted afterwards.
    #[instrument(skip(self, shipping_address, buyer_notes))]
    pub async fn place_order(
        &self,
        user_id: UserId,
        listing_id: ListingId,
        quantity: i32,
        shipping_address: ShippingAddress,
        buyer_notes: Option<String>,
    ) -> StoreResult<Order> {
        if !listing_id.is_assigned() {
            return Err(StoreError::Invalid("listing id is required".to_string()));
        }
        if quantity <= 0 {
            return Err(StoreError::Invalid(format!(
                "quantity must be positive, got {quantity}"
            )));
        }
        if !shipping_address.is_deliverable() {
            return Err(StoreError::Invalid(
                "street, city and country are required in the shipping address".to_string(),
            ));
        }

        let listing = self.store.get_listing(listing_id).await?;
        let total_price = listing.price * Decimal::from(quantity);

        let mut order = Order::new(user_id, listing_id, quantity, total_price, shipping_address);
        order.buyer_notes = buyer_notes;

        self.store.create_order(order).await
    }

    /// Applies a partial update to an order. Status and timestamps are untouched.
    #[instrument(skip(self, patch))]
    pub async fn revise_order(&self, id: OrderId, patch: OrderPatch) -> StoreResult<Order> {
        let mut order = self.store.get_order(id).await?;
        patch.apply(&mut order);

        self.store.update_order(id, order).await
    }

    /// Moves an order to `status`. Cancelling goes through [`Self::cancel_order`].
    #[instrument(skip(self))]
    pub async fn update_order_status(&self, id: OrderId, status: OrderStatus) -> StoreResult<Order> {
        if status == OrderStatus::Cancelled {
            return Err(StoreError::Invalid(
                "status must be pending, confirmed, shipped, or delivered".to_string(),
            ));
        }

        let mut order = self.store.get_order(id).await?;
        order.status = status;

        self.store.update_order(id, order).await
    }

    /// Cancels an order, recording when and why.
    #[instrument(skip(self, reason))]
    pub async fn cancel_order(&self, id: OrderId, reason: Option<String>) -> StoreResult<Order> {
        let mut order = self.store.get_order(id).await?;
        order.status = OrderStatus::Cancelled;
        order.cancelled_at = Some(Utc::now());
        order.cancel_reason = reason;

        self.store.update_order(id, order).await
    }

    pub async fn orders(&self, query: &OrderQuery) -> StoreResult<Page<Order>> {
        self.store.list_orders(query).await
    }

    fn check_listing(&self, listing: &Listing) -> StoreResult<()> {
        if listing.price <= Decimal::ZERO {
            return Err(StoreError::Invalid(format!(
                "price must be positive, got {}",
                listing.price
            )));
        }

        if listing.images.len() > self.config.max_listing_images {
            return Err(StoreError::Invalid(format!(
                "at most {} images allowed, got {}",
                self.config.max_listing_images,
                listing.images.len()
            )));
        }

        Ok(())
    }
}
