//! Marketplace records: users, listings and orders.
//!
//! Identifiers and timestamps on these types are owned by the store. Whatever a
//! caller puts in them before a create is overwritten; on update the store keeps
//! the stored identifier and creation timestamp.

use std::{fmt, str::FromStr};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    error::StoreError,
    id::{ListingId, OrderId, UserId},
    record::Record,
};

/// Maximum number of image references a listing may carry.
pub const MAX_LISTING_IMAGES: usize = 5;

/// A registered marketplace user.
///
/// The password hash is deliberately not part of this record; stores keep it
/// in a separate map keyed by [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

impl User {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId::default(),
            username: username.into(),
            email: email.into(),
        }
    }
}

impl Record for User {
    type Id = UserId;

    fn resource_name() -> &'static str {
        "User"
    }

    fn id(&self) -> UserId {
        self.id
    }

    fn set_id(&mut self, id: UserId) {
        self.id = id;
    }
}

/// An item offered for sale by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub condition: String,
    pub location: String,
    /// Ordered image references, at most [`MAX_LISTING_IMAGES`].
    pub images: Vec<String>,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Creates a listing with empty category, condition, location and images.
    pub fn new(
        user_id: UserId,
        title: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            id: ListingId::default(),
            title: title.into(),
            description: description.into(),
            price,
            category: String::new(),
            condition: String::new(),
            location: String::new(),
            images: Vec::new(),
            user_id,
            created_at: DateTime::default(),
            updated_at: DateTime::default(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = condition.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }
}

impl Record for Listing {
    type Id = ListingId;

    fn resource_name() -> &'static str {
        "Listing"
    }

    fn id(&self) -> ListingId {
        self.id
    }

    fn set_id(&mut self, id: ListingId) {
        self.id = id;
    }

    fn on_create(&mut self, now: DateTime<Utc>) {
        self.created_at = now;
        self.updated_at = now;
    }

    fn on_replace(&mut self, existing: &Self, now: DateTime<Utc>) {
        self.created_at = existing.created_at;
        self.updated_at = now;
    }
}

/// Lifecycle state of an [`Order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| StoreError::Invalid(format!("unknown order status: {s}")))
    }
}

/// Where an order is delivered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

impl ShippingAddress {
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            state: state.into(),
            zip: zip.into(),
            country: country.into(),
        }
    }

    /// Street, city and country are present. State and zip are optional.
    pub fn is_deliverable(&self) -> bool {
        !self.street.is_empty() && !self.city.is_empty() && !self.country.is_empty()
    }
}

/// A purchase of a listing by a user.
///
/// `total_price` is computed once when the order is placed and is carried over
/// verbatim by status changes and cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub listing_id: ListingId,
    pub quantity: i32,
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub shipping_address: ShippingAddress,
    pub buyer_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancel_reason: Option<String>,
}

impl Order {
    pub fn new(
        user_id: UserId,
        listing_id: ListingId,
        quantity: i32,
        total_price: Decimal,
        shipping_address: ShippingAddress,
    ) -> Self {
        Self {
            id: OrderId::default(),
            user_id,
            listing_id,
            quantity,
            total_price,
            status: OrderStatus::Pending,
            shipping_address,
            buyer_notes: None,
            created_at: DateTime::default(),
            updated_at: DateTime::default(),
            cancelled_at: None,
            cancel_reason: None,
        }
    }

    pub fn with_buyer_notes(mut self, notes: impl Into<String>) -> Self {
        self.buyer_notes = Some(notes.into());
        self
    }
}

impl Record for Order {
    type Id = OrderId;

    fn resource_name() -> &'static str {
        "Order"
    }

    fn id(&self) -> OrderId {
        self.id
    }

    fn set_id(&mut self, id: OrderId) {
        self.id = id;
    }

    fn on_create(&mut self, now: DateTime<Utc>) {
        self.status = OrderStatus::Pending;
        self.created_at = now;
        self.updated_at = now;
    }

    fn on_replace(&mut self, existing: &Self, now: DateTime<Utc>) {
        self.created_at = existing.created_at;
        self.updated_at = now;
    }
}
