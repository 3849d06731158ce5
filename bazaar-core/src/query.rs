//! Filter parameters for listing and order queries.
//!
//! Both query types follow the convention of the request layer they are built
//! from: an empty or non-positive parameter means "do not filter on this".
//!
//! ```ignore
//! use bazaar::query::{ListingQuery, OrderQuery};
//!
//! let phones = ListingQuery::builder()
//!     .search("phone")
//!     .price_max(Decimal::from(500))
//!     .build();
//!
//! let shipped = OrderQuery::builder()
//!     .user_id(UserId::new(1))
//!     .status(OrderStatus::Shipped)
//!     .page(2)
//!     .limit(5)
//!     .build();
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    id::{RecordId, UserId},
    model::OrderStatus,
    page::PaginationParams,
};

/// Filter for listing searches.
///
/// A listing matches when every active filter accepts it:
///
/// - `search` (active when non-empty): case-insensitive substring of the title
///   or the description
/// - `price_min` (active when `> 0`): price is at least this
/// - `price_max` (active when `> 0`): price is at most this
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingQuery {
    pub search: String,
    pub price_min: Decimal,
    pub price_max: Decimal,
}

impl ListingQuery {
    pub fn new(search: impl Into<String>, price_min: Decimal, price_max: Decimal) -> Self {
        Self {
            search: search.into(),
            price_min,
            price_max,
        }
    }

    pub fn builder() -> ListingQueryBuilder {
        ListingQueryBuilder::default()
    }

    /// Lower price bound, if active.
    pub fn min_price(&self) -> Option<Decimal> {
        (self.price_min > Decimal::ZERO).then_some(self.price_min)
    }

    /// Upper price bound, if active.
    pub fn max_price(&self) -> Option<Decimal> {
        (self.price_max > Decimal::ZERO).then_some(self.price_max)
    }
}

#[derive(Debug, Default)]
pub struct ListingQueryBuilder {
    query: ListingQuery,
}

impl ListingQueryBuilder {
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.query.search = search.into();
        self
    }

    pub fn price_min(mut self, price_min: Decimal) -> Self {
        self.query.price_min = price_min;
        self
    }

    pub fn price_max(mut self, price_max: Decimal) -> Self {
        self.query.price_max = price_max;
        self
    }

    pub fn build(self) -> ListingQuery {
        self.query
    }
}

/// Filter and page selection for order listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderQuery {
    /// Only orders placed by this user. Unassigned ids (`<= 0`) match everyone.
    pub user_id: UserId,
    /// Only orders in this status. `None` matches every status.
    pub status: Option<OrderStatus>,
    pub pagination: PaginationParams,
}

impl OrderQuery {
    /// Builds a query from raw request values.
    pub fn new(user_id: UserId, status: Option<OrderStatus>, page: i32, limit: i32) -> Self {
        Self {
            user_id,
            status,
            pagination: PaginationParams::new(page, limit),
        }
    }

    pub fn builder() -> OrderQueryBuilder {
        OrderQueryBuilder::default()
    }

    /// User filter, if active.
    pub fn owner(&self) -> Option<UserId> {
        self.user_id.is_assigned().then_some(self.user_id)
    }
}

#[derive(Debug, Default)]
pub struct OrderQueryBuilder {
    user_id: UserId,
    status: Option<OrderStatus>,
    page: i32,
    limit: i32,
}

impl OrderQueryBuilder {
    pub fn user_id(mut self, user_id: UserId) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn page(mut self, page: i32) -> Self {
        self.page = page;
        self
    }

    pub fn limit(mut self, limit: i32) -> Self {
        self.limit = limit;
        self
    }

    pub fn build(self) -> OrderQuery {
        OrderQuery::new(self.user_id, self.status, self.page, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_prices_are_inactive() {
        let query = ListingQuery::new("phone", Decimal::ZERO, Decimal::NEGATIVE_ONE);
        assert_eq!(query.min_price(), None);
        assert_eq!(query.max_price(), None);

        let query = ListingQuery::builder().price_min(Decimal::ONE).build();
        assert_eq!(query.min_price(), Some(Decimal::ONE));
    }

    #[test]
    fn order_query_defaults_match_everything() {
        let query = OrderQuery::builder().build();
        assert_eq!(query.owner(), None);
        assert_eq!(query.status, None);
        assert_eq!(query.pagination, PaginationParams::default());
    }
}
