//! Query evaluation for in-memory record filtering.
//!
//! Queries are compiled once into an evaluator (lowercasing the search term,
//! resolving which bounds are active) and then run against every record of a
//! collection.

use rust_decimal::Decimal;

use bazaar_core::{
    id::UserId,
    model::{Listing, Order, OrderStatus},
    query::{ListingQuery, OrderQuery},
};

/// A predicate over records of type `R`.
pub(crate) trait Evaluate<R> {
    fn matches(&self, record: &R) -> bool;

    /// Clones every record accepted by this evaluator, preserving input order.
    fn filter<'a, I>(&self, records: I) -> Vec<R>
    where
        I: IntoIterator<Item = &'a R>,
        R: Clone + 'a,
    {
        records
            .into_iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

#[derive(Debug)]
pub(crate) struct ListingEvaluator {
    needle: Option<String>,
    min: Option<Decimal>,
    max: Option<Decimal>,
}

impl From<&ListingQuery> for ListingEvaluator {
    fn from(query: &ListingQuery) -> Self {
        Self {
            needle: (!query.search.is_empty()).then(|| query.search.to_lowercase()),
            min: query.min_price(),
            max: query.max_price(),
        }
    }
}

impl Evaluate<Listing> for ListingEvaluator {
    fn matches(&self, listing: &Listing) -> bool {
        if let Some(needle) = &self.needle {
            let hit = listing.title.to_lowercase().contains(needle)
                || listing.description.to_lowercase().contains(needle);

            if !hit {
                return false;
            }
        }

        if self.min.is_some_and(|min| listing.price < min) {
            return false;
        }

        if self.max.is_some_and(|max| listing.price > max) {
            return false;
        }

        true
    }
}

#[derive(Debug)]
pub(crate) struct OrderEvaluator {
    owner: Option<UserId>,
    status: Option<OrderStatus>,
}

impl From<&OrderQuery> for OrderEvaluator {
    fn from(query: &OrderQuery) -> Self {
        Self {
            owner: query.owner(),
            status: query.status,
        }
    }
}

impl Evaluate<Order> for OrderEvaluator {
    fn matches(&self, order: &Order) -> bool {
        self.owner.is_none_or(|owner| order.user_id == owner)
            && self.status.is_none_or(|status| order.status == status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_core::{id::ListingId, model::ShippingAddress};

    fn listing(title: &str, description: &str, price: i64) -> Listing {
        Listing::new(UserId::new(1), title, description, Decimal::from(price))
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let evaluator = ListingEvaluator::from(&ListingQuery::builder().search("PHONE").build());

        assert!(evaluator.matches(&listing("Smartphone", "barely used", 300)));
        assert!(evaluator.matches(&listing("Case", "fits any Phone", 15)));
        assert!(!evaluator.matches(&listing("Laptop", "fast", 900)));
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let evaluator = ListingEvaluator::from(&ListingQuery::new(
            "",
            Decimal::from(10),
            Decimal::from(20),
        ));

        assert!(evaluator.matches(&listing("a", "", 10)));
        assert!(evaluator.matches(&listing("b", "", 20)));
        assert!(!evaluator.matches(&listing("c", "", 9)));
        assert!(!evaluator.matches(&listing("d", "", 21)));
    }

    #[test]
    fn order_filters_skip_when_unset() {
        let order = Order::new(
            UserId::new(4),
            ListingId::new(1),
            1,
            Decimal::ONE,
            ShippingAddress::default(),
        );

        assert!(OrderEvaluator::from(&OrderQuery::default()).matches(&order));
        assert!(
            OrderEvaluator::from(&OrderQuery::builder().user_id(UserId::new(4)).build())
                .matches(&order)
        );
        assert!(
            !OrderEvaluator::from(&OrderQuery::builder().user_id(UserId::new(5)).build())
                .matches(&order)
        );
        assert!(
            !OrderEvaluator::from(&OrderQuery::builder().status(OrderStatus::Shipped).build())
                .matches(&order)
        );
    }
}
