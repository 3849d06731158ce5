//! Behavioural tests for the in-memory record store through the public API.

use bazaar::{memory::InMemoryStore, prelude::*};

fn listing(owner: UserId, title: &str, description: &str, price: i64) -> Listing {
    Listing::new(owner, title, description, Decimal::from(price))
}

fn order(user: i32, listing: i32) -> Order {
    Order::new(
        UserId::new(user),
        ListingId::new(listing),
        1,
        Decimal::from(10),
        ShippingAddress::new("1 Main St", "Springfield", "IL", "62701", "US"),
    )
}

#[tokio::test]
async fn identifiers_increase_across_deletes() {
    let store = InMemoryStore::new();
    let owner = UserId::new(1);

    let mut seen = Vec::new();
    for round in 0..5 {
        let created = store
            .create_listing(listing(owner, "item", "", 5))
            .await
            .unwrap();
        seen.push(created.id.get());

        if round % 2 == 0 {
            store.delete_listing(created.id).await.unwrap();
        }
    }

    assert_eq!(seen, vec![1, 2, 3, 4, 5]);
    assert_eq!(store.listing_count().await, 2);
}

#[tokio::test]
async fn collections_count_independently() {
    let store = InMemoryStore::new();

    let user = store.create_user(User::new("a", "a@x.com")).await.unwrap();
    let first = store
        .create_listing(listing(user.id, "lamp", "", 5))
        .await
        .unwrap();
    let second = store
        .create_listing(listing(user.id, "desk", "", 5))
        .await
        .unwrap();
    let placed = store.create_order(order(1, 1)).await.unwrap();

    assert_eq!(user.id.get(), 1);
    assert_eq!(first.id.get(), 1);
    assert_eq!(second.id.get(), 2);
    assert_eq!(placed.id.get(), 1);
}

#[tokio::test]
async fn get_unknown_or_deleted_is_not_found() {
    let store = InMemoryStore::new();

    assert_eq!(
        store.get_listing(ListingId::new(1)).await.unwrap_err(),
        StoreError::not_found("Listing", 1)
    );

    let placed = store.create_order(order(1, 1)).await.unwrap();
    store.delete_order(placed.id).await.unwrap();

    assert_eq!(
        store.get_order(placed.id).await.unwrap_err(),
        StoreError::not_found("Order", 1)
    );
    assert!(store.delete_order(placed.id).await.unwrap_err().is_not_found());
    assert!(
        store
            .update_order(placed.id, order(1, 1))
            .await
            .unwrap_err()
            .is_not_found()
    );
}

#[tokio::test]
async fn update_is_whole_record_replace() {
    let store = InMemoryStore::new();
    let owner = UserId::new(1);
    let original = store
        .create_listing(
            listing(owner, "Phone", "Unlocked", 100)
                .with_category("electronics")
                .with_location("Berlin")
                .with_images(["a.png", "b.png"]),
        )
        .await
        .unwrap();

    let mut replacement = listing(owner, "Phone X", "Refurbished", 90);
    replacement.id = ListingId::new(42);
    replacement.created_at = chrono::DateTime::default();

    let updated = store
        .update_listing(original.id, replacement)
        .await
        .unwrap();

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.created_at, original.created_at);
    assert!(updated.updated_at >= original.updated_at);
    assert_eq!(updated.title, "Phone X");
    // Not re-supplied, so gone.
    assert_eq!(updated.category, "");
    assert_eq!(updated.location, "");
    assert!(updated.images.is_empty());

    assert_eq!(store.get_listing(original.id).await.unwrap(), updated);
    assert!(store.get_listing(ListingId::new(42)).await.is_err());
}

#[tokio::test]
async fn search_matches_title_or_description_ignoring_case() {
    let store = InMemoryStore::new();
    let owner = UserId::new(1);

    let phone = store
        .create_listing(listing(owner, "Smartphone", "128GB", 900))
        .await
        .unwrap();
    store
        .create_listing(listing(owner, "Laptop", "Fast", 1200))
        .await
        .unwrap();
    let case = store
        .create_listing(listing(owner, "Case", "Fits any PHONE", 3))
        .await
        .unwrap();

    let hits = store
        .list_listings(&ListingQuery::new("phone", Decimal::ZERO, Decimal::ZERO))
        .await
        .unwrap();

    assert_eq!(hits, vec![phone.clone(), case]);

    let hits = store
        .list_listings(&ListingQuery::new("phone", Decimal::from(10), Decimal::ZERO))
        .await
        .unwrap();

    assert_eq!(hits, vec![phone]);
}

#[tokio::test]
async fn empty_listing_query_returns_everything_in_id_order() {
    let store = InMemoryStore::new();
    for title in ["c", "a", "b"] {
        store
            .create_listing(listing(UserId::new(1), title, "", 1))
            .await
            .unwrap();
    }

    let titles: Vec<String> = store
        .list_listings(&ListingQuery::default())
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.title)
        .collect();

    assert_eq!(titles, vec!["c", "a", "b"]);
}

#[tokio::test]
async fn second_page_of_twelve_orders() {
    let store = InMemoryStore::new();
    for _ in 0..12 {
        store.create_order(order(1, 1)).await.unwrap();
    }

    let page = store
        .list_orders(&OrderQuery::new(UserId::new(0), None, 2, 5))
        .await
        .unwrap();

    let ids: Vec<i32> = page.items.iter().map(|o| o.id.get()).collect();
    assert_eq!(ids, vec![6, 7, 8, 9, 10]);
    assert_eq!(page.total, 12);
    assert_eq!(page.pages(), 3);
}

#[tokio::test]
async fn page_beyond_the_data_is_empty() {
    let store = InMemoryStore::new();
    for _ in 0..12 {
        store.create_order(order(1, 1)).await.unwrap();
    }

    let page = store
        .list_orders(&OrderQuery::new(UserId::new(0), None, 100, 10))
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.total, 12);
}

#[tokio::test]
async fn non_positive_paging_uses_defaults() {
    let store = InMemoryStore::new();
    for _ in 0..12 {
        store.create_order(order(1, 1)).await.unwrap();
    }

    let page = store
        .list_orders(&OrderQuery::new(UserId::new(-1), None, 0, 0))
        .await
        .unwrap();

    assert_eq!(page.items.len(), DEFAULT_PAGE_SIZE);
    assert_eq!(page.items[0].id, OrderId::new(1));
    assert_eq!(page.total, 12);
}

#[tokio::test]
async fn trait_objects_share_the_contract() {
    let store: std::sync::Arc<dyn RecordStore> = std::sync::Arc::new(InMemoryStore::new());

    let user = store.create_user(User::new("a", "a@x.com")).await.unwrap();
    store
        .set_user_password(user.id, "hash".to_string())
        .await
        .unwrap();

    let same = store.get_user_by_email("a@x.com").await.unwrap();
    assert_eq!(same, user);
    assert_eq!(
        store.get_user_password(user.id).await.unwrap().as_deref(),
        Some("hash")
    );
}

#[tokio::test]
async fn end_to_end_marketplace_scenario() {
    let market = Marketplace::new(InMemoryStore::new());
    let store = market.store();

    let alice = store.create_user(User::new("alice", "a@x.com")).await.unwrap();
    assert_eq!(alice.id, UserId::new(1));

    let duplicate = store
        .create_user(User::new("alice2", "a@x.com"))
        .await
        .unwrap_err();
    assert_eq!(duplicate, StoreError::already_exists("a@x.com"));
    assert_eq!(store.next_user_id().await, UserId::new(2));

    let phone = store
        .create_listing(listing(alice.id, "Phone", "Unlocked", 100))
        .await
        .unwrap();
    assert_eq!(phone.id, ListingId::new(1));

    let placed = market
        .place_order(
            alice.id,
            phone.id,
            3,
            ShippingAddress::new("1 Main St", "Springfield", "IL", "62701", "US"),
            None,
        )
        .await
        .unwrap();
    assert_eq!(placed.id, OrderId::new(1));
    assert_eq!(placed.total_price, Decimal::from(300));
    assert_eq!(placed.status, OrderStatus::Pending);

    let shipped = market
        .update_order_status(placed.id, OrderStatus::Shipped)
        .await
        .unwrap();
    assert_eq!(shipped.status, OrderStatus::Shipped);
    assert_eq!(shipped.total_price, Decimal::from(300));
    assert_eq!(shipped.created_at, placed.created_at);

    store.delete_listing(phone.id).await.unwrap();
    assert!(store.get_listing(phone.id).await.unwrap_err().is_not_found());
    assert_eq!(store.get_order(placed.id).await.unwrap(), shipped);
}
