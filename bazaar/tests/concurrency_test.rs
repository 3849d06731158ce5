//! Concurrency tests for the in-memory record store.
//!
//! These run on a multi-threaded runtime so that spawned tasks really do hit
//! the store from several threads at once.

use std::collections::HashSet;

use bazaar::{memory::InMemoryStore, prelude::*};
use futures::future::join_all;

const TASKS: usize = 64;

/// N parallel creates must produce N distinct ids covering 1..=N.
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn parallel_creates_get_distinct_contiguous_ids() {
    let store = InMemoryStore::new();

    let handles = (0..TASKS).map(|i| {
        let store = store.clone();
        tokio::spawn(async move {
            store
                .create_user(User::new(format!("user{i}"), format!("user{i}@x.com")))
                .await
                .unwrap()
                .id
                .get()
        })
    });

    let ids: HashSet<i32> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let expected: HashSet<i32> = (1..=TASKS as i32).collect();
    assert_eq!(ids, expected);
    assert_eq!(store.user_count().await, TASKS);
}

/// Racing creates with the same email: exactly one wins, and the losers
/// consume no identifiers.
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn racing_duplicate_emails_admit_exactly_one() {
    let store = InMemoryStore::new();

    let handles = (0..TASKS).map(|i| {
        let store = store.clone();
        tokio::spawn(async move {
            store
                .create_user(User::new(format!("user{i}"), "same@x.com"))
                .await
        })
    });

    let results: Vec<StoreResult<User>> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let winners: Vec<&User> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(winners.len(), 1);
    assert_eq!(winners[0].id, UserId::new(1));
    assert!(
        results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(StoreError::is_already_exists)
    );

    assert_eq!(store.user_count().await, 1);
    assert_eq!(store.next_user_id().await, UserId::new(2));
}

/// Readers running alongside writers only ever see complete records.
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn readers_never_observe_partial_updates() {
    let store = InMemoryStore::new();
    let owner = UserId::new(1);
    let listing = store
        .create_listing(Listing::new(owner, "v0", "v0", Decimal::ZERO))
        .await
        .unwrap();
    let id = listing.id;

    let writers = (1..=TASKS as i64).map(|version| {
        let store = store.clone();
        tokio::spawn(async move {
            let marker = format!("v{version}");
            store
                .update_listing(
                    id,
                    Listing::new(owner, marker.clone(), marker, Decimal::from(version)),
                )
                .await
                .unwrap();
        })
    });

    let readers = (0..TASKS).map(|_| {
        let store = store.clone();
        tokio::spawn(async move {
            let seen = store.get_listing(id).await.unwrap();
            assert_eq!(seen.title, seen.description);
            assert_eq!(seen.title, format!("v{}", seen.price));
        })
    });

    let handles: Vec<_> = writers.chain(readers).collect();
    for joined in join_all(handles).await {
        joined.unwrap();
    }

    let last = store.get_listing(id).await.unwrap();
    assert_eq!(last.created_at, listing.created_at);
}

/// Handlers can share one store by reference instead of by clone.
#[tokio::test]
async fn borrowed_store_serves_many_marketplaces() {
    let store = InMemoryStore::new();
    let first = Marketplace::new(&store);
    let second = Marketplace::new(&store);

    let (a, b) = tokio::join!(
        first.register_user("a", "a@x.com", "hash-a"),
        second.register_user("b", "b@x.com", "hash-b"),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_ne!(a.id, b.id);
    assert_eq!(
        store.get_user_password(b.id).await.unwrap().as_deref(),
        Some("hash-b")
    );
}
