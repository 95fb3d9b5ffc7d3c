mod support;

use common::query::Collection;
use common::GalleryConfig;
use futures_util::future::join;
use futures_util::poll;
use support::{favourite, server_error, vote, Call, Harness};

#[tokio::test]
async fn loads_all_three_collections_and_merges_them() {
    let harness = Harness::new().with_images(&["a", "b"]);
    harness.gateway.favourites.borrow_mut().push(favourite(9, "b"));
    harness
        .gateway
        .votes
        .borrow_mut()
        .extend([vote("a", 1), vote("a", 1), vote("a", -1)]);

    let before = harness.cache.snapshot();
    assert!(before.loading);
    assert!(before.cards.is_empty());

    let view = harness.cache.load_all().await;

    assert!(!view.loading);
    assert!(!view.fetching);
    assert_eq!(view.error, None);
    assert_eq!(view.cards.len(), 2);

    let a = &view.cards[0];
    assert_eq!(a.id(), "a");
    assert!(!a.is_favourited);
    assert_eq!((a.upvotes, a.downvotes, a.score), (2, 1, 1));

    let b = &view.cards[1];
    assert!(b.is_favourited);
    assert_eq!(b.favourite_id, Some(9));
    assert_eq!(b.score, 0);

    assert_eq!(
        *harness.gateway.calls.borrow(),
        vec![Call::FetchImages(20), Call::FetchFavourites, Call::FetchVotes]
    );
}

#[tokio::test]
async fn empty_gallery_is_not_an_error() {
    let harness = Harness::new();

    let view = harness.cache.load_all().await;

    assert!(!view.loading);
    assert_eq!(view.error, None);
    assert!(view.cards.is_empty());
}

#[tokio::test]
async fn concurrent_readers_share_one_request() {
    let harness = Harness::new();
    let release = harness.gateway.gate_next("favourites");

    let readers = join(harness.cache.favourites(), harness.cache.favourites());
    let release_later = async move {
        tokio::task::yield_now().await;
        let _ = release.send(());
    };
    let ((first, second), ()) = join(readers, release_later).await;

    assert_eq!(first.unwrap(), second.unwrap());
    assert_eq!(harness.gateway.count(|c| *c == Call::FetchFavourites), 1);
}

#[tokio::test]
async fn fresh_data_is_served_from_cache_until_stale() {
    let harness = Harness::new().with_images(&["a"]);

    harness.cache.load_all().await;
    harness.clock.advance(60_000);
    harness.cache.load_all().await;
    assert_eq!(harness.gateway.calls.borrow().len(), 3);

    harness.clock.advance(GalleryConfig::default().stale_time_ms);
    harness.cache.load_all().await;
    assert_eq!(harness.gateway.calls.borrow().len(), 6);
}

#[tokio::test]
async fn merge_reruns_only_when_a_version_changes() {
    let harness = Harness::new().with_images(&["a"]);
    harness.cache.load_all().await;

    let first = harness.cache.snapshot().cards;
    let again = harness.cache.snapshot().cards;
    assert!(std::rc::Rc::ptr_eq(&first, &again));

    harness.gateway.votes.borrow_mut().push(vote("a", -1));
    harness.cache.invalidate(Collection::Votes);
    harness.cache.refresh_invalidated().await;

    let after = harness.cache.snapshot().cards;
    assert!(!std::rc::Rc::ptr_eq(&first, &after));
    assert_eq!(after[0].score, -1);
}

#[tokio::test]
async fn invalidation_forces_a_refetch_of_that_collection_only() {
    let harness = Harness::new().with_images(&["a"]);
    harness.cache.load_all().await;

    harness.gateway.favourites.borrow_mut().push(favourite(5, "a"));
    harness.cache.invalidate(Collection::Favourites);

    assert!(harness.cache.is_invalidated(Collection::Favourites));
    assert_eq!(harness.cache.pending_invalidations(), vec![Collection::Favourites]);
    // Stale data stays visible until the refetch lands.
    assert!(!harness.cache.snapshot().cards[0].is_favourited);

    harness.cache.refresh_invalidated().await;

    assert!(!harness.cache.is_invalidated(Collection::Favourites));
    assert!(harness.cache.snapshot().cards[0].is_favourited);
    assert_eq!(harness.gateway.count(|c| *c == Call::FetchFavourites), 2);
    assert_eq!(harness.gateway.count(|c| matches!(c, Call::FetchImages(_))), 1);
    assert_eq!(harness.gateway.count(|c| *c == Call::FetchVotes), 1);
}

#[tokio::test]
async fn transient_failures_are_retried_with_backoff() {
    let harness = Harness::new().with_images(&["a"]);
    harness.gateway.fail_next("images", server_error());
    harness.gateway.fail_next("images", server_error());

    let view = harness.cache.load_all().await;

    assert_eq!(view.error, None);
    assert_eq!(view.cards.len(), 1);
    assert_eq!(harness.gateway.count(|c| matches!(c, Call::FetchImages(_))), 3);
    assert_eq!(*harness.clock.sleeps.borrow(), vec![1000, 2000]);
}

#[tokio::test]
async fn exhausted_retries_surface_an_error_state() {
    let harness = Harness::new().with_images(&["a"]);
    for _ in 0..3 {
        harness.gateway.fail_next("votes", server_error());
    }

    let view = harness.cache.load_all().await;

    assert!(!view.loading);
    assert_eq!(view.error, Some(server_error()));
    assert!(view.cards.is_empty());
    assert_eq!(harness.gateway.count(|c| *c == Call::FetchVotes), 3);

    // A manual retry fetches again even though nothing was invalidated.
    let view = harness.cache.load_all().await;
    assert_eq!(view.error, None);
    assert_eq!(view.cards.len(), 1);
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let harness = Harness::new();
    let unauthorized = common::GalleryError::Api {
        status: 401,
        message: Some("AUTHENTICATION_ERROR".to_string()),
    };
    harness.gateway.fail_next("favourites", unauthorized.clone());

    let view = harness.cache.load_all().await;

    assert_eq!(view.error, Some(unauthorized));
    assert_eq!(harness.gateway.count(|c| *c == Call::FetchFavourites), 1);
    assert!(harness.clock.sleeps.borrow().is_empty());
}

#[tokio::test]
async fn superseded_response_is_discarded() {
    let harness = Harness::new();
    harness.gateway.favourites.borrow_mut().push(favourite(1, "a"));
    let release_old = harness.gateway.gate_next("favourites");

    let mut old = Box::pin(harness.cache.favourites());
    assert!(poll!(&mut old).is_pending());
    assert!(harness.cache.snapshot().fetching);

    *harness.gateway.favourites.borrow_mut() = vec![favourite(2, "a")];
    harness.cache.invalidate(Collection::Favourites);
    let fresh = harness.cache.favourites().await.unwrap();
    assert_eq!(fresh[0].id, Some(2));
    let version = harness.cache.status(Collection::Favourites).version;

    let _ = release_old.send(());
    let stale = old.await.unwrap();
    assert_eq!(stale[0].id, Some(1));

    let status = harness.cache.status(Collection::Favourites);
    assert_eq!(status.version, version);
    assert_eq!(harness.cache.favourites().await.unwrap()[0].id, Some(2));
}

#[tokio::test]
async fn listeners_hear_about_fetches_and_invalidations() {
    let harness = Harness::new();
    let heard = std::rc::Rc::new(std::cell::Cell::new(0));
    let counter = std::rc::Rc::clone(&heard);
    let id = harness.cache.subscribe(move || counter.set(counter.get() + 1));

    harness.cache.load_all().await;
    // One start and one commit per collection.
    assert_eq!(heard.get(), 6);

    harness.cache.invalidate(Collection::Images);
    assert_eq!(heard.get(), 7);

    harness.cache.unsubscribe(id);
    harness.cache.invalidate(Collection::Votes);
    assert_eq!(heard.get(), 7);
}
