use chrono::{Duration, Utc};
use learnfeed_persist::{
    CommentSource, DiscussionLoader, InMemoryCommentStore, InMemoryVoteLog, PageRequest, PostRef,
    StoreError, VoteSink, MAX_COMMENT_CHARS,
};
use learnfeed_types::{
    AIChallenge, Cursor, Discussion, FeedConfig, PaginationState, Post, User, VoteOutcome,
};
use std::sync::Arc;

fn make_post() -> Post {
    Post::new(User::new("Tanaka Taro"), "Learned eigenvalues and diagonalization.")
}

async fn seeded_store(post: &Post, n: usize) -> (Arc<InMemoryCommentStore>, Vec<Discussion>) {
    let start = Utc::now() - Duration::minutes(n as i64);
    let comments: Vec<Discussion> = (0..n)
        .map(|i| {
            Discussion::new(post.id(), User::new("Suzuki"), format!("comment {}", i))
                .with_created_at(start + Duration::minutes(i as i64))
        })
        .collect();
    let store = Arc::new(InMemoryCommentStore::new());
    store.seed(comments.clone()).await;
    (store, comments)
}

#[tokio::test]
async fn test_pages_through_all_comments() {
    let mut post = make_post();
    let (store, comments) = seeded_store(&post, 5).await;
    let loader = DiscussionLoader::with_config(store, FeedConfig::new().with_page_size(2));

    assert!(loader.load_next_page(&mut post).await.unwrap());
    assert_eq!(post.discussions().len(), 2);
    assert_eq!(post.pagination_state(), PaginationState::Loaded { has_more: true });
    assert_eq!(post.comment_count(), 5);

    assert!(loader.load_next_page(&mut post).await.unwrap());
    assert!(loader.load_next_page(&mut post).await.unwrap());
    assert_eq!(post.pagination_state(), PaginationState::Loaded { has_more: false });

    // Nothing left
    assert!(!loader.load_next_page(&mut post).await.unwrap());

    let held: Vec<_> = post.discussions().iter().map(|d| d.id()).collect();
    let expected: Vec<_> = comments.iter().map(|d| d.id()).collect();
    assert_eq!(held, expected);
}

#[tokio::test]
async fn test_refresh_replaces_window() {
    let mut post = make_post();
    let (store, _) = seeded_store(&post, 3).await;
    let loader = DiscussionLoader::with_config(store.clone(), FeedConfig::new().with_page_size(2));

    loader.load_next_page(&mut post).await.unwrap();
    loader.load_next_page(&mut post).await.unwrap();
    assert_eq!(post.discussions().len(), 3);

    loader.refresh(&mut post).await.unwrap();
    assert_eq!(post.discussions().len(), 2);
    assert!(post.has_more_discussions());
}

#[tokio::test]
async fn test_empty_post_loads_as_empty_last_page() {
    let mut post = make_post();
    let loader = DiscussionLoader::new(Arc::new(InMemoryCommentStore::new()));

    loader.load_first_page(&mut post).await.unwrap();

    assert!(post.discussions().is_empty());
    assert_eq!(post.pagination_state(), PaginationState::Loaded { has_more: false });
    assert_eq!(post.comment_count(), 0);
}

#[tokio::test]
async fn test_page_request_follows_post_state() {
    let mut post = make_post();
    assert!(matches!(PageRequest::next_for(&post), PageRequest::First(_)));

    post.append_discussion_page(vec![], Some(Cursor::from("opaque")), None);
    match PageRequest::next_for(&post) {
        PageRequest::Next(_, cursor) => assert_eq!(cursor.as_str(), "opaque"),
        other => panic!("Expected Next, got {:?}", other),
    }

    post.append_discussion_page(vec![], None, None);
    assert_eq!(PageRequest::next_for(&post), PageRequest::Exhausted);
    assert!(matches!(PageRequest::refresh(&post), PageRequest::First(_)));
}

#[tokio::test]
async fn test_unknown_cursor_is_rejected() {
    let post = make_post();
    let store = InMemoryCommentStore::new();
    let err = store
        .fetch_page(&PostRef::from(&post), Some(&Cursor::from("forged")), 10)
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::InvalidCursor("forged".to_string()));
}

#[tokio::test]
async fn test_cursor_is_bound_to_its_post() {
    let post = make_post();
    let other = make_post();
    let (store, _) = seeded_store(&post, 3).await;

    let page = store.fetch_page(&PostRef::from(&post), None, 1).await.unwrap();
    let cursor = page.next_cursor.expect("more pages");

    let err = store
        .fetch_page(&PostRef::from(&other), Some(&cursor), 1)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidCursor(_)));
}

#[tokio::test]
async fn test_post_comment_assigns_server_id_and_validates() {
    let post = make_post();
    let store = InMemoryCommentStore::new();

    let stored = store
        .post_comment(Discussion::new(post.id(), User::new("Ito"), "Leave-One-Out is worth a look."))
        .await
        .unwrap();
    assert_eq!(stored.server_id(), Some("c-1"));
    assert_eq!(store.count(post.id()).await, 1);

    let err = store
        .post_comment(Discussion::new(post.id(), User::new("Ito"), "   "))
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::EmptyComment);

    let long = "a".repeat(MAX_COMMENT_CHARS + 1);
    let err = store
        .post_comment(Discussion::new(post.id(), User::new("Ito"), long))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::CommentTooLong {
            len: MAX_COMMENT_CHARS + 1,
            max: MAX_COMMENT_CHARS
        }
    );
}

#[tokio::test]
async fn test_comments_are_served_oldest_first() {
    let post = make_post();
    let store = InMemoryCommentStore::new();
    let now = Utc::now();
    let newer = Discussion::new(post.id(), User::new("A"), "newer").with_created_at(now);
    let older = Discussion::new(post.id(), User::new("B"), "older")
        .with_created_at(now - Duration::minutes(5));
    store.seed(vec![newer.clone(), older.clone()]).await;

    let page = store.fetch_page(&PostRef::from(&post), None, 10).await.unwrap();
    assert_eq!(page.items[0].id(), older.id());
    assert_eq!(page.items[1].id(), newer.id());
    assert_eq!(page.total_count, Some(2));
    assert!(page.is_last());
}

#[tokio::test]
async fn test_vote_log_counts_per_challenge() {
    let log = InMemoryVoteLog::new();
    let challenge = AIChallenge::new("JOINs are interchangeable.");
    let other = AIChallenge::new("Decorators cannot wrap functions.");

    log.submit_vote(challenge.id(), VoteOutcome::Correct).await.unwrap();
    log.submit_vote(challenge.id(), VoteOutcome::Incorrect).await.unwrap();
    log.submit_vote(challenge.id(), VoteOutcome::Incorrect).await.unwrap();
    log.submit_vote(other.id(), VoteOutcome::Correct).await.unwrap();

    assert_eq!(log.counts(challenge.id()).await, (1, 2));
    assert_eq!(log.counts(other.id()).await, (1, 0));
    assert_eq!(log.len().await, 4);
}

#[tokio::test]
async fn test_refetching_same_position_reuses_cursor() {
    let post = make_post();
    let (store, _) = seeded_store(&post, 5).await;
    let post_ref = PostRef::from(&post);

    let first = store.fetch_page(&post_ref, None, 2).await.unwrap();
    for _ in 0..100 {
        let again = store.fetch_page(&post_ref, None, 2).await.unwrap();
        assert_eq!(again.next_cursor, first.next_cursor);
    }
    assert_eq!(store.cursor_count().await, 1);

    let Some(cursor) = first.next_cursor else {
        panic!("first page should have a cursor");
    };
    let second = store.fetch_page(&post_ref, Some(&cursor), 2).await.unwrap();
    assert_eq!(second.items.len(), 2);
    assert_eq!(store.cursor_count().await, 2);
}

#[tokio::test]
async fn test_next_request_goes_stale_after_refresh() {
    let mut post = make_post();
    let (store, _) = seeded_store(&post, 9).await;
    let loader = DiscussionLoader::with_config(store, FeedConfig::new().with_page_size(3));

    loader.load_next_page(&mut post).await.unwrap();
    loader.load_next_page(&mut post).await.unwrap();
    let pending = PageRequest::next_for(&post);
    assert!(pending.still_applies_to(&post));

    loader.refresh(&mut post).await.unwrap();
    assert!(!pending.still_applies_to(&post));
    assert!(PageRequest::refresh(&post).still_applies_to(&post));
}
