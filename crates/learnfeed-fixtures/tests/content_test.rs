use learnfeed_fixtures::{DemoContent, FILLER_COMMENTS};
use learnfeed_persist::{DiscussionLoader, InMemoryCommentStore};
use learnfeed_timeline::{FeedKind, Timeline};
use learnfeed_types::FeedConfig;
use std::sync::Arc;

#[test]
fn test_feeds_are_populated() {
    let content = DemoContent::generate();
    assert_eq!(content.users.len(), 6);
    assert_eq!(content.related.len(), 10);
    assert!(content.related.iter().all(|p| p.ai_challenge().is_some()));
    assert!(content.following.iter().all(|p| p.ai_challenge().is_none()));

    let mut timeline = Timeline::new();
    content.install(&mut timeline);
    assert_eq!(timeline.posts(FeedKind::Related).len(), 10);
    assert_eq!(timeline.posts(FeedKind::Following).len(), 5);
    assert_eq!(timeline.posts(FeedKind::Trending).len(), 5);
}

#[test]
fn test_posts_start_unloaded_with_server_counts() {
    let content = DemoContent::generate();
    let first = &content.related[0];
    assert!(!first.is_discussions_loaded());
    assert!(first.discussions().is_empty());
    assert_eq!(first.comment_count() as usize, 3 + FILLER_COMMENTS);
    assert!(first.server_id().is_some());
}

#[tokio::test]
async fn test_first_post_spans_multiple_pages() {
    let content = DemoContent::generate();
    let store = Arc::new(InMemoryCommentStore::new());
    content.seed_comments(&store).await;

    let loader = DiscussionLoader::with_config(store, FeedConfig::default());
    let mut post = content.related[0].clone();
    loader.load_first_page(&mut post).await.unwrap();

    assert!(post.has_more_discussions());
    assert_eq!(post.discussions()[0].text(), "k回繰り返して平均化するのが一般的です。");

    loader.load_next_page(&mut post).await.unwrap();
    assert_eq!(post.discussions().len(), 3 + FILLER_COMMENTS);
    assert!(!post.has_more_discussions());
}
