use learnfeed_types::{Discussion, DiscussionPage, FeedEvent, PageMode, Post, PostId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::feed::FeedKind;
use crate::observer::FeedObserver;

/// Point-in-time copy of every feed, for pull-based consumers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimelineSnapshot {
    pub feeds: BTreeMap<FeedKind, Vec<Post>>,
}

impl TimelineSnapshot {
    pub fn posts(&self, feed: FeedKind) -> &[Post] {
        self.feeds.get(&feed).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Owner of the posts shown in each feed.
///
/// All mutation is keyed by post id and applied to every copy of that post, so
/// a post listed in two feeds never drifts. Observers are notified after each
/// change.
#[derive(Default)]
pub struct Timeline {
    feeds: BTreeMap<FeedKind, Vec<Post>>,
    observers: Vec<Arc<dyn FeedObserver>>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Arc<dyn FeedObserver>) {
        self.observers.push(observer);
    }

    fn notify(&self, event: FeedEvent) {
        for observer in &self.observers {
            observer.on_event(&event);
        }
    }

    /// Appends a post to a feed. A post already in that feed is replaced in place.
    pub fn push(&mut self, feed: FeedKind, post: Post) {
        let post_id = post.id();
        let posts = self.feeds.entry(feed).or_default();
        match posts.iter_mut().find(|p| p.id() == post_id) {
            Some(existing) => *existing = post,
            None => {
                posts.push(post);
                self.notify(FeedEvent::PostAdded {
                    post_id,
                    feed: feed.to_string(),
                });
            }
        }
    }

    /// Puts a post at the top of a feed, moving it there if already present
    pub fn prepend(&mut self, feed: FeedKind, post: Post) {
        let post_id = post.id();
        let posts = self.feeds.entry(feed).or_default();
        let existed = posts.iter().any(|p| p.id() == post_id);
        posts.retain(|p| p.id() != post_id);
        posts.insert(0, post);
        if !existed {
            self.notify(FeedEvent::PostAdded {
                post_id,
                feed: feed.to_string(),
            });
        }
    }

    pub fn posts(&self, feed: FeedKind) -> &[Post] {
        self.feeds.get(&feed).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn post(&self, post_id: PostId) -> Option<&Post> {
        self.feeds
            .values()
            .flat_map(|posts| posts.iter())
            .find(|p| p.id() == post_id)
    }

    pub fn contains(&self, post_id: PostId) -> bool {
        self.post(post_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.feeds.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Applies `f` to every copy of the post; returns how many copies reported a change
    fn update_each<F>(&mut self, post_id: PostId, mut f: F) -> usize
    where
        F: FnMut(&mut Post) -> bool,
    {
        self.feeds
            .values_mut()
            .flat_map(|posts| posts.iter_mut())
            .filter(|p| p.id() == post_id)
            .fold(0, |changed, post| changed + usize::from(f(post)))
    }

    /// Records a vote on the post's challenge.
    ///
    /// Returns `false` unless a tally actually changed.
    pub fn vote(&mut self, post_id: PostId, is_correct: bool) -> bool {
        if self.update_each(post_id, |post| post.vote(is_correct)) == 0 {
            tracing::debug!(post_id = %post_id, "vote ignored: no challenge or tally saturated");
            return false;
        }

        if let Some(challenge) = self.post(post_id).and_then(|p| p.ai_challenge()) {
            let event = FeedEvent::VoteRecorded {
                post_id,
                outcome: is_correct.into(),
                correct_votes: challenge.correct_votes(),
                incorrect_votes: challenge.incorrect_votes(),
            };
            self.notify(event);
        }
        true
    }

    /// Merges a fetched comment page into the post
    pub fn apply_page(&mut self, post_id: PostId, page: DiscussionPage, mode: PageMode) -> bool {
        let updated = self.update_each(post_id, |post| {
            post.apply_page(page.clone(), mode);
            true
        });
        if updated == 0 {
            tracing::debug!(post_id = %post_id, "page dropped: post not in timeline");
            return false;
        }
        self.notify_discussions(post_id, Some(mode));
        true
    }

    /// Inserts a locally written comment into the post
    pub fn add_local_discussion(&mut self, post_id: PostId, discussion: Discussion) -> bool {
        if self.update_each(post_id, |post| post.add_local_discussion(discussion.clone())) == 0 {
            return false;
        }
        self.notify_discussions(post_id, None);
        true
    }

    fn notify_discussions(&self, post_id: PostId, mode: Option<PageMode>) {
        if let Some(post) = self.post(post_id) {
            let event = FeedEvent::DiscussionsUpdated {
                post_id,
                mode,
                held: post.discussions().len(),
                comment_count: post.comment_count(),
                pagination: post.pagination_state(),
            };
            self.notify(event);
        }
    }

    /// Reconciles a locally created post with the id the server gave it
    pub fn assign_server_id(&mut self, post_id: PostId, server_id: impl Into<String>) -> bool {
        let server_id = server_id.into();
        if let Some(previous) = self.post(post_id).and_then(|p| p.server_id()) {
            if previous != server_id {
                tracing::warn!(
                    post_id = %post_id,
                    previous,
                    server_id = %server_id,
                    "overwriting server id"
                );
            }
        }

        if self.update_each(post_id, |post| post.assign_server_id(server_id.clone())) == 0 {
            return false;
        }
        self.notify(FeedEvent::ServerIdAssigned { post_id, server_id });
        true
    }

    /// Drops the post from every feed; returns how many copies were removed
    pub fn remove(&mut self, post_id: PostId) -> usize {
        let mut removed = 0;
        for posts in self.feeds.values_mut() {
            let before = posts.len();
            posts.retain(|p| p.id() != post_id);
            removed += before - posts.len();
        }
        if removed > 0 {
            self.notify(FeedEvent::PostRemoved { post_id });
        }
        removed
    }

    pub fn snapshot(&self) -> TimelineSnapshot {
        TimelineSnapshot {
            feeds: self.feeds.clone(),
        }
    }
}
