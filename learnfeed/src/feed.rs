use anyhow::{anyhow, Context, Result};
use futures::future::join_all;
use learnfeed_challenge::ChallengeGenerator;
use learnfeed_persist::{CommentSource, DiscussionLoader, PageRequest, VoteSink};
use learnfeed_timeline::{FeedKind, FeedObserver, PostComposer, Timeline, TimelineSnapshot};
use learnfeed_types::{Discussion, FeedConfig, Post, PostId, User, VoteOutcome};
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Timeline plus the sources that feed it.
///
/// The timeline lock is never held across an await on a source: requests are
/// captured under the lock, fetched without it, and applied under a fresh lock.
pub struct LearnFeed {
    timeline: RwLock<Timeline>,
    composer: PostComposer,
    loader: DiscussionLoader,
    comments: Arc<dyn CommentSource>,
    votes: Arc<dyn VoteSink>,
}

impl LearnFeed {
    pub(crate) fn new(
        comments: Arc<dyn CommentSource>,
        votes: Arc<dyn VoteSink>,
        generator: Arc<dyn ChallengeGenerator>,
        config: FeedConfig,
        observers: Vec<Arc<dyn FeedObserver>>,
    ) -> Self {
        let mut timeline = Timeline::new();
        for observer in observers {
            timeline.subscribe(observer);
        }

        Self {
            timeline: RwLock::new(timeline),
            composer: PostComposer::new(generator),
            loader: DiscussionLoader::with_config(Arc::clone(&comments), config),
            comments,
            votes,
        }
    }

    pub async fn timeline(&self) -> RwLockReadGuard<'_, Timeline> {
        self.timeline.read().await
    }

    pub async fn timeline_mut(&self) -> RwLockWriteGuard<'_, Timeline> {
        self.timeline.write().await
    }

    pub async fn snapshot(&self) -> TimelineSnapshot {
        self.timeline.read().await.snapshot()
    }

    pub async fn subscribe(&self, observer: Arc<dyn FeedObserver>) {
        self.timeline.write().await.subscribe(observer);
    }

    /// Copy of the post as currently held
    pub async fn post(&self, post_id: PostId) -> Option<Post> {
        self.timeline.read().await.post(post_id).cloned()
    }

    pub fn page_size(&self) -> usize {
        self.loader.page_size()
    }

    /// Composes a post from the draft and puts it at the top of the related feed
    pub async fn submit(&self, author: User, text: &str) -> Result<Post> {
        let post = self.composer.compose(author, text).await?;
        self.timeline
            .write()
            .await
            .prepend(FeedKind::Related, post.clone());
        Ok(post)
    }

    /// Tallies the vote locally, then forwards it to the vote sink.
    ///
    /// A sink failure is logged and the local tally stays. Returns `false` when
    /// the post is unknown or has no challenge.
    pub async fn vote(&self, post_id: PostId, is_correct: bool) -> bool {
        let challenge_id = {
            let mut timeline = self.timeline.write().await;
            if !timeline.vote(post_id, is_correct) {
                return false;
            }
            timeline
                .post(post_id)
                .and_then(|p| p.ai_challenge())
                .map(|c| c.id())
        };

        if let Some(challenge_id) = challenge_id {
            let outcome = VoteOutcome::from(is_correct);
            if let Err(e) = self.votes.submit_vote(challenge_id, outcome).await {
                tracing::warn!(
                    post_id = %post_id,
                    challenge_id = %challenge_id,
                    error = %e,
                    "vote submission failed, keeping local tally"
                );
            }
        }
        true
    }

    /// Loads the first comment page unless the post already has one.
    ///
    /// Returns whether a page was applied.
    pub async fn open_discussion(&self, post_id: PostId) -> Result<bool> {
        let request = {
            let timeline = self.timeline.read().await;
            let post = lookup(&timeline, post_id)?;
            if post.is_discussions_loaded() {
                return Ok(false);
            }
            PageRequest::refresh(post)
        };
        self.run(post_id, request).await
    }

    /// Appends the next comment page. `Ok(false)` once the thread is exhausted,
    /// or when a refresh replaced the window while the page was in flight.
    pub async fn load_more(&self, post_id: PostId) -> Result<bool> {
        let request = {
            let timeline = self.timeline.read().await;
            PageRequest::next_for(lookup(&timeline, post_id)?)
        };
        self.run(post_id, request).await
    }

    /// Reloads the first page, replacing the held window
    pub async fn refresh(&self, post_id: PostId) -> Result<bool> {
        let request = {
            let timeline = self.timeline.read().await;
            PageRequest::refresh(lookup(&timeline, post_id)?)
        };
        self.run(post_id, request).await
    }

    async fn run(&self, post_id: PostId, request: PageRequest) -> Result<bool> {
        let Some(page) = self
            .loader
            .fetch(&request)
            .await
            .with_context(|| format!("Failed to load discussions for post {post_id}"))?
        else {
            return Ok(false);
        };

        let mut timeline = self.timeline.write().await;
        if let Some(post) = timeline.post(post_id) {
            if !request.still_applies_to(post) {
                tracing::debug!(post_id = %post_id, "dropping stale discussion page");
                return Ok(false);
            }
        }
        Ok(timeline.apply_page(post_id, page, request.mode()))
    }

    /// Stores a new comment with the source, then inserts the stored record locally
    pub async fn comment(&self, post_id: PostId, author: User, text: &str) -> Result<Discussion> {
        if !self.timeline.read().await.contains(post_id) {
            return Err(not_found(post_id));
        }

        let stored = self
            .comments
            .post_comment(Discussion::new(post_id, author, text.trim()))
            .await
            .context("Failed to post comment")?;

        self.timeline
            .write()
            .await
            .add_local_discussion(post_id, stored.clone());
        Ok(stored)
    }

    /// Opens the discussion of every post in a feed concurrently.
    ///
    /// Failures are logged per post; returns how many posts received a page.
    pub async fn preload(&self, feed: FeedKind) -> usize {
        let ids: Vec<PostId> = self
            .timeline
            .read()
            .await
            .posts(feed)
            .iter()
            .filter(|p| !p.is_discussions_loaded())
            .map(Post::id)
            .collect();

        let results = join_all(ids.iter().map(|id| self.open_discussion(*id))).await;

        let mut loaded = 0;
        for (post_id, result) in ids.iter().zip(results) {
            match result {
                Ok(true) => loaded += 1,
                Ok(false) => {}
                Err(e) => tracing::warn!(post_id = %post_id, error = %e, "preload failed"),
            }
        }
        tracing::debug!(feed = %feed, requested = ids.len(), loaded, "preloaded discussions");
        loaded
    }

    pub async fn assign_server_id(&self, post_id: PostId, server_id: impl Into<String>) -> bool {
        self.timeline
            .write()
            .await
            .assign_server_id(post_id, server_id)
    }
}

fn lookup(timeline: &Timeline, post_id: PostId) -> Result<&Post> {
    timeline.post(post_id).ok_or_else(|| not_found(post_id))
}

fn not_found(post_id: PostId) -> anyhow::Error {
    anyhow!("post {post_id} is not in the timeline")
}
