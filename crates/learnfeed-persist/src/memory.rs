use async_trait::async_trait;
use learnfeed_types::{ChallengeId, Cursor, Discussion, DiscussionPage, PostId, VoteOutcome};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::{Result, StoreError, MAX_COMMENT_CHARS};
use crate::traits::{CommentSource, PostRef, VoteSink};

#[derive(Default)]
struct StoreInner {
    /// Comments per post, oldest first
    comments: HashMap<PostId, Vec<Discussion>>,
    /// Minted cursor token -> (post, offset of the next item)
    cursors: HashMap<String, (PostId, usize)>,
    /// Reverse index so a position is only ever minted once
    issued: HashMap<(PostId, usize), String>,
    next_cursor_seq: u64,
    next_comment_seq: u64,
}

impl StoreInner {
    fn insert(&mut self, discussion: Discussion) {
        let list = self.comments.entry(discussion.post_id()).or_default();
        // After any comment with the same timestamp
        let at = list.partition_point(|d| d.created_at() <= discussion.created_at());
        list.insert(at, discussion);
    }

    fn mint_cursor(&mut self, post_id: PostId, offset: usize) -> Cursor {
        if let Some(token) = self.issued.get(&(post_id, offset)) {
            return Cursor::new(token.clone());
        }
        self.next_cursor_seq += 1;
        let token = format!("cur-{}", self.next_cursor_seq);
        self.cursors.insert(token.clone(), (post_id, offset));
        self.issued.insert((post_id, offset), token.clone());
        Cursor::new(token)
    }
}

/// Comment source backed by process memory.
///
/// Stands in for the comment API in demos and tests. Every page reports the
/// full comment total.
#[derive(Default)]
pub struct InMemoryCommentStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryCommentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads existing comments without validation or server-id assignment
    pub async fn seed(&self, discussions: impl IntoIterator<Item = Discussion>) {
        let mut inner = self.inner.write().await;
        for discussion in discussions {
            inner.insert(discussion);
        }
    }

    pub async fn count(&self, post_id: PostId) -> usize {
        self.inner
            .read()
            .await
            .comments
            .get(&post_id)
            .map_or(0, Vec::len)
    }

    /// Number of distinct cursor tokens handed out so far
    pub async fn cursor_count(&self) -> usize {
        self.inner.read().await.cursors.len()
    }
}

#[async_trait]
impl CommentSource for InMemoryCommentStore {
    async fn fetch_page(
        &self,
        post: &PostRef,
        cursor: Option<&Cursor>,
        limit: usize,
    ) -> Result<DiscussionPage> {
        let mut inner = self.inner.write().await;

        let offset = match cursor {
            None => 0,
            Some(cursor) => match inner.cursors.get(cursor.as_str()) {
                Some((post_id, offset)) if *post_id == post.id => *offset,
                _ => return Err(StoreError::InvalidCursor(cursor.to_string())),
            },
        };

        let (items, total) = match inner.comments.get(&post.id) {
            Some(list) => {
                let start = offset.min(list.len());
                let end = start.saturating_add(limit.max(1)).min(list.len());
                (list[start..end].to_vec(), list.len())
            }
            None => (Vec::new(), 0),
        };

        let next_offset = offset + items.len();
        let next_cursor = if next_offset < total {
            Some(inner.mint_cursor(post.id, next_offset))
        } else {
            None
        };

        tracing::debug!(
            post_id = %post.id,
            offset,
            returned = items.len(),
            total,
            "served comment page"
        );

        Ok(DiscussionPage {
            items,
            next_cursor,
            total_count: Some(u32::try_from(total).unwrap_or(u32::MAX)),
        })
    }

    async fn post_comment(&self, discussion: Discussion) -> Result<Discussion> {
        let body = discussion.text().trim();
        if body.is_empty() {
            return Err(StoreError::EmptyComment);
        }
        let len = body.chars().count();
        if len > MAX_COMMENT_CHARS {
            return Err(StoreError::CommentTooLong {
                len,
                max: MAX_COMMENT_CHARS,
            });
        }

        let mut inner = self.inner.write().await;
        inner.next_comment_seq += 1;
        let stored = discussion.with_server_id(format!("c-{}", inner.next_comment_seq));
        inner.insert(stored.clone());

        tracing::debug!(
            post_id = %stored.post_id(),
            discussion_id = %stored.id(),
            "stored comment"
        );
        Ok(stored)
    }
}

/// Vote sink that records submissions in memory
#[derive(Default)]
pub struct InMemoryVoteLog {
    votes: RwLock<Vec<(ChallengeId, VoteOutcome)>>,
}

impl InMemoryVoteLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// (correct, incorrect) submissions for a challenge
    pub async fn counts(&self, challenge_id: ChallengeId) -> (u32, u32) {
        self.votes
            .read()
            .await
            .iter()
            .filter(|(id, _)| *id == challenge_id)
            .fold((0, 0), |(correct, incorrect), (_, outcome)| match outcome {
                VoteOutcome::Correct => (correct + 1, incorrect),
                VoteOutcome::Incorrect => (correct, incorrect + 1),
            })
    }

    pub async fn len(&self) -> usize {
        self.votes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.votes.read().await.is_empty()
    }
}

#[async_trait]
impl VoteSink for InMemoryVoteLog {
    async fn submit_vote(&self, challenge_id: ChallengeId, outcome: VoteOutcome) -> Result<()> {
        self.votes.write().await.push((challenge_id, outcome));
        Ok(())
    }
}
