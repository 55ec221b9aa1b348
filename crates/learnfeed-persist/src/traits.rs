use async_trait::async_trait;
use learnfeed_types::{ChallengeId, Cursor, Discussion, DiscussionPage, Post, PostId, VoteOutcome};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Identity of a post as a comment source needs it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostRef {
    pub id: PostId,
    pub server_id: Option<String>,
}

impl From<&Post> for PostRef {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id(),
            server_id: post.server_id().map(str::to_string),
        }
    }
}

/// Where comment pages come from.
///
/// Implementations own the meaning of cursors; callers only pass back what
/// they were given.
#[async_trait]
pub trait CommentSource: Send + Sync {
    /// Fetch up to `limit` comments starting at `cursor` (`None` = first page)
    async fn fetch_page(
        &self,
        post: &PostRef,
        cursor: Option<&Cursor>,
        limit: usize,
    ) -> Result<DiscussionPage>;

    /// Store a new comment and return the stored record (with its server id)
    async fn post_comment(&self, discussion: Discussion) -> Result<Discussion>;
}

/// Server half of voting; the local tally is updated before this is called
#[async_trait]
pub trait VoteSink: Send + Sync {
    async fn submit_vote(&self, challenge_id: ChallengeId, outcome: VoteOutcome) -> Result<()>;
}
