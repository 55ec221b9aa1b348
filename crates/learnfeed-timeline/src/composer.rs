use learnfeed_challenge::ChallengeGenerator;
use learnfeed_types::{Post, User, SUMMARY_MAX_CHARS};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("Summary is empty")]
    EmptySummary,

    #[error("Summary too long: {len} characters (max {max})")]
    SummaryTooLong { len: usize, max: usize },

    #[error("Challenge generation failed: {0}")]
    Challenge(#[from] anyhow::Error),
}

/// Turns a drafted summary into a post with a fresh challenge attached
pub struct PostComposer {
    generator: Arc<dyn ChallengeGenerator>,
}

impl PostComposer {
    pub fn new(generator: Arc<dyn ChallengeGenerator>) -> Self {
        Self { generator }
    }

    /// Trims the draft and checks it fits the summary limit
    pub fn validate(text: &str) -> Result<&str, ComposeError> {
        let summary = text.trim();
        if summary.is_empty() {
            return Err(ComposeError::EmptySummary);
        }
        let len = summary.chars().count();
        if len > SUMMARY_MAX_CHARS {
            return Err(ComposeError::SummaryTooLong {
                len,
                max: SUMMARY_MAX_CHARS,
            });
        }
        Ok(summary)
    }

    /// Builds a new post authored by `author`.
    ///
    /// The post has a client-generated id, no server id, zero likes and comments,
    /// and a challenge with zero votes.
    pub async fn compose(&self, author: User, text: &str) -> Result<Post, ComposeError> {
        let summary = Self::validate(text)?;
        let challenge = self.generator.generate_challenge(summary).await?;

        let post = Post::new(author, summary).with_challenge(challenge);
        tracing::info!(
            post_id = %post.id(),
            model = self.generator.model_name(),
            "composed post"
        );
        Ok(post)
    }
}
