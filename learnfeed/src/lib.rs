//! # Learnfeed
//!
//! Core of a social learning feed: people post a short summary of what they
//! learned today, receive an AI-generated statement that may be false, vote on
//! other people's statements, and discuss posts in paginated comment threads.
//!
//! ## Crates
//!
//! - **learnfeed-types**: entities and the comment-page / vote aggregation on `Post`
//! - **learnfeed-challenge**: challenge statement generation
//! - **learnfeed-persist**: comment sources, vote sinks, page loading
//! - **learnfeed-timeline**: feeds, change notification, post submission
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use learnfeed::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let feed = LearnFeedBuilder::new()
//!         .comment_source(Arc::new(InMemoryCommentStore::new()))
//!         .vote_sink(Arc::new(InMemoryVoteLog::new()))
//!         .challenge_generator(Arc::new(KeywordChallengeGenerator::new()))
//!         .build()?;
//!
//!     let post = feed.submit(User::new("Tanaka"), "Reviewed SQL JOINs.").await?;
//!     feed.vote(post.id(), false).await;
//!     feed.open_discussion(post.id()).await?;
//!     Ok(())
//! }
//! ```

pub use learnfeed_types as types;
pub use learnfeed_challenge as challenge;
pub use learnfeed_persist as persist;
pub use learnfeed_timeline as timeline;

pub use learnfeed_types::{AIChallenge, Discussion, FeedEvent, Post, PostId, User};
pub use learnfeed_timeline::{FeedKind, Timeline};

/// High-level builder wiring explicit dependencies into a [`LearnFeed`]
pub mod builder;
mod feed;

pub use builder::LearnFeedBuilder;
pub use feed::LearnFeed;

/// Convenient prelude with commonly used types
pub mod prelude {
    pub use crate::builder::LearnFeedBuilder;
    pub use crate::feed::LearnFeed;
    pub use crate::challenge::{ChallengeGenerator, KeywordChallengeGenerator};
    pub use crate::persist::{CommentSource, InMemoryCommentStore, InMemoryVoteLog, VoteSink};
    pub use crate::timeline::{FeedKind, FeedObserver, RecordingObserver};
    pub use crate::types::{AIChallenge, Discussion, FeedConfig, FeedEvent, Post, PostId, User};
    pub use anyhow::Result;
}
