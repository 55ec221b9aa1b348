//! Entity model for Learnfeed.
//!
//! Posts, their optional AI challenge, users, and threaded discussions are plain
//! value records compared by identity. The comment-page merge and vote tally
//! logic live on [`Post`] so every owner of a post applies them the same way.

pub mod ids;
pub mod user;
pub mod challenge;
pub mod discussion;
pub mod page;
pub mod post;
pub mod events;
pub mod config;

pub use ids::{UserId, PostId, ChallengeId, DiscussionId};
pub use user::User;
pub use challenge::{AIChallenge, VoteOutcome};
pub use discussion::Discussion;
pub use page::{Cursor, DiscussionPage, PageMode, PaginationState};
pub use post::{Post, SUMMARY_MAX_CHARS};
pub use events::FeedEvent;
pub use config::{FeedConfig, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
