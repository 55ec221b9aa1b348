pub mod error;
pub mod traits;
pub mod memory;
pub mod loader;

pub use error::{StoreError, Result, MAX_COMMENT_CHARS};
pub use traits::{CommentSource, VoteSink, PostRef};
pub use memory::{InMemoryCommentStore, InMemoryVoteLog};
pub use loader::{DiscussionLoader, PageRequest};
