use thiserror::Error;

/// Longest comment body a source accepts
pub const MAX_COMMENT_CHARS: usize = 1000;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),

    #[error("Comment body is empty")]
    EmptyComment,

    #[error("Comment too long: {len} characters (max {max})")]
    CommentTooLong { len: usize, max: usize },

    #[error("Backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
