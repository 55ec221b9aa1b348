use serde::{Deserialize, Serialize};
use std::fmt;

use crate::discussion::Discussion;

/// Opaque continuation token handed out by a comment source.
///
/// Only the source that minted a cursor knows what it means.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Cursor {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl From<String> for Cursor {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One page of comments as delivered by a comment source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscussionPage {
    pub items: Vec<Discussion>,
    /// `None` means there are no further pages
    pub next_cursor: Option<Cursor>,
    /// Authoritative comment total, when the source knows it
    pub total_count: Option<u32>,
}

impl DiscussionPage {
    pub fn new(items: Vec<Discussion>) -> Self {
        Self {
            items,
            next_cursor: None,
            total_count: None,
        }
    }

    pub fn with_next_cursor(mut self, cursor: impl Into<Cursor>) -> Self {
        self.next_cursor = Some(cursor.into());
        self
    }

    pub fn with_total_count(mut self, total: u32) -> Self {
        self.total_count = Some(total);
        self
    }

    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none()
    }
}

/// How a fetched page is merged into a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageMode {
    /// Incremental pagination: de-duplicate and append
    Append,
    /// Refresh from the top: the page becomes the whole local window
    Replace,
}

/// Comment pagination status of a post.
///
/// `NotLoaded` is only ever the initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PaginationState {
    NotLoaded,
    Loaded { has_more: bool },
}

impl PaginationState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, PaginationState::Loaded { .. })
    }

    pub fn has_more(&self) -> bool {
        matches!(self, PaginationState::Loaded { has_more: true })
    }
}
