use learnfeed_types::{Cursor, DiscussionPage, FeedConfig, PageMode, PaginationState, Post};
use std::sync::Arc;

use crate::error::Result;
use crate::traits::{CommentSource, PostRef};

/// What to fetch next for a post, captured so the post need not stay borrowed
/// across the fetch
#[derive(Debug, Clone, PartialEq)]
pub enum PageRequest {
    /// Fetch from the top and replace the local window
    First(PostRef),
    /// Fetch the page after `cursor` and append it
    Next(PostRef, Cursor),
    /// Nothing left to fetch
    Exhausted,
}

impl PageRequest {
    /// Request that continues pagination from the post's current state
    pub fn next_for(post: &Post) -> Self {
        match (post.pagination_state(), post.discussion_next_cursor()) {
            (PaginationState::NotLoaded, _) => PageRequest::First(post.into()),
            (PaginationState::Loaded { has_more: true }, Some(cursor)) => {
                PageRequest::Next(post.into(), cursor.clone())
            }
            (PaginationState::Loaded { .. }, _) => PageRequest::Exhausted,
        }
    }

    /// Request that reloads the first page regardless of state
    pub fn refresh(post: &Post) -> Self {
        PageRequest::First(post.into())
    }

    /// Whether a page fetched for this request may still be applied to `post`.
    ///
    /// An append is only valid while the post still holds the cursor it was
    /// requested with; a refresh in between makes it stale.
    pub fn still_applies_to(&self, post: &Post) -> bool {
        match self {
            PageRequest::Next(_, cursor) => post.discussion_next_cursor() == Some(cursor),
            PageRequest::First(_) | PageRequest::Exhausted => true,
        }
    }

    pub fn mode(&self) -> PageMode {
        match self {
            PageRequest::Next(..) => PageMode::Append,
            PageRequest::First(_) | PageRequest::Exhausted => PageMode::Replace,
        }
    }
}

/// Fetches comment pages from a source and applies them to posts
pub struct DiscussionLoader {
    source: Arc<dyn CommentSource>,
    config: FeedConfig,
}

impl DiscussionLoader {
    pub fn new(source: Arc<dyn CommentSource>) -> Self {
        Self {
            source,
            config: FeedConfig::default(),
        }
    }

    pub fn with_config(source: Arc<dyn CommentSource>, config: FeedConfig) -> Self {
        Self { source, config }
    }

    pub fn page_size(&self) -> usize {
        self.config.effective_page_size()
    }

    /// Runs a request against the source. `Exhausted` yields `None` without I/O.
    pub async fn fetch(&self, request: &PageRequest) -> Result<Option<DiscussionPage>> {
        let (post, cursor) = match request {
            PageRequest::First(post) => (post, None),
            PageRequest::Next(post, cursor) => (post, Some(cursor)),
            PageRequest::Exhausted => return Ok(None),
        };

        let page = self.source.fetch_page(post, cursor, self.page_size()).await?;
        tracing::debug!(
            post_id = %post.id,
            items = page.items.len(),
            has_more = page.next_cursor.is_some(),
            total = ?page.total_count,
            "fetched discussion page"
        );
        Ok(Some(page))
    }

    /// Loads the first page, replacing whatever the post held
    pub async fn load_first_page(&self, post: &mut Post) -> Result<()> {
        let request = PageRequest::refresh(post);
        if let Some(page) = self.fetch(&request).await? {
            post.apply_page(page, PageMode::Replace);
        }
        Ok(())
    }

    /// Same as [`DiscussionLoader::load_first_page`]; named for pull-to-refresh callers
    pub async fn refresh(&self, post: &mut Post) -> Result<()> {
        self.load_first_page(post).await
    }

    /// Continues pagination. Returns `false` if there was nothing left to load.
    pub async fn load_next_page(&self, post: &mut Post) -> Result<bool> {
        let request = PageRequest::next_for(post);
        match self.fetch(&request).await? {
            Some(page) => {
                post.apply_page(page, request.mode());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
