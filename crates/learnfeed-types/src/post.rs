use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use crate::challenge::{AIChallenge, VoteOutcome};
use crate::discussion::Discussion;
use crate::ids::{DiscussionId, PostId};
use crate::page::{Cursor, DiscussionPage, PageMode, PaginationState};
use crate::user::User;

/// Summary length accepted by the submission workflow.
/// `Post` itself does not enforce it.
pub const SUMMARY_MAX_CHARS: usize = 200;

/// A daily-learning summary with its challenge and a window of comments.
///
/// Comment-page merging, vote tallying and comment-count reconciliation all go
/// through methods here; the fields are private so callers cannot break the
/// invariants:
///
/// - `discussions` never holds two records with the same id
/// - `is_discussions_loaded` flips to `true` on the first applied page and stays there
/// - the cursor is stored and handed back verbatim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    id: PostId,
    server_id: Option<String>,
    author: User,
    summary: String,
    created_at: DateTime<Utc>,

    like_count: u32,
    /// Server total when known, otherwise a local estimate
    comment_count: u32,

    ai_challenge: Option<AIChallenge>,

    discussions: Vec<Discussion>,
    discussion_total_count: Option<u32>,
    discussion_next_cursor: Option<Cursor>,
    is_discussions_loaded: bool,
}

impl Post {
    pub fn new(author: User, summary: impl Into<String>) -> Self {
        Self {
            id: PostId::new(),
            server_id: None,
            author,
            summary: summary.into(),
            created_at: Utc::now(),
            like_count: 0,
            comment_count: 0,
            ai_challenge: None,
            discussions: Vec::new(),
            discussion_total_count: None,
            discussion_next_cursor: None,
            is_discussions_loaded: false,
        }
    }

    pub fn with_server_id(mut self, server_id: impl Into<String>) -> Self {
        self.server_id = Some(server_id.into());
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_like_count(mut self, likes: u32) -> Self {
        self.like_count = likes;
        self
    }

    pub fn with_comment_count(mut self, comments: u32) -> Self {
        self.comment_count = comments;
        self
    }

    pub fn with_challenge(mut self, challenge: AIChallenge) -> Self {
        self.ai_challenge = Some(challenge);
        self
    }

    pub fn id(&self) -> PostId {
        self.id
    }

    pub fn server_id(&self) -> Option<&str> {
        self.server_id.as_deref()
    }

    pub fn author(&self) -> &User {
        &self.author
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn like_count(&self) -> u32 {
        self.like_count
    }

    pub fn comment_count(&self) -> u32 {
        self.comment_count
    }

    pub fn ai_challenge(&self) -> Option<&AIChallenge> {
        self.ai_challenge.as_ref()
    }

    pub fn discussions(&self) -> &[Discussion] {
        &self.discussions
    }

    pub fn discussion(&self, id: DiscussionId) -> Option<&Discussion> {
        self.discussions.iter().find(|d| d.id() == id)
    }

    pub fn discussion_total_count(&self) -> Option<u32> {
        self.discussion_total_count
    }

    pub fn discussion_next_cursor(&self) -> Option<&Cursor> {
        self.discussion_next_cursor.as_ref()
    }

    pub fn is_discussions_loaded(&self) -> bool {
        self.is_discussions_loaded
    }

    pub fn pagination_state(&self) -> PaginationState {
        if self.is_discussions_loaded {
            PaginationState::Loaded {
                has_more: self.discussion_next_cursor.is_some(),
            }
        } else {
            PaginationState::NotLoaded
        }
    }

    pub fn has_more_discussions(&self) -> bool {
        self.pagination_state().has_more()
    }

    /// Comment count for display: never below what is held locally
    pub fn reconciled_comment_count(&self) -> u32 {
        let held = u32::try_from(self.discussions.len()).unwrap_or(u32::MAX);
        held.max(self.discussion_total_count.unwrap_or(self.comment_count))
    }

    /// Merges the next comment page into the local window.
    ///
    /// Items whose id is already held are dropped; the rest keep their order and
    /// land after everything held so far. The cursor is always overwritten
    /// (absent means no more pages). A present `total_count` overwrites the stored
    /// total and `comment_count`. Returns how many items were added.
    pub fn append_discussion_page(
        &mut self,
        items: Vec<Discussion>,
        next_cursor: Option<Cursor>,
        total_count: Option<u32>,
    ) -> usize {
        let mut seen: HashSet<DiscussionId> = self.discussions.iter().map(|d| d.id()).collect();
        let offered = items.len();
        let before = self.discussions.len();

        self.discussions
            .extend(items.into_iter().filter(|d| seen.insert(d.id())));
        let added = self.discussions.len() - before;

        tracing::trace!(
            post_id = %self.id,
            offered,
            added,
            "appended discussion page"
        );

        self.apply_page_bookkeeping(next_cursor, total_count);
        added
    }

    /// Replaces the local window with an authoritative first page.
    ///
    /// Prior discussions are discarded without merging. Bookkeeping follows the
    /// same rules as [`Post::append_discussion_page`].
    pub fn replace_discussions(
        &mut self,
        items: Vec<Discussion>,
        next_cursor: Option<Cursor>,
        total_count: Option<u32>,
    ) {
        let mut seen = HashSet::with_capacity(items.len());
        self.discussions = items.into_iter().filter(|d| seen.insert(d.id())).collect();

        tracing::trace!(
            post_id = %self.id,
            held = self.discussions.len(),
            "replaced discussions"
        );

        self.apply_page_bookkeeping(next_cursor, total_count);
    }

    /// Applies a page with the given merge mode
    pub fn apply_page(&mut self, page: DiscussionPage, mode: PageMode) {
        let DiscussionPage {
            items,
            next_cursor,
            total_count,
        } = page;
        match mode {
            PageMode::Append => {
                self.append_discussion_page(items, next_cursor, total_count);
            }
            PageMode::Replace => self.replace_discussions(items, next_cursor, total_count),
        }
    }

    fn apply_page_bookkeeping(&mut self, next_cursor: Option<Cursor>, total_count: Option<u32>) {
        self.discussion_next_cursor = next_cursor;
        if let Some(total) = total_count {
            self.discussion_total_count = Some(total);
            self.comment_count = total;
        }
        self.is_discussions_loaded = true;
    }

    /// Inserts a comment written on this device ahead of any server round trip.
    ///
    /// Returns `false` without touching the post if the id is already held or the
    /// discussion belongs to another post.
    pub fn add_local_discussion(&mut self, discussion: Discussion) -> bool {
        if discussion.post_id() != self.id || self.discussion(discussion.id()).is_some() {
            return false;
        }

        self.discussions.push(discussion);
        let held = u32::try_from(self.discussions.len()).unwrap_or(u32::MAX);
        self.comment_count = self.comment_count.saturating_add(1).max(held);
        if let Some(total) = self.discussion_total_count.as_mut() {
            *total = total.saturating_add(1);
        }
        true
    }

    /// Records a vote on the attached challenge.
    ///
    /// Returns whether a tally changed: `false` when the post has no challenge
    /// or the tally is saturated.
    pub fn vote(&mut self, is_correct: bool) -> bool {
        self.ai_challenge
            .as_mut()
            .is_some_and(|challenge| challenge.vote(VoteOutcome::from(is_correct)))
    }

    /// Attaches the identity the server assigned to this post.
    ///
    /// The local id never changes. Returns `false` if the same server id was
    /// already set.
    pub fn assign_server_id(&mut self, server_id: impl Into<String>) -> bool {
        let server_id = server_id.into();
        if self.server_id.as_deref() == Some(server_id.as_str()) {
            return false;
        }
        self.server_id = Some(server_id);
        true
    }
}

impl PartialEq for Post {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Post {}

impl Hash for Post {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_with(discussions: usize) -> Post {
        let mut post = Post::new(User::new("Sato"), "Cross-validation basics");
        for i in 0..discussions {
            let d = Discussion::new(post.id(), User::new("Suzuki"), format!("comment {}", i));
            post.discussions.push(d);
        }
        post
    }

    #[test]
    fn test_new_post_is_not_loaded() {
        let post = post_with(0);
        assert_eq!(post.pagination_state(), PaginationState::NotLoaded);
        assert!(!post.has_more_discussions());
        assert_eq!(post.comment_count(), 0);
    }

    #[test]
    fn test_in_page_duplicates_are_dropped() {
        let mut post = post_with(0);
        let d = Discussion::new(post.id(), User::new("Ito"), "dup");
        let added = post.append_discussion_page(vec![d.clone(), d.clone()], None, None);
        assert_eq!(added, 1);
        assert_eq!(post.discussions().len(), 1);

        post.replace_discussions(vec![d.clone(), d], None, None);
        assert_eq!(post.discussions().len(), 1);
    }

    #[test]
    fn test_missing_total_keeps_previous_total() {
        let mut post = post_with(0).with_comment_count(4);
        post.append_discussion_page(vec![], Some(Cursor::from("a")), Some(9));
        post.append_discussion_page(vec![], None, None);
        assert_eq!(post.discussion_total_count(), Some(9));
        assert_eq!(post.comment_count(), 9);
        assert_eq!(post.discussion_next_cursor(), None);
    }

    #[test]
    fn test_replace_without_total_keeps_previous_total() {
        let mut post = post_with(0).with_comment_count(4);
        post.append_discussion_page(vec![], Some(Cursor::from("a")), Some(9));
        post.replace_discussions(vec![], None, None);
        assert_eq!(post.discussion_total_count(), Some(9));
        assert_eq!(post.comment_count(), 9);
        assert!(post.discussions().is_empty());
        assert_eq!(post.pagination_state(), PaginationState::Loaded { has_more: false });
    }

    #[test]
    fn test_vote_at_saturated_tally_reports_no_change() {
        let mut post = post_with(0).with_challenge(AIChallenge::new("x").with_votes(u32::MAX, 2));
        assert!(!post.vote(true));
        assert!(post.vote(false));
        let challenge = post.ai_challenge().unwrap();
        assert_eq!(challenge.correct_votes(), u32::MAX);
        assert_eq!(challenge.incorrect_votes(), 3);
    }

    #[test]
    fn test_reconciled_count_never_below_held() {
        let mut post = post_with(3);
        post.append_discussion_page(vec![], None, Some(1));
        assert_eq!(post.comment_count(), 1);
        assert_eq!(post.reconciled_comment_count(), 3);
    }

    #[test]
    fn test_add_local_discussion_rejects_foreign_post() {
        let mut post = post_with(0);
        let foreign = Discussion::new(PostId::new(), User::new("Ito"), "elsewhere");
        assert!(!post.add_local_discussion(foreign));
        assert!(post.discussions().is_empty());
    }
}
