use serde::{Deserialize, Serialize};

use crate::challenge::VoteOutcome;
use crate::ids::PostId;
use crate::page::{PageMode, PaginationState};

/// Change notifications emitted by whatever owns a set of posts.
///
/// Observers get enough to refresh a view; they pull the post itself for
/// anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedEvent {
    /// A post entered a feed
    PostAdded {
        post_id: PostId,
        feed: String,
    },

    /// A post left every feed
    PostRemoved {
        post_id: PostId,
    },

    /// A vote landed on the post's challenge
    VoteRecorded {
        post_id: PostId,
        outcome: VoteOutcome,
        correct_votes: u32,
        incorrect_votes: u32,
    },

    /// The local comment window changed
    DiscussionsUpdated {
        post_id: PostId,
        #[serde(skip_serializing_if = "Option::is_none")]
        mode: Option<PageMode>,
        held: usize,
        comment_count: u32,
        pagination: PaginationState,
    },

    /// The server acknowledged the post under a new id
    ServerIdAssigned {
        post_id: PostId,
        server_id: String,
    },
}

impl FeedEvent {
    pub fn post_id(&self) -> PostId {
        match self {
            FeedEvent::PostAdded { post_id, .. }
            | FeedEvent::PostRemoved { post_id }
            | FeedEvent::VoteRecorded { post_id, .. }
            | FeedEvent::DiscussionsUpdated { post_id, .. }
            | FeedEvent::ServerIdAssigned { post_id, .. } => *post_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_is_tagged() {
        let event = FeedEvent::PostRemoved { post_id: PostId::new() };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "post_removed");
    }
}
