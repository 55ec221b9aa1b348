use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use crate::ids::{DiscussionId, PostId};
use crate::user::User;

/// A single comment on a post.
///
/// `post_id` is a lookup key, not ownership: the post holds discussions, a
/// discussion never holds its post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discussion {
    id: DiscussionId,
    server_id: Option<String>,
    post_id: PostId,
    author: User,
    text: String,
    created_at: DateTime<Utc>,
}

impl Discussion {
    pub fn new(post_id: PostId, author: User, text: impl Into<String>) -> Self {
        Self {
            id: DiscussionId::new(),
            server_id: None,
            post_id,
            author,
            text: text.into(),
            created_at: Utc::now(),
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

    pub fn id(&self) -> DiscussionId {
        self.id
    }

    pub fn server_id(&self) -> Option<&str> {
        self.server_id.as_deref()
    }

    pub fn post_id(&self) -> PostId {
        self.post_id
    }

    pub fn author(&self) -> &User {
        &self.author
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl PartialEq for Discussion {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Discussion {}

impl Hash for Discussion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
