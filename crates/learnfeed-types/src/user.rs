use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use crate::ids::UserId;

/// A member of the feed.
///
/// Profile fields and the follow flag are the only mutable parts; identity is
/// fixed for the lifetime of the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    server_id: Option<String>,
    name: String,
    bio: String,
    streak_days: u32,
    total_posts: u32,
    is_followed: bool,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            server_id: None,
            name: name.into(),
            bio: String::new(),
            streak_days: 0,
            total_posts: 0,
            is_followed: false,
        }
    }

    pub fn with_server_id(mut self, server_id: impl Into<String>) -> Self {
        self.server_id = Some(server_id.into());
        self
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }

    pub fn with_streak(mut self, days: u32) -> Self {
        self.streak_days = days;
        self
    }

    pub fn with_total_posts(mut self, total: u32) -> Self {
        self.total_posts = total;
        self
    }

    pub fn followed(mut self) -> Self {
        self.is_followed = true;
        self
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn server_id(&self) -> Option<&str> {
        self.server_id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bio(&self) -> &str {
        &self.bio
    }

    pub fn streak_days(&self) -> u32 {
        self.streak_days
    }

    pub fn total_posts(&self) -> u32 {
        self.total_posts
    }

    pub fn is_followed(&self) -> bool {
        self.is_followed
    }

    pub fn follow(&mut self) {
        self.is_followed = true;
    }

    pub fn unfollow(&mut self) {
        self.is_followed = false;
    }

    /// Flips the follow flag and returns the new value
    pub fn toggle_follow(&mut self) -> bool {
        self.is_followed = !self.is_followed;
        self.is_followed
    }

    pub fn update_profile(&mut self, name: impl Into<String>, bio: impl Into<String>) {
        self.name = name.into();
        self.bio = bio.into();
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
