use serde::{Deserialize, Serialize};
use std::fmt;

/// Which list a post is shown in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    /// Posts paired with a challenge, one per screen
    Related,
    Following,
    Trending,
}

impl FeedKind {
    pub const ALL: [FeedKind; 3] = [FeedKind::Related, FeedKind::Following, FeedKind::Trending];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedKind::Related => "related",
            FeedKind::Following => "following",
            FeedKind::Trending => "trending",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
