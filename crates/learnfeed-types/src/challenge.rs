use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use crate::ids::ChallengeId;

/// Reader verdict on an AI statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteOutcome {
    Correct,
    Incorrect,
}

impl From<bool> for VoteOutcome {
    fn from(is_correct: bool) -> Self {
        if is_correct {
            VoteOutcome::Correct
        } else {
            VoteOutcome::Incorrect
        }
    }
}

impl VoteOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteOutcome::Correct => "correct",
            VoteOutcome::Incorrect => "incorrect",
        }
    }
}

/// AI-generated statement of uncertain truth attached to a post.
///
/// Tallies only ever grow; there is no vote retraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AIChallenge {
    id: ChallengeId,
    server_id: Option<String>,
    text: String,
    correct_votes: u32,
    incorrect_votes: u32,
}

impl AIChallenge {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: ChallengeId::new(),
            server_id: None,
            text: text.into(),
            correct_votes: 0,
            incorrect_votes: 0,
        }
    }

    /// Seeds tallies for a challenge loaded from elsewhere
    pub fn with_votes(mut self, correct: u32, incorrect: u32) -> Self {
        self.correct_votes = correct;
        self.incorrect_votes = incorrect;
        self
    }

    pub fn with_server_id(mut self, server_id: impl Into<String>) -> Self {
        self.server_id = Some(server_id.into());
        self
    }

    pub fn id(&self) -> ChallengeId {
        self.id
    }

    pub fn server_id(&self) -> Option<&str> {
        self.server_id.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn correct_votes(&self) -> u32 {
        self.correct_votes
    }

    pub fn incorrect_votes(&self) -> u32 {
        self.incorrect_votes
    }

    /// Adds exactly one vote to the matching tally.
    ///
    /// Returns `false` if the tally is already at `u32::MAX`.
    pub fn vote(&mut self, outcome: VoteOutcome) -> bool {
        let tally = match outcome {
            VoteOutcome::Correct => &mut self.correct_votes,
            VoteOutcome::Incorrect => &mut self.incorrect_votes,
        };
        match tally.checked_add(1) {
            Some(next) => {
                *tally = next;
                true
            }
            None => false,
        }
    }

    pub fn total_votes(&self) -> u64 {
        u64::from(self.correct_votes) + u64::from(self.incorrect_votes)
    }

    /// Share of "correct" votes, `None` until someone has voted
    pub fn correct_ratio(&self) -> Option<f64> {
        match self.total_votes() {
            0 => None,
            total => Some(f64::from(self.correct_votes) / total as f64),
        }
    }
}

impl PartialEq for AIChallenge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AIChallenge {}

impl Hash for AIChallenge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
