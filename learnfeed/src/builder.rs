use anyhow::{anyhow, Result};
use learnfeed_challenge::ChallengeGenerator;
use learnfeed_persist::{CommentSource, VoteSink};
use learnfeed_timeline::FeedObserver;
use learnfeed_types::FeedConfig;
use std::sync::Arc;

use crate::feed::LearnFeed;

/// Collects the collaborators a [`LearnFeed`] needs.
///
/// Nothing is looked up globally: every source, sink and generator is handed
/// in here.
pub struct LearnFeedBuilder {
    comment_source: Option<Arc<dyn CommentSource>>,
    vote_sink: Option<Arc<dyn VoteSink>>,
    challenge_generator: Option<Arc<dyn ChallengeGenerator>>,
    config: FeedConfig,
    observers: Vec<Arc<dyn FeedObserver>>,
}

impl Default for LearnFeedBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LearnFeedBuilder {
    pub fn new() -> Self {
        Self {
            comment_source: None,
            vote_sink: None,
            challenge_generator: None,
            config: FeedConfig::default(),
            observers: Vec::new(),
        }
    }

    /// Where comment pages are fetched from (required)
    pub fn comment_source(mut self, source: Arc<dyn CommentSource>) -> Self {
        self.comment_source = Some(source);
        self
    }

    /// Where votes are submitted after the local tally (required)
    pub fn vote_sink(mut self, sink: Arc<dyn VoteSink>) -> Self {
        self.vote_sink = Some(sink);
        self
    }

    /// Statement generator for new posts (required)
    pub fn challenge_generator(mut self, generator: Arc<dyn ChallengeGenerator>) -> Self {
        self.challenge_generator = Some(generator);
        self
    }

    pub fn config(mut self, config: FeedConfig) -> Self {
        self.config = config;
        self
    }

    pub fn page_size(mut self, size: usize) -> Self {
        self.config.page_size = size;
        self
    }

    pub fn observer(mut self, observer: Arc<dyn FeedObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn build(self) -> Result<LearnFeed> {
        let comment_source = self
            .comment_source
            .ok_or_else(|| anyhow!("comment_source is required"))?;
        let vote_sink = self
            .vote_sink
            .ok_or_else(|| anyhow!("vote_sink is required"))?;
        let challenge_generator = self
            .challenge_generator
            .ok_or_else(|| anyhow!("challenge_generator is required"))?;

        Ok(LearnFeed::new(
            comment_source,
            vote_sink,
            challenge_generator,
            self.config,
            self.observers,
        ))
    }
}
