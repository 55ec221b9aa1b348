use anyhow::Result;
use async_trait::async_trait;
use learnfeed_types::AIChallenge;

/// Produces a statement of uncertain truth from a learning summary.
///
/// Implementations may call a remote or on-device model; callers receive the
/// generator explicitly and never reach for a shared instance.
#[async_trait]
pub trait ChallengeGenerator: Send + Sync {
    /// Generate the statement text for a summary
    async fn generate(&self, summary: &str) -> Result<String>;

    /// Name recorded alongside generated statements
    fn model_name(&self) -> &str;

    /// Generate and wrap the statement as a fresh challenge with zero votes
    async fn generate_challenge(&self, summary: &str) -> Result<AIChallenge> {
        let text = self.generate(summary).await?;
        Ok(AIChallenge::new(text))
    }
}
