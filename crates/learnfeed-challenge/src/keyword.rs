use anyhow::Result;
use async_trait::async_trait;

use crate::config::ChallengeConfig;
use crate::traits::ChallengeGenerator;

const CROSS_VALIDATION_STATEMENT: &str =
    "k-分割交差検証ではデータ分割後に1回だけ学習すれば十分です。";
const DECORATOR_STATEMENT: &str =
    "Pythonのデコレータは実行時に元の関数を上書きできないため、ログ追加は不可能です。";
const JOIN_STATEMENT: &str = "LEFT JOIN と RIGHT JOIN は同じ結果になるため使い分けは不要です。";

/// Number of leading characters quoted by the fallback statement
const FALLBACK_PREFIX_CHARS: usize = 10;

/// Deterministic stand-in for on-device inference.
///
/// Matches a few known topics and otherwise quotes the start of the summary in
/// an over-general claim.
#[derive(Debug, Clone, Default)]
pub struct KeywordChallengeGenerator {
    config: ChallengeConfig,
}

impl KeywordChallengeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ChallengeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChallengeConfig {
        &self.config
    }

    fn statement_for(summary: &str) -> String {
        let lower = summary.to_lowercase();

        if summary.contains("交差検証") || lower.contains("cross-validation") {
            return CROSS_VALIDATION_STATEMENT.to_string();
        }
        if lower.contains("decorator") || summary.contains("デコレータ") {
            return DECORATOR_STATEMENT.to_string();
        }
        if lower.contains("join") {
            return JOIN_STATEMENT.to_string();
        }

        let prefix: String = summary.chars().take(FALLBACK_PREFIX_CHARS).collect();
        format!("{}… に関して、常に成り立つ法則があります。例外は存在しません。", prefix)
    }
}

#[async_trait]
impl ChallengeGenerator for KeywordChallengeGenerator {
    async fn generate(&self, summary: &str) -> Result<String> {
        let statement = Self::statement_for(summary);
        tracing::debug!(
            model = %self.config.model,
            summary_chars = summary.chars().count(),
            "generated challenge statement"
        );
        Ok(statement)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
