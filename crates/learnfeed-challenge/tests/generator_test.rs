use learnfeed_challenge::{ChallengeConfig, ChallengeGenerator, KeywordChallengeGenerator};
use std::sync::Arc;

#[tokio::test]
async fn test_cross_validation_topic() {
    let generator = KeywordChallengeGenerator::new();
    let text = generator.generate("交差検証の目的と手順を整理。").await.unwrap();
    assert!(text.contains("1回だけ学習すれば十分"));

    let text = generator.generate("Practiced Cross-Validation in sklearn").await.unwrap();
    assert!(text.contains("1回だけ学習すれば十分"));
}

#[tokio::test]
async fn test_decorator_and_join_topics() {
    let generator = KeywordChallengeGenerator::new();

    let text = generator.generate("Wrote a logging Decorator").await.unwrap();
    assert!(text.contains("デコレータ"));

    let text = generator.generate("SQLのJOIN句の違いを復習").await.unwrap();
    assert!(text.contains("LEFT JOIN"));
}

#[tokio::test]
async fn test_cross_validation_wins_over_join() {
    let generator = KeywordChallengeGenerator::new();
    let text = generator.generate("交差検証 and join").await.unwrap();
    assert!(text.contains("交差検証"));
}

#[tokio::test]
async fn test_generate_challenge_starts_with_zero_votes() {
    let generator: Arc<dyn ChallengeGenerator> = Arc::new(KeywordChallengeGenerator::new());
    let challenge = generator.generate_challenge("Dockerで開発環境を整備").await.unwrap();

    assert_eq!(challenge.correct_votes(), 0);
    assert_eq!(challenge.incorrect_votes(), 0);
    assert!(challenge.text().ends_with("例外は存在しません。"));
}

#[test]
fn test_config_defaults_and_builder() {
    let config = ChallengeConfig::default();
    assert_eq!(config.temperature, 0.9);
    assert_eq!(config.max_tokens, 128);

    let config = ChallengeConfig::new("local-llama").with_temperature(0.2).with_max_tokens(64);
    let generator = KeywordChallengeGenerator::with_config(config);
    assert_eq!(generator.model_name(), "local-llama");
    assert_eq!(generator.config().max_tokens, 64);
}
