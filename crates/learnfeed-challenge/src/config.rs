use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ChallengeConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = temp;
        self
    }

    pub fn with_max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = tokens;
        self
    }
}

impl Default for ChallengeConfig {
    fn default() -> Self {
        Self {
            model: "keyword-stub".to_string(),
            temperature: 0.9,
            max_tokens: 128,
        }
    }
}
