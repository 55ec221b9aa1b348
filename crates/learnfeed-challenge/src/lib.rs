pub mod traits;
pub mod keyword;
pub mod config;

pub use traits::ChallengeGenerator;
pub use keyword::KeywordChallengeGenerator;
pub use config::ChallengeConfig;
