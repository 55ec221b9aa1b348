pub mod config;
pub mod logging;

pub use config::{Config, LoggingConfig};
pub use logging::init_logging;
