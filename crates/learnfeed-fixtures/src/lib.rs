//! Demo content for Learnfeed.
//!
//! Everything here is seed data for demos and tests. Core crates never depend
//! on it.

mod content;

pub use content::{DemoContent, FILLER_COMMENTS};
