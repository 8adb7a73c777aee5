// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod analyzer;
pub mod config;
pub mod error;
pub mod fetch;
pub mod persist;
pub mod pipeline;
pub mod prompt;
pub mod tag;

// ---- Re-exports for stable public API ----
pub use crate::analyzer::{analyze, analyze_with_top_n, ContentStats};
pub use crate::config::TaggerConfig;
pub use crate::error::Error;
pub use crate::fetch::{fetch, FetchedContent, Source};
pub use crate::persist::JsonStore;
pub use crate::pipeline::{AnalysisResult, Pipeline, SCHEMA_VERSION};
pub use crate::prompt::PromptStore;
pub use crate::tag::{AutoTagger, Tag, TagCategory, TagSet};
