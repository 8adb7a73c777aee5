// src/tag/tagger.rs
//! Auto tagger: renders the prompt, makes exactly one provider call, and
//! decodes the reply into a validated tag set.
//!
//! The 5-step tagging procedure (region mentions → source vs target →
//! brands/categories → intent → confidence) lives in the prompt template;
//! the model performs all five steps in one request/response. This side
//! only shapes the prompt and validates the result.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::TaggerConfig;
use crate::error::Error;
use crate::prompt::PromptStore;
use crate::tag::{parse_response, Provider, TagSet};

pub struct AutoTagger {
    provider: Arc<dyn Provider>,
    prompts: PromptStore,
    confidence_threshold: f64,
    max_tags_per_category: usize,
}

impl AutoTagger {
    pub fn new(provider: Arc<dyn Provider>, prompts: PromptStore, config: &TaggerConfig) -> Self {
        Self {
            provider,
            prompts,
            confidence_threshold: config.confidence_threshold,
            max_tags_per_category: config.max_tags_per_category,
        }
    }

    /// Tag `content` with one remote call. No retry here: `RateLimit` and
    /// `Transport` surface distinctly so a caller can back off and retry.
    pub async fn tag(&self, content: &str) -> Result<TagSet, Error> {
        let prompt = self.prompts.render(content);
        debug!(provider = self.provider.name(), prompt_len = prompt.len(), "requesting tags");

        let raw = self.provider.complete(&prompt).await?;
        let mut tags = parse_response(&raw)?;
        tags.filter(self.confidence_threshold, self.max_tags_per_category);

        info!(
            provider = self.provider.name(),
            tags = tags.len(),
            "tagging complete"
        );
        Ok(tags)
    }
}
