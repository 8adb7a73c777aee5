// src/prompt.rs
//! Prompt template store. Loads the tagging instruction template once and
//! renders it with the content body. Immutable after load, so a single
//! store can be shared across invocations without locking.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Default on-disk location of the tagging template.
pub const DEFAULT_TEMPLATE_PATH: &str = "config/prompts/tagging.txt";
/// Env override for the template path.
pub const ENV_TEMPLATE_PATH: &str = "TAGGER_PROMPT_PATH";

/// Placeholder in the template replaced by the content body.
const CONTENT_PLACEHOLDER: &str = "{{CONTENT}}";

/// Content beyond this many chars is cut before rendering; the model does
/// not need the whole page to tag it.
pub const MAX_CONTENT_CHARS: usize = 3000;

#[derive(Debug, Clone)]
pub struct PromptStore {
    template: String,
}

impl PromptStore {
    /// Load the template from `TAGGER_PROMPT_PATH` if set, else the default
    /// path. A missing template is a config defect, not a transient fault.
    pub fn from_default_location() -> Result<Self, Error> {
        let path = std::env::var(ENV_TEMPLATE_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_TEMPLATE_PATH));
        Self::load(&path)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let template = fs::read_to_string(path)
            .map_err(|e| Error::TemplateMissing(format!("{}: {e}", path.display())))?;
        Ok(Self {
            template: template.trim().to_string(),
        })
    }

    /// Build a store from an in-memory template (tests, embedding callers).
    pub fn from_template(template: &str) -> Self {
        Self {
            template: template.trim().to_string(),
        }
    }

    /// Substitute `content` (verbatim, truncated to [`MAX_CONTENT_CHARS`])
    /// into the template.
    pub fn render(&self, content: &str) -> String {
        let body: String = if content.chars().count() > MAX_CONTENT_CHARS {
            let mut cut: String = content.chars().take(MAX_CONTENT_CHARS).collect();
            cut.push_str("...");
            cut
        } else {
            content.to_string()
        };
        self.template.replace(CONTENT_PLACEHOLDER, &body)
    }
}
