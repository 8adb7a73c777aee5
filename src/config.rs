// src/config.rs
//! Runtime config for the tagging side, loaded from `config/tagger.json`.
//! Reading or parsing failures fall back to defaults; a missing API key is
//! only surfaced when a tagging call is actually made.

use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};

pub const DEFAULT_CONFIG_PATH: &str = "config/tagger.json";

fn default_model() -> String {
    // Cost-effective model, good enough for structured extraction.
    "gpt-4o-mini".to_string()
}
fn default_api_key() -> String {
    "ENV".to_string()
}
fn default_confidence_threshold() -> f64 {
    0.5
}
fn default_max_tags() -> usize {
    5
}
fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggerConfig {
    #[serde(default = "default_model")]
    pub model: String,
    /// "ENV" means: read OPENAI_API_KEY (or OPENAI_KEY) at call time.
    #[serde(default = "default_api_key")]
    pub api_key: String,
    /// Tags below this confidence are dropped from the final set.
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,
    #[serde(default = "default_max_tags")]
    pub max_tags_per_category: usize,
    /// Whole-request timeout for the tagging call; a timeout is reported
    /// as a transport error.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key: default_api_key(),
            confidence_threshold: default_confidence_threshold(),
            max_tags_per_category: default_max_tags(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TaggerConfig {
    /// Load from the default path; missing or invalid files yield defaults.
    pub fn load() -> Self {
        Self::load_from_file(DEFAULT_CONFIG_PATH).unwrap_or_default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)?;
        let mut cfg: TaggerConfig = serde_json::from_str(&data)?;
        if !(0.0..=1.0).contains(&cfg.confidence_threshold) {
            cfg.confidence_threshold = default_confidence_threshold();
        }
        if cfg.timeout_secs == 0 {
            cfg.timeout_secs = default_timeout_secs();
        }
        Ok(cfg)
    }

    /// Resolve the API key. Empty result means "not configured"; the
    /// provider reports that as an authentication error when called.
    pub fn resolve_api_key(&self) -> String {
        if self.api_key.trim().eq_ignore_ascii_case("env") {
            env::var("OPENAI_API_KEY")
                .or_else(|_| env::var("OPENAI_KEY"))
                .unwrap_or_default()
        } else {
            self.api_key.clone()
        }
    }
}
