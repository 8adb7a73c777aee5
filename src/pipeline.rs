// src/pipeline.rs
//! Pipeline orchestrator: stats, optional tagging, one immutable result
//! record, best-effort hand-off to persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::analyzer::{self, ContentStats};
use crate::error::Error;
use crate::persist::JsonStore;
use crate::tag::{AutoTagger, TagSet};

/// Bumped on any change to the persisted JSON layout so downstream
/// consumers can detect format drift.
pub const SCHEMA_VERSION: u32 = 1;

/// One analysis run, immutable once assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// URL or file path the content came from.
    pub source: String,
    pub timestamp: DateTime<Utc>,
    /// Char count of the analyzed (cleaned) text.
    pub content_length: usize,
    pub stats: ContentStats,
    /// Absent when tagging was not requested, or when it degraded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagSet>,
    /// Set when tagging was requested but the model reply could not be
    /// parsed; the rest of the result is still valid.
    #[serde(default)]
    pub tagging_degraded: bool,
    pub schema_version: u32,
}

pub struct Pipeline {
    tagger: Option<AutoTagger>,
    store: Option<JsonStore>,
}

impl Pipeline {
    pub fn new(tagger: Option<AutoTagger>, store: Option<JsonStore>) -> Self {
        Self { tagger, store }
    }

    /// Stats-only pipeline, no tagging and no persistence.
    pub fn stats_only() -> Self {
        Self {
            tagger: None,
            store: None,
        }
    }

    /// Analyze `text`. Stats are always computed. When `want_tags` is set,
    /// transport/auth/rate-limit failures fail the whole run (tagging was
    /// explicitly asked for); an unparseable model reply only degrades it.
    pub async fn run(
        &self,
        text: &str,
        source_id: &str,
        want_tags: bool,
    ) -> Result<AnalysisResult, Error> {
        let stats = analyzer::analyze(text);

        let (tags, tagging_degraded) = if want_tags {
            let tagger = self.tagger.as_ref().ok_or_else(|| {
                Error::Authentication("tagging requested but no provider is configured".into())
            })?;
            match tagger.tag(text).await {
                Ok(set) => (Some(set), false),
                Err(Error::MalformedResponse(why)) => {
                    warn!(%why, "tag response unparseable; continuing without tags");
                    (None, true)
                }
                Err(e) => return Err(e),
            }
        } else {
            (None, false)
        };

        let result = AnalysisResult {
            source: source_id.to_string(),
            timestamp: Utc::now(),
            content_length: text.chars().count(),
            stats,
            tags,
            tagging_degraded,
            schema_version: SCHEMA_VERSION,
        };

        // Hand-off, not a dependency: a failed write never fails the run.
        if let Some(store) = &self.store {
            match store.write(&result) {
                Ok(path) => tracing::info!(path = %path.display(), "analysis persisted"),
                Err(e) => warn!(error = %e, "failed to persist analysis result"),
            }
        }

        Ok(result)
    }
}
