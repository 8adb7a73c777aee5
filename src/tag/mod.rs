// src/tag/mod.rs
//! Tag types and the parse-and-validate boundary for model responses.
//!
//! The tagging service returns loosely structured JSON; nothing untyped
//! crosses this module. Entries that fail validation are dropped with a
//! warning, never propagated.

pub mod provider;
pub mod tagger;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::Error;

pub use provider::{MockProvider, MockReply, OpenAiProvider, Provider};
pub use tagger::AutoTagger;

/// Closed set of tag categories. Unknown categories in a model response are
/// dropped at the parse boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagCategory {
    Brand,
    ProductCategory,
    ProductSourceRegion,
    TargetUserRegion,
    ShoppingIntent,
}

impl TagCategory {
    /// Map a raw response key to a category. Accepts the plural/legacy key
    /// spellings the model has been observed to use.
    pub fn from_response_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "brand" | "brands" => Some(Self::Brand),
            "product_category" | "product_categories" => Some(Self::ProductCategory),
            "product_source_region" | "product_source_regions" | "source_region"
            | "source_regions" => Some(Self::ProductSourceRegion),
            "target_user_region" | "target_user_regions" | "target_region"
            | "target_regions" => Some(Self::TargetUserRegion),
            "shopping_intent" | "shopping_intents" => Some(Self::ShoppingIntent),
            _ => None,
        }
    }
}

/// One extracted attribute: a label plus the model's self-reported
/// certainty, always within [0.0, 1.0].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub value: String,
    pub confidence: f64,
}

/// Tags grouped by category. Each list is ordered by descending confidence
/// with a stable first-appearance tie-break, and never holds two tags with
/// the same (case-insensitive) value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(pub BTreeMap<TagCategory, Vec<Tag>>);

impl TagSet {
    pub fn is_empty(&self) -> bool {
        self.0.values().all(|v| v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.values().map(|v| v.len()).sum()
    }

    pub fn get(&self, category: TagCategory) -> &[Tag] {
        self.0.get(&category).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Insert a tag, merging case-insensitive duplicates and keeping the
    /// higher confidence. First-seen casing and position win.
    pub fn insert(&mut self, category: TagCategory, tag: Tag) {
        let list = self.0.entry(category).or_default();
        if let Some(existing) = list
            .iter_mut()
            .find(|t| t.value.eq_ignore_ascii_case(&tag.value))
        {
            if tag.confidence > existing.confidence {
                existing.confidence = tag.confidence;
            }
            return;
        }
        list.push(tag);
    }

    /// Order every category by descending confidence. The sort is stable,
    /// so equal confidences keep raw-response order.
    fn sort(&mut self) {
        for list in self.0.values_mut() {
            list.sort_by(|a, b| b.confidence.partial_cmp(&a.confidence).unwrap_or(std::cmp::Ordering::Equal));
        }
    }

    /// Drop tags below `threshold` and cap each category at `max_per_category`.
    /// Categories left empty are removed entirely.
    pub fn filter(&mut self, threshold: f64, max_per_category: usize) {
        for list in self.0.values_mut() {
            list.retain(|t| t.confidence >= threshold);
            list.truncate(max_per_category);
        }
        self.0.retain(|_, list| !list.is_empty());
    }
}

/// Decode a raw model reply into a validated [`TagSet`].
///
/// The reply must be a JSON object mapping category names to arrays of
/// `{value|tag, confidence}` records. Anything less than that is
/// [`Error::MalformedResponse`]; anything inside it that fails validation
/// (unknown category, entry without a label) is dropped with a warning.
/// Confidence is clipped to [0, 1] and defaults to 0.5 when missing.
pub fn parse_response(raw: &str) -> Result<TagSet, Error> {
    let root: Value = serde_json::from_str(raw)
        .map_err(|e| Error::MalformedResponse(format!("not valid JSON: {e}")))?;
    let obj = root
        .as_object()
        .ok_or_else(|| Error::MalformedResponse("top level is not a JSON object".into()))?;

    let mut tags = TagSet::default();
    for (key, entries) in obj {
        let Some(category) = TagCategory::from_response_key(key) else {
            warn!(category = %key, "dropping unknown tag category");
            continue;
        };
        let Some(items) = entries.as_array() else {
            warn!(category = %key, "dropping non-list tag entries");
            continue;
        };
        for item in items {
            match decode_entry(item) {
                Some(tag) => tags.insert(category, tag),
                None => warn!(category = %key, "dropping tag entry without a label"),
            }
        }
    }
    tags.sort();
    Ok(tags)
}

fn decode_entry(item: &Value) -> Option<Tag> {
    let obj = item.as_object()?;
    // The prompt asks for "value"; older prompt revisions said "tag".
    let value = obj
        .get("value")
        .or_else(|| obj.get("tag"))
        .and_then(Value::as_str)?
        .trim();
    if value.is_empty() {
        return None;
    }
    let confidence = obj
        .get("confidence")
        .and_then(parse_confidence)
        .unwrap_or(0.5)
        .clamp(0.0, 1.0);
    Some(Tag {
        value: value.to_string(),
        confidence,
    })
}

/// Accept a JSON number or a numeric string. Non-finite values (NaN,
/// infinities) are rejected so the 0.5 default applies; clamp alone would
/// let NaN through.
fn parse_confidence(v: &Value) -> Option<f64> {
    let parsed = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.filter(|c| c.is_finite())
}
