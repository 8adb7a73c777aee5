// tests/pipeline_e2e.rs
// Whole-pipeline scenarios against a scripted provider; no network.

use std::sync::Arc;

use crossborder_content_analyzer::config::TaggerConfig;
use crossborder_content_analyzer::error::Error;
use crossborder_content_analyzer::pipeline::{Pipeline, SCHEMA_VERSION};
use crossborder_content_analyzer::prompt::PromptStore;
use crossborder_content_analyzer::tag::{AutoTagger, MockProvider, MockReply, TagCategory};

const SCENARIO_TEXT: &str = "Buy now! Ships from Japan to Singapore fast.";

fn pipeline_with(reply: MockReply) -> Pipeline {
    let provider = Arc::new(MockProvider::new(reply));
    let prompts = PromptStore::from_template("Tag this:\n{{CONTENT}}");
    let tagger = AutoTagger::new(provider, prompts, &TaggerConfig::default());
    Pipeline::new(Some(tagger), None)
}

#[tokio::test]
async fn stubbed_reply_yields_exactly_the_three_tags() {
    let body = r#"{
        "source_regions": [{"value": "Japan", "confidence": 0.9}],
        "target_regions": [{"value": "Singapore", "confidence": 0.85}],
        "shopping_intent": [{"value": "How-to-buy", "confidence": 0.6}]
    }"#;
    let pipeline = pipeline_with(MockReply::Body(body.to_string()));

    let result = pipeline.run(SCENARIO_TEXT, "demo", true).await.unwrap();
    assert!(!result.tagging_degraded);

    let tags = result.tags.as_ref().expect("tags requested and delivered");
    assert_eq!(tags.len(), 3);

    let source = tags.get(TagCategory::ProductSourceRegion);
    assert_eq!(source[0].value, "Japan");
    assert_eq!(source[0].confidence, 0.9);

    let target = tags.get(TagCategory::TargetUserRegion);
    assert_eq!(target[0].value, "Singapore");
    assert_eq!(target[0].confidence, 0.85);

    let intent = tags.get(TagCategory::ShoppingIntent);
    assert_eq!(intent[0].value, "How-to-buy");
    assert_eq!(intent[0].confidence, 0.6);

    // Stats are always computed alongside tags.
    assert_eq!(result.stats.word_count, 8);
    assert_eq!(result.schema_version, SCHEMA_VERSION);
}

#[tokio::test]
async fn malformed_reply_degrades_instead_of_failing() {
    let pipeline = pipeline_with(MockReply::Body("sorry, I cannot do that".to_string()));

    let result = pipeline.run(SCENARIO_TEXT, "demo", true).await.unwrap();
    assert!(result.tags.is_none(), "no tags from an unusable reply");
    assert!(result.tagging_degraded, "degradation must be recorded");
    assert_eq!(result.stats.word_count, 8, "stats still present");
}

#[tokio::test]
async fn rate_limit_fails_the_run() {
    let pipeline = pipeline_with(MockReply::RateLimited);
    match pipeline.run(SCENARIO_TEXT, "demo", true).await {
        Err(Error::RateLimit) => {}
        other => panic!("expected RateLimit, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_failure_fails_the_run() {
    let pipeline = pipeline_with(MockReply::Down("connection refused".to_string()));
    match pipeline.run(SCENARIO_TEXT, "demo", true).await {
        Err(Error::Transport(_)) => {}
        other => panic!("expected Transport, got {other:?}"),
    }
}

#[tokio::test]
async fn authentication_failure_fails_the_run() {
    let pipeline = pipeline_with(MockReply::Unauthorized);
    match pipeline.run(SCENARIO_TEXT, "demo", true).await {
        Err(Error::Authentication(_)) => {}
        other => panic!("expected Authentication, got {other:?}"),
    }
}

#[tokio::test]
async fn tags_absent_when_not_requested() {
    let pipeline = Pipeline::stats_only();
    let result = pipeline.run(SCENARIO_TEXT, "demo", false).await.unwrap();
    assert!(result.tags.is_none());
    assert!(!result.tagging_degraded);
    assert_eq!(result.source, "demo");
    assert_eq!(result.content_length, SCENARIO_TEXT.chars().count());
}

#[tokio::test]
async fn low_confidence_tags_are_filtered_by_config() {
    let body = r#"{
        "brands": [
            {"value": "Nike", "confidence": 0.8},
            {"value": "Mystery", "confidence": 0.2}
        ]
    }"#;
    let pipeline = pipeline_with(MockReply::Body(body.to_string()));
    let result = pipeline.run(SCENARIO_TEXT, "demo", true).await.unwrap();
    let tags = result.tags.unwrap();
    // Default threshold is 0.5.
    assert_eq!(tags.len(), 1);
    assert_eq!(tags.get(TagCategory::Brand)[0].value, "Nike");
}
