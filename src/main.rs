//! Content Analyzer CLI — Binary Entrypoint
//! Fetches a source, runs the stats + tagging pipeline, prints a report,
//! and persists the result as a JSON artifact.
//!
//! Usage:
//!   crossborder-content-analyzer [--tag] [SOURCE]
//!
//! SOURCE is a URL or a file path; with no argument a built-in demo text
//! is analyzed. `--tag` enables AI tagging (needs OPENAI_API_KEY).

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crossborder_content_analyzer::config::TaggerConfig;
use crossborder_content_analyzer::fetch::{fetch, Source};
use crossborder_content_analyzer::persist::{JsonStore, DEFAULT_OUTPUT_DIR};
use crossborder_content_analyzer::pipeline::{AnalysisResult, Pipeline};
use crossborder_content_analyzer::prompt::PromptStore;
use crossborder_content_analyzer::tag::{AutoTagger, OpenAiProvider};

const DEMO_TEXT: &str = "The quick brown fox jumps over the lazy dog. This is a sample text for \
demonstrating the content analyzer. It includes multiple sentences with varying complexity. \
The analyzer can calculate word counts, readability scores, and extract keywords from any \
given text. This tool is useful for writers, editors, and content creators who want to \
understand the characteristics of their text.";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();
}

fn usage() -> &'static str {
    "usage: crossborder-content-analyzer [--tag] [SOURCE]\n\
     \n\
     SOURCE   URL or file path (omit for a built-in demo text)\n\
     --tag    enable AI tagging via the OpenAI API"
}

#[tokio::main]
async fn main() {
    // .env in local runs; no-op when absent.
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let mut want_tags = false;
    let mut source_arg: Option<String> = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--tag" | "--auto-tag" => want_tags = true,
            "-h" | "--help" => {
                println!("{}", usage());
                return Ok(());
            }
            s if s.starts_with('-') => anyhow::bail!("unknown flag {s}\n{}", usage()),
            s => {
                if source_arg.replace(s.to_string()).is_some() {
                    anyhow::bail!("at most one SOURCE argument\n{}", usage());
                }
            }
        }
    }

    let (text, source_id) = match &source_arg {
        Some(arg) => {
            let source = Source::parse(arg);
            let fetched = fetch(&source).await?;
            (fetched.text, source.id())
        }
        None => {
            println!("No input provided. Using sample text for demonstration.\n");
            (DEMO_TEXT.to_string(), "demo".to_string())
        }
    };

    let tagger = if want_tags {
        let config = TaggerConfig::load();
        let prompts = PromptStore::from_default_location()?;
        let provider = Arc::new(OpenAiProvider::from_config(&config));
        Some(AutoTagger::new(provider, prompts, &config))
    } else {
        None
    };

    let store = JsonStore::new(DEFAULT_OUTPUT_DIR);
    let pipeline = Pipeline::new(tagger, Some(store));
    let result = pipeline.run(&text, &source_id, want_tags).await?;

    print_report(&result);
    Ok(())
}

fn print_report(result: &AnalysisResult) {
    println!("=== Content Analysis Results ===\n");
    println!("Source: {}", result.source);
    println!("Content length: {} chars\n", result.content_length);

    let stats = &result.stats;
    println!("Word Count Statistics:");
    println!("  Total words: {}", stats.word_count);
    println!("  Sentences: {}", stats.sentence_count);
    println!("\nReadability:");
    println!("  Flesch Reading Ease: {:.2}", stats.readability_score);
    if !stats.keywords.is_empty() {
        println!("\nTop Keywords:");
        for (i, (term, count)) in stats.keywords.iter().enumerate() {
            println!("  {}. {term} ({count} occurrences)", i + 1);
        }
    }

    if result.tagging_degraded {
        println!("\nNote: AI tagging returned an unusable response; tags omitted.");
    }
    if let Some(tags) = &result.tags {
        println!("\n=== Auto-Generated Tags ===\n");
        for (category, list) in &tags.0 {
            println!("{category:?}:");
            for tag in list {
                println!("  - {} (confidence: {:.2})", tag.value, tag.confidence);
            }
            println!();
        }
    }
}
