// src/fetch.rs
//! Content fetcher: turns a URL or file path into cleaned plain text.
//! Any failure here is `SourceUnavailable` and aborts the run for that
//! source only.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::error::Error;

/// Non-content HTML elements removed wholesale before tag stripping.
/// One regex per element: the closer must match its own opener, or a
/// script body containing "</style>" would end the block early.
static BLOCK_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    ["script", "style", "nav", "header", "footer", "aside"]
        .iter()
        .map(|tag| {
            Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>")).expect("valid block regex")
        })
        .collect()
});
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

static HTTP: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent("Mozilla/5.0 (Content-Analyzer/1.0) AppleWebKit/537.36")
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .build()
        .expect("reqwest client")
});

/// Where the text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Source {
    /// Classify a CLI argument: http(s) URL with a host, else a file path.
    pub fn parse(arg: &str) -> Self {
        if let Ok(url) = reqwest::Url::parse(arg) {
            if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() {
                return Source::Url(arg.to_string());
            }
        }
        Source::File(PathBuf::from(arg))
    }

    pub fn id(&self) -> String {
        match self {
            Source::Url(u) => u.clone(),
            Source::File(p) => p.display().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchedContent {
    pub text: String,
    /// Char count of the cleaned text.
    pub content_length: usize,
}

/// Fetch and clean the content behind `source`.
pub async fn fetch(source: &Source) -> Result<FetchedContent, Error> {
    let text = match source {
        Source::File(path) => std::fs::read_to_string(path)
            .map_err(|e| Error::SourceUnavailable(format!("{}: {e}", path.display())))?,
        Source::Url(url) => fetch_url(url).await?,
    };

    let cleaned = if text.contains('<') {
        html_to_text(&text)
    } else {
        collapse_whitespace(&text)
    };
    if cleaned.is_empty() {
        return Err(Error::SourceUnavailable(format!(
            "{}: no readable text content",
            source.id()
        )));
    }

    let content_length = cleaned.chars().count();
    info!(source = %source.id(), chars = content_length, "content fetched");
    Ok(FetchedContent {
        text: cleaned,
        content_length,
    })
}

async fn fetch_url(url: &str) -> Result<String, Error> {
    let resp = HTTP
        .get(url)
        .send()
        .await
        .map_err(|e| Error::SourceUnavailable(format!("{url}: {e}")))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(Error::SourceUnavailable(format!("{url}: HTTP {status}")));
    }

    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();
    if !content_type.is_empty() && !content_type.contains("text/") {
        return Err(Error::SourceUnavailable(format!(
            "{url}: not text content ({content_type})"
        )));
    }

    resp.text()
        .await
        .map_err(|e| Error::SourceUnavailable(format!("{url}: {e}")))
}

/// Reduce an HTML document to readable text: drop script/style/navigation
/// blocks, strip tags, decode entities, collapse whitespace.
pub fn html_to_text(html: &str) -> String {
    let mut without_blocks = html.to_string();
    for re in BLOCK_RES.iter() {
        without_blocks = re.replace_all(&without_blocks, " ").into_owned();
    }
    let without_tags = TAG_RE.replace_all(&without_blocks, " ");
    let decoded = html_escape::decode_html_entities(&without_tags);
    collapse_whitespace(&decoded)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
