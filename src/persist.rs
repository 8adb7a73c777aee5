// src/persist.rs
//! Persistence collaborator: writes one pretty-printed JSON artifact per
//! run under a date-partitioned directory. Write-once; nothing reads these
//! back at runtime.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::pipeline::AnalysisResult;

pub const DEFAULT_OUTPUT_DIR: &str = "out";

#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Write `result` to `<root>/<YYYY-MM-DD>/analysis_<slug>_<HHMMSS>.json`
    /// and return the path.
    pub fn write(&self, result: &AnalysisResult) -> anyhow::Result<PathBuf> {
        let dir = self.root.join(result.timestamp.format("%Y-%m-%d").to_string());
        fs::create_dir_all(&dir)?;

        let filename = format!(
            "analysis_{}_{}.json",
            slugify(&result.source),
            result.timestamp.format("%H%M%S")
        );
        let path = dir.join(filename);

        let json = serde_json::to_string_pretty(result)?;
        write_atomic(&path, json.as_bytes())?;
        Ok(path)
    }
}

/// Write via a temp file + rename so a crashed run never leaves a
/// half-written artifact.
fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp = path.with_extension("json.tmp");
    let mut f = fs::File::create(&tmp)?;
    f.write_all(bytes)?;
    fs::rename(tmp, path)?;
    Ok(())
}

/// Fold a source identifier into a filesystem-safe slug: scheme and
/// leading `www.` dropped, non-alphanumerics become `_`, capped at 60
/// chars.
pub fn slugify(source: &str) -> String {
    let stripped = source
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.");

    let mut slug = String::with_capacity(stripped.len());
    let mut prev_underscore = false;
    for c in stripped.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            prev_underscore = false;
        } else if !prev_underscore {
            slug.push('_');
            prev_underscore = true;
        }
        if slug.len() >= 60 {
            break;
        }
    }
    let slug = slug.trim_matches('_').to_string();
    if slug.is_empty() {
        "source".to_string()
    } else {
        slug
    }
}
