// src/analyzer.rs
//! Content statistics: word/sentence counts, Flesch Reading Ease, and
//! keyword extraction. Pure functions over the input text; no I/O, no
//! error states — any string (including empty) yields a valid result.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::HashSet;

/// Default number of keywords returned by [`analyze`].
pub const DEFAULT_TOP_KEYWORDS: usize = 10;

/// Sentinel readability score for degenerate (word-free) input. Documented
/// so downstream consumers can distinguish "empty" from "unreadable".
pub const EMPTY_TEXT_READABILITY: f64 = 0.0;

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
        "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
        "did", "will", "would", "could", "should", "may", "might", "must", "can", "this", "that",
        "these", "those", "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us",
        "them", "my", "your", "his", "its", "our", "their",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentStats {
    pub word_count: u32,
    pub sentence_count: u32,
    /// Flesch Reading Ease. Unclamped: extreme inputs may fall below 0 or
    /// exceed 100. [`EMPTY_TEXT_READABILITY`] when `word_count == 0`.
    pub readability_score: f64,
    /// (term, frequency), descending frequency, first-occurrence tie-break.
    pub keywords: Vec<(String, u32)>,
}

/// Analyze `text` with the default keyword cap.
pub fn analyze(text: &str) -> ContentStats {
    analyze_with_top_n(text, DEFAULT_TOP_KEYWORDS)
}

/// Analyze `text`, returning at most `top_n` keywords.
pub fn analyze_with_top_n(text: &str, top_n: usize) -> ContentStats {
    let word_count = text.split_whitespace().count() as u32;

    if word_count == 0 {
        return ContentStats {
            word_count: 0,
            sentence_count: 0,
            readability_score: EMPTY_TEXT_READABILITY,
            keywords: Vec::new(),
        };
    }

    let terminal = text.chars().filter(|c| matches!(c, '.' | '!' | '?')).count() as u32;
    // Unterminated prose still counts as one sentence.
    let sentence_count = terminal.max(1);

    let words: Vec<String> = alpha_words(text).collect();
    let syllables: u32 = words.iter().map(|w| count_syllables(w)).sum();

    // Flesch uses the alphabetic word count so syllables/words stays
    // consistent; fall back to the whitespace count for pure-symbol input.
    let flesch_words = if words.is_empty() {
        word_count
    } else {
        words.len() as u32
    };
    let avg_sentence_len = f64::from(flesch_words) / f64::from(sentence_count);
    let avg_syllables = if words.is_empty() {
        1.0
    } else {
        f64::from(syllables) / words.len() as f64
    };
    let readability_score = 206.835 - 1.015 * avg_sentence_len - 84.6 * avg_syllables;

    ContentStats {
        word_count,
        sentence_count,
        readability_score,
        keywords: extract_keywords(&words, top_n),
    }
}

/// Lowercased alphabetic tokens, punctuation stripped.
fn alpha_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_ascii_lowercase())
}

/// Deterministic syllable estimate: maximal runs of vowels (aeiouy) per
/// lowercase word, minus one for a trailing silent 'e' when more than one
/// run was counted, floor of 1.
fn count_syllables(word: &str) -> u32 {
    let mut runs = 0u32;
    let mut prev_vowel = false;
    for c in word.chars() {
        let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if vowel && !prev_vowel {
            runs += 1;
        }
        prev_vowel = vowel;
    }
    if word.ends_with('e') && runs > 1 {
        runs -= 1;
    }
    runs.max(1)
}

/// Frequency-count non-stopword terms longer than two chars and return the
/// top `top_n`, descending frequency, first-occurrence order on ties.
fn extract_keywords(words: &[String], top_n: usize) -> Vec<(String, u32)> {
    let mut freq: HashMap<&str, u32> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for w in words {
        if w.len() <= 2 || STOPWORDS.contains(w.as_str()) {
            continue;
        }
        let count = freq.entry(w.as_str()).or_insert(0);
        if *count == 0 {
            first_seen.push(w.as_str());
        }
        *count += 1;
    }

    // first_seen preserves appearance order; the stable sort keeps that
    // order within equal frequencies.
    let mut ranked: Vec<(String, u32)> = first_seen
        .into_iter()
        .map(|w| (w.to_string(), freq[w]))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(top_n);
    ranked
}
