// tests/analyzer_stats.rs
// Content Analyzer is total: any string in, valid stats out.

use crossborder_content_analyzer::analyzer::{
    analyze, analyze_with_top_n, EMPTY_TEXT_READABILITY,
};

#[test]
fn empty_input_yields_sentinel_stats() {
    for text in ["", "   ", "\n\t "] {
        let stats = analyze(text);
        assert_eq!(stats.word_count, 0);
        assert_eq!(stats.sentence_count, 0);
        assert_eq!(stats.readability_score, EMPTY_TEXT_READABILITY);
        assert!(stats.readability_score.is_finite());
        assert!(stats.keywords.is_empty());
    }
}

#[test]
fn counts_words_and_sentences() {
    let stats = analyze("Buy now! Ships from Japan to Singapore fast.");
    assert_eq!(stats.word_count, 8);
    assert_eq!(stats.sentence_count, 2);
}

#[test]
fn unterminated_text_counts_as_one_sentence() {
    let stats = analyze("no terminal punctuation here");
    assert_eq!(stats.word_count, 4);
    // Floor of 1: the whole text is treated as one sentence.
    assert_eq!(stats.sentence_count, 1);
}

#[test]
fn ellipsis_heavy_text_can_have_more_sentences_than_words() {
    // word_count >= sentence_count does not hold in general; each '.'
    // counts as a terminator.
    let stats = analyze("wait...");
    assert_eq!(stats.word_count, 1);
    assert_eq!(stats.sentence_count, 3);
}

#[test]
fn readability_is_unclamped_flesch() {
    // 5 one-syllable words, 1 sentence:
    // 206.835 - 1.015*5 - 84.6*1 = 117.16
    let stats = analyze("The quick brown fox jumps.");
    assert!((stats.readability_score - 117.16).abs() < 1e-6);
}

#[test]
fn keywords_sorted_by_frequency_then_first_occurrence() {
    let stats = analyze("beta beta alpha alpha gamma alpha beta gamma delta");
    let terms: Vec<(&str, u32)> = stats
        .keywords
        .iter()
        .map(|(t, c)| (t.as_str(), *c))
        .collect();
    // beta and alpha both occur 3 times; beta appeared first.
    assert_eq!(
        terms,
        vec![("beta", 3), ("alpha", 3), ("gamma", 2), ("delta", 1)]
    );
}

#[test]
fn keyword_list_respects_cap() {
    let text = "one two three four five six seven eight nine ten eleven twelve";
    let stats = analyze_with_top_n(text, 3);
    assert_eq!(stats.keywords.len(), 3);

    // Default cap is 10.
    let stats = analyze(text);
    assert!(stats.keywords.len() <= 10);
}

#[test]
fn stopwords_and_short_words_never_appear_as_keywords() {
    let stats = analyze("It is the best ox in the herd and we like it.");
    for (term, _) in &stats.keywords {
        assert!(term.len() > 2, "short term {term:?} leaked through");
        assert!(!["the", "and", "is", "it", "we", "in"].contains(&term.as_str()));
    }
}
