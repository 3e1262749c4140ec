//! Vocabulary pipeline tests
//!
//! These tests verify that:
//! 1. Caption lines flow end-to-end through tokenization, frequency counting,
//!    vocabulary construction, persistence, and lookup
//! 2. The frequency cutoff and ordering rules hold on realistic caption data

use std::fs;

use captionkit_rs::captionkit::data::text::{tokenize, word_frequencies, Vocabulary};
use captionkit_rs::captionkit::data::DataError;

fn caption_lines() -> Vec<String> {
    vec![
        "A man riding a wave on a surfboard.\t1000268201.jpg#0".to_string(),
        "A man rides a large wave.\t1000268201.jpg#1".to_string(),
        "Two dogs running on a beach.\t1001773457.jpg#0".to_string(),
        "A dog runs across the sand.\t1001773457.jpg#1".to_string(),
    ]
}

#[test]
fn test_tokenize_matches_expected_walkthrough() {
    assert_eq!(
        tokenize("A man riding a wave on a surfboard."),
        vec!["a", "man", "riding", "a", "wave", "on", "a", "surfboard", "."]
    );
    assert_eq!(tokenize("Hello, World2"), vec!["hello", ",", "world", "2"]);
}

#[test]
fn test_frequencies_ignore_caption_metadata() {
    let frequencies = word_frequencies(caption_lines());

    // "a" appears in every caption, "1000268201" only after the tab
    assert!(frequencies.get("a").copied().unwrap_or(0) >= 4);
    assert_eq!(frequencies.get("1000268201"), None);
    assert_eq!(frequencies.get("jpg"), None);
}

#[test]
fn test_build_save_load_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vocab.json");

    let vocabulary = Vocabulary::build(caption_lines(), 2).unwrap();

    // Every surviving word occurs at least twice in the corpus
    let frequencies = word_frequencies(caption_lines());
    for word in vocabulary.words() {
        assert!(
            frequencies.get(word).copied().unwrap_or(0) >= 2,
            "Word {:?} survived the cutoff with too few occurrences",
            word
        );
    }
    // "surfboard" occurs once and must be gone
    assert_eq!(vocabulary.word_to_id("surfboard"), None);

    // Most frequent word first
    assert_eq!(vocabulary.words().first().map(String::as_str), Some("a"));

    let written = vocabulary.save(&path).unwrap();
    let loaded = Vocabulary::load(&written).unwrap();
    assert_eq!(loaded, vocabulary);

    // Ids round-trip through encode/decode for in-vocabulary words
    let ids: Vec<usize> = loaded
        .encode("a man on a wave.")
        .into_iter()
        .flatten()
        .collect();
    let decoded = loaded.decode(&ids);
    assert_eq!(decoded, vec!["a", "man", "on", "a", "wave", "."]);

    // The stored file is a plain JSON word array
    let raw = fs::read_to_string(&written).unwrap();
    assert!(raw.starts_with('['), "Expected JSON array, got {}", raw);
}

#[test]
fn test_build_with_unreachable_cutoff_fails() {
    let result = Vocabulary::build(caption_lines(), 100);
    assert!(matches!(result, Err(DataError::EmptyVocabulary)));
}
