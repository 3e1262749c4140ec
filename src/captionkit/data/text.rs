//! Caption tokenization and vocabulary management.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{debug, info};

use super::error::DataError;
use crate::captionkit::settings::settings;

/// Splits a caption into lowercase word, punctuation, and digit-run tokens.
///
/// ASCII punctuation becomes standalone tokens, uppercase letters fold to
/// lowercase, and letter/digit boundaries split runs (`"World2"` ->
/// `"world"`, `"2"`). Characters outside ASCII letters, digits, punctuation,
/// and spaces are dropped.
pub fn tokenize(caption: &str) -> Vec<String> {
    let mut spaced = String::with_capacity(caption.len());
    for character in caption.chars() {
        if character.is_ascii_punctuation() {
            spaced.push(' ');
            spaced.push(character);
            spaced.push(' ');
        } else if character.is_ascii_uppercase() {
            if spaced.ends_with(|c: char| c.is_ascii_digit()) {
                spaced.push(' ');
            }
            spaced.push(character.to_ascii_lowercase());
        } else if character == ' ' {
            spaced.push(' ');
        } else if character.is_ascii_lowercase() {
            if spaced.ends_with(|c: char| c.is_ascii_digit()) {
                spaced.push(' ');
            }
            spaced.push(character);
        } else if character.is_ascii_digit() {
            if spaced.ends_with(|c: char| c.is_ascii_lowercase()) {
                spaced.push(' ');
            }
            spaced.push(character);
        }
    }
    spaced.split_whitespace().map(str::to_string).collect()
}

/// Counts word occurrences across caption lines.
///
/// The caption is the first tab-separated field of each line; anything after
/// the tab (image ids, split labels) is ignored.
pub fn word_frequencies<I, S>(lines: I) -> HashMap<String, usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let started = Instant::now();
    let mut frequencies: HashMap<String, usize> = HashMap::new();
    let mut line_count = 0usize;
    for line in lines {
        let line = line.as_ref();
        let caption = line.trim().split('\t').next().unwrap_or("");
        for word in tokenize(caption) {
            *frequencies.entry(word).or_insert(0) += 1;
        }
        line_count += 1;
    }
    info!(
        "scanned {} caption lines in {:.2?}",
        line_count,
        started.elapsed()
    );
    frequencies
}

/// An ordered word list, most frequent first, with index lookups.
///
/// The on-disk form is a JSON array of words in list order, so index `i` of
/// the loaded vocabulary is word `i` of the file.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    words: Vec<String>,
    indices: HashMap<String, usize>,
}

impl Vocabulary {
    /// Wraps an already-ordered word list.
    pub fn from_words(words: Vec<String>) -> Self {
        let indices = words
            .iter()
            .enumerate()
            .map(|(index, word)| (word.clone(), index))
            .collect();
        Self { words, indices }
    }

    /// Builds a vocabulary from caption lines.
    ///
    /// Words occurring fewer than `min_instances` times are dropped; the
    /// survivors are ordered most frequent first, ties broken
    /// lexicographically. An all-dropped corpus is an error unless the
    /// `allow_empty_vocab` setting is on.
    pub fn build<I, S>(lines: I, min_instances: usize) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let frequencies = word_frequencies(lines);
        let mut entries: Vec<(String, usize)> = frequencies
            .into_iter()
            .filter(|(_, count)| *count >= min_instances)
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let words: Vec<String> = entries.into_iter().map(|(word, _)| word).collect();
        if words.is_empty() && !settings().captionkit.allow_empty_vocab {
            return Err(DataError::EmptyVocabulary);
        }
        info!("created a vocabulary with {} words", words.len());
        Ok(Self::from_words(words))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in list order, most frequent first.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Index of `word`, or `None` when out of vocabulary.
    pub fn word_to_id(&self, word: &str) -> Option<usize> {
        self.indices.get(word).copied()
    }

    /// Word at `id`, or `None` when out of range.
    pub fn id_to_word(&self, id: usize) -> Option<&str> {
        self.words.get(id).map(String::as_str)
    }

    /// Tokenizes `caption` and looks every token up; out-of-vocabulary
    /// tokens come back as `None`.
    pub fn encode(&self, caption: &str) -> Vec<Option<usize>> {
        tokenize(caption)
            .iter()
            .map(|word| self.word_to_id(word))
            .collect()
    }

    /// Words for the ids that are in range, in order.
    pub fn decode(&self, ids: &[usize]) -> Vec<&str> {
        ids.iter().filter_map(|&id| self.id_to_word(id)).collect()
    }

    /// Persists the word list as JSON, returning the resolved path.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<PathBuf, DataError> {
        let path = resolve_vocab_path(path.as_ref());
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = fs::File::create(&path)?;
        serde_json::to_writer(file, &self.words)?;
        debug!(
            "wrote vocabulary ({} words) to {}",
            self.words.len(),
            path.display()
        );
        Ok(path)
    }

    /// Loads a word list persisted by [`Vocabulary::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = resolve_vocab_path(path.as_ref());
        let file = fs::File::open(&path)?;
        let words: Vec<String> = serde_json::from_reader(file)?;
        Ok(Self::from_words(words))
    }
}

/// Joins relative vocabulary paths onto the configured cache directory.
fn resolve_vocab_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match &settings().captionkit.vocab_cache_dir {
        Some(cache_dir) => cache_dir.join(path),
        None => path.to_path_buf(),
    }
}
