//! Errors surfaced by the data-preparation helpers.

use std::io;

use thiserror::Error;

/// Failure modes of the caption and image data paths.
#[derive(Debug, Error)]
pub enum DataError {
    /// File-system failure while reading or writing.
    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),

    /// The image file could not be opened or decoded.
    #[error("image decode failure: {0}")]
    Image(#[from] image::ImageError),

    /// The vocabulary file could not be serialized or parsed.
    #[error("vocabulary serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Every word of the corpus fell below the frequency cutoff. Gated by
    /// the `allow_empty_vocab` setting.
    #[error("vocabulary is empty after applying the frequency cutoff")]
    EmptyVocabulary,
}
