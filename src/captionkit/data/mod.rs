//! Caption and image data preparation.

pub mod error;
pub mod image;
pub mod text;

pub use error::DataError;
