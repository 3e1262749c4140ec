//! captionkit-rs: recurrent attention cells and data utilities for image captioning

pub mod captionkit;

pub use captionkit::settings::{Settings, settings};

/// Deterministic tensor construction helpers shared by tests and benches
pub mod test_utils;
