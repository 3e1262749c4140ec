//! Core captionkit modules

pub mod architectures;
pub mod data;
pub mod settings;
