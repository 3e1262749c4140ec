//! Base architecture modules

pub mod attention;
pub mod cell;
pub mod config;
pub mod ops;
pub mod remap;
pub mod show_attend_and_tell;
pub mod spatial_attention;
