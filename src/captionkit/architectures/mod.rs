//! Model architecture modules

pub mod base;
