//! Command implementations for the foosball CLI

pub mod serve;

pub use serve::run_serve;
