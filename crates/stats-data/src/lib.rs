//! Log processing layer for the Quake statistics engine.
//!
//! Reads raw server logs, splits them into game sessions, aggregates per-game
//! kill statistics and computes frequency and score rankings.

pub mod aggregator;
pub mod ranking;
pub mod reader;
pub mod segmenter;

pub use stats_core as core;
