//! Runtime layer for the Quake statistics engine.
//!
//! Owns the currently ingested log and answers every query against it.

pub mod engine;

pub use stats_core as core;
pub use stats_data as data;
