//! Core types for the Quake log statistics engine.
//!
//! Holds the domain models, the error type, the line classifier and the
//! command-line settings shared by the data, runtime and binary crates.

pub mod classifier;
pub mod error;
pub mod models;
pub mod settings;

pub use error::{Result, StatsError};
