//! Shared foundation for the awaitguard rule engine.
//!
//! Types, errors, configuration, tracing, cancellation, and constants used by
//! `awaitguard-analysis` and by hosts that embed it.

pub mod config;
pub mod constants;
pub mod errors;
pub mod traits;
pub mod tracing;
pub mod types;
