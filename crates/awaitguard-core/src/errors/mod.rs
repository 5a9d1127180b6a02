//! Error handling for awaitguard.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.
//!
//! The rule's decision path is infallible; only the configuration layer
//! reports errors.

pub mod config_error;
pub mod error_code;

pub use config_error::ConfigError;
pub use error_code::ErrorCode;
