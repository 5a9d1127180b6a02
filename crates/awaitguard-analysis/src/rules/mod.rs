//! Rules and the diagnostic types they produce.

pub mod configure_await;
pub mod types;

pub use types::*;
