//! Rule engine for asynchronous code.
//!
//! Hosts discover await expressions, describe them as [`SuspensionPoint`]s,
//! and hand them to [`ConfigureAwaitRule`] together with the compilation they
//! belong to. The rule decides, per point, whether `ConfigureAwait(false)` is
//! required and missing.
//!
//! [`SuspensionPoint`]: rules::configure_await::SuspensionPoint
//! [`ConfigureAwaitRule`]: rules::configure_await::ConfigureAwaitRule

pub mod rules;
