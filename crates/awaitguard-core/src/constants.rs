//! Shared constants for the awaitguard rule engine.

/// Project-level configuration file, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "awaitguard.toml";

/// User-level configuration directory, relative to the home directory.
pub const USER_CONFIG_DIR: &str = ".awaitguard";

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "AWAITGUARD_LOG";

/// Tracing filter used when `AWAITGUARD_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "awaitguard=info";

/// Default sizing hint for the policy cache, in compilations.
pub const DEFAULT_POLICY_CACHE_CAPACITY: u64 = 1024;

/// Settings value that turns `ConfigureAwait(false)` enforcement on.
pub const CONFIGURE_AWAIT_DECLINE: &str = "decline";

/// Settings value that explicitly opts out of `ConfigureAwait(false)` enforcement.
pub const CONFIGURE_AWAIT_CAPTURE: &str = "capture";
