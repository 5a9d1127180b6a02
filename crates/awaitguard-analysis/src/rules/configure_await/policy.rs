//! ConfigureAwait policy resolution, memoized per compilation.

use awaitguard_core::config::{AnalysisConfig, ConfigureAwaitSetting};
use awaitguard_core::constants::DEFAULT_POLICY_CACHE_CAPACITY;
use awaitguard_core::types::CompilationId;
use moka::sync::Cache;
use serde::Serialize;

use super::compilation::Compilation;

/// Attribute that turns enforcement on for a whole assembly.
pub const USE_CONFIGURE_AWAIT_FALSE_ATTRIBUTE: &str = "UseConfigureAwaitFalseAttribute";

/// Attribute that explicitly opts an assembly out of enforcement.
pub const DO_NOT_USE_CONFIGURE_AWAIT_ATTRIBUTE: &str = "DoNotUseConfigureAwaitAttribute";

/// Policy a compilation declares for awaits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigurationPolicy {
    /// Conflicting declarations; nothing is enforced.
    Unspecified,
    /// Every await must decline its captured context.
    EnforceDeclineContext,
    /// No policy declared, declared opt-out, or nothing resolvable.
    NoPolicy,
}

impl ConfigurationPolicy {
    pub fn is_enforcing(self) -> bool {
        matches!(self, Self::EnforceDeclineContext)
    }
}

/// Matches `simple_name` against a marker with or without its `Attribute` suffix.
fn is_marker(simple_name: &str, marker: &str) -> bool {
    simple_name == marker || marker.strip_suffix("Attribute") == Some(simple_name)
}

/// Compute the policy from what `compilation` declares, without caching.
///
/// Assembly attributes take precedence over the settings file. Attributes
/// whose type did not bind are ignored.
pub fn resolve_declared(compilation: &dyn Compilation) -> ConfigurationPolicy {
    let mut enforce = false;
    let mut opt_out = false;
    for name in compilation
        .assembly_attributes()
        .iter()
        .filter_map(|a| a.simple_name())
    {
        enforce |= is_marker(name, USE_CONFIGURE_AWAIT_FALSE_ATTRIBUTE);
        opt_out |= is_marker(name, DO_NOT_USE_CONFIGURE_AWAIT_ATTRIBUTE);
    }

    match (enforce, opt_out) {
        (true, true) => ConfigurationPolicy::Unspecified,
        (true, false) => ConfigurationPolicy::EnforceDeclineContext,
        (false, true) => ConfigurationPolicy::NoPolicy,
        (false, false) => match compilation
            .settings()
            .and_then(|s| s.policy.configure_await_setting())
        {
            Some(ConfigureAwaitSetting::Decline) => ConfigurationPolicy::EnforceDeclineContext,
            Some(ConfigureAwaitSetting::Capture) | None => ConfigurationPolicy::NoPolicy,
        },
    }
}

/// Caller-owned policy cache keyed by [`CompilationId`].
///
/// Concurrent first-time resolution of the same compilation runs the
/// resolution once; every other caller waits for and reads that value.
///
/// The cache is unbounded: an entry leaves only through `invalidate`,
/// `replace` or `invalidate_all`, never through eviction.
pub struct ConfigurationResolver {
    cache: Cache<CompilationId, ConfigurationPolicy>,
}

impl ConfigurationResolver {
    /// Create a resolver pre-sized for `expected_compilations` entries.
    /// The number is a sizing hint, not a limit.
    pub fn new(expected_compilations: u64) -> Self {
        let initial_capacity = usize::try_from(expected_compilations).unwrap_or(usize::MAX);
        Self {
            cache: Cache::builder().initial_capacity(initial_capacity).build(),
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.effective_policy_cache_capacity())
    }

    /// Policy for `compilation`, resolved on first use and cached thereafter.
    pub fn resolve_policy(&self, compilation: &dyn Compilation) -> ConfigurationPolicy {
        let id = compilation.id();
        self.cache.get_with(id, || {
            let policy = resolve_declared(compilation);
            tracing::debug!(compilation = %id, ?policy, "resolved ConfigureAwait policy");
            policy
        })
    }

    /// Cached policy for `id`, if it has been resolved.
    pub fn cached(&self, id: CompilationId) -> Option<ConfigurationPolicy> {
        self.cache.get(&id)
    }

    /// Drop the cached policy for `id`.
    pub fn invalidate(&self, id: CompilationId) {
        self.cache.invalidate(&id);
    }

    /// `current` supersedes `previous`: drop the stale entry and resolve the new one.
    pub fn replace(
        &self,
        previous: CompilationId,
        current: &dyn Compilation,
    ) -> ConfigurationPolicy {
        if previous != current.id() {
            self.invalidate(previous);
        }
        self.resolve_policy(current)
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

impl Default for ConfigurationResolver {
    fn default() -> Self {
        Self::new(DEFAULT_POLICY_CACHE_CAPACITY)
    }
}
