//! Semantic facts the classifier asks the host for.

use awaitguard_core::types::FxHashSet;

use super::suspension::{MethodSymbol, TypeSymbol};

/// Name of the context-declining operation.
pub const CONFIGURE_AWAIT_METHOD: &str = "ConfigureAwait";

/// Result type of `Task.Yield()`.
pub const YIELD_AWAITABLE_TYPE: &str = "System.Runtime.CompilerServices.YieldAwaitable";

/// Types that declare a `ConfigureAwait` the rule recognizes.
const CONFIGURE_AWAIT_RECEIVERS: &[&str] = &[
    "System.Threading.Tasks.Task",
    "System.Threading.Tasks.Task`1",
    "System.Threading.Tasks.ValueTask",
    "System.Threading.Tasks.ValueTask`1",
    "System.Threading.Tasks.TaskAsyncEnumerableExtensions",
];

/// Answers symbol questions for the classifier.
///
/// `None` means the host could not decide. The classifier treats that as
/// `false`, so a missing fact never exempts a point.
pub trait SemanticContext: Send + Sync {
    /// Whether `method` is the context-declining operation.
    fn is_context_declining(&self, method: &MethodSymbol) -> Option<bool>;

    /// Whether `ty` is the scheduler-yield primitive.
    fn is_scheduler_yield(&self, ty: &TypeSymbol) -> Option<bool>;
}

/// Recognizes the framework's own symbols by metadata name.
#[derive(Debug, Clone)]
pub struct WellKnownSymbols {
    configure_await_receivers: FxHashSet<&'static str>,
}

impl WellKnownSymbols {
    pub fn new() -> Self {
        Self {
            configure_await_receivers: CONFIGURE_AWAIT_RECEIVERS.iter().copied().collect(),
        }
    }
}

impl Default for WellKnownSymbols {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticContext for WellKnownSymbols {
    fn is_context_declining(&self, method: &MethodSymbol) -> Option<bool> {
        if method.name != CONFIGURE_AWAIT_METHOD {
            return Some(false);
        }
        let receiver = method.containing_type.as_ref()?;
        Some(
            self.configure_await_receivers
                .contains(receiver.definition_name()),
        )
    }

    fn is_scheduler_yield(&self, ty: &TypeSymbol) -> Option<bool> {
        Some(ty.definition_name() == YIELD_AWAITABLE_TYPE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(name: &str, receiver: Option<&str>) -> MethodSymbol {
        MethodSymbol::new(name, receiver.map(TypeSymbol::new))
    }

    #[test]
    fn configure_await_on_task_types_declines() {
        let symbols = WellKnownSymbols::new();
        for receiver in CONFIGURE_AWAIT_RECEIVERS {
            assert_eq!(
                symbols.is_context_declining(&method("ConfigureAwait", Some(*receiver))),
                Some(true),
                "{receiver}"
            );
        }
    }

    #[test]
    fn user_defined_configure_await_does_not_decline() {
        let symbols = WellKnownSymbols::new();
        assert_eq!(
            symbols.is_context_declining(&method("ConfigureAwait", Some("MyApp.CustomAwaitable"))),
            Some(false)
        );
    }

    #[test]
    fn unbound_receiver_is_inconclusive() {
        let symbols = WellKnownSymbols::new();
        assert_eq!(symbols.is_context_declining(&method("ConfigureAwait", None)), None);
    }

    #[test]
    fn other_methods_do_not_decline() {
        let symbols = WellKnownSymbols::new();
        let continue_with = method("ContinueWith", Some("System.Threading.Tasks.Task"));
        assert_eq!(symbols.is_context_declining(&continue_with), Some(false));
    }

    #[test]
    fn yield_awaitable_is_scheduler_yield() {
        let symbols = WellKnownSymbols::new();
        assert_eq!(symbols.is_scheduler_yield(&TypeSymbol::new(YIELD_AWAITABLE_TYPE)), Some(true));
        assert_eq!(
            symbols.is_scheduler_yield(&TypeSymbol::new("System.Threading.Tasks.Task")),
            Some(false)
        );
    }
}
