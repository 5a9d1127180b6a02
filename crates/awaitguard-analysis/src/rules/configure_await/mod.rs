//! `ConfigureAwait(false)` must be used.
//!
//! When a compilation declares that every await must decline its captured
//! scheduling context, each await expression that does not end in
//! `.ConfigureAwait(false)` gets one warning. Two shapes are exempt: awaits
//! that already call `ConfigureAwait`, and `await Task.Yield()`, which has no
//! context capture to decline.
//!
//! Leaf-first:
//! - [`policy`] resolves and caches the policy per compilation
//! - [`classifier`] turns a suspension point into [`SuspensionPointInfo`]
//! - [`exclusion`] decides whether a classified point is exempt
//! - [`engine`] runs the three per point and emits diagnostics

pub mod classifier;
pub mod compilation;
pub mod engine;
pub mod exclusion;
pub mod policy;
pub mod semantic;
pub mod suspension;

pub use classifier::{
    InvocationShape, SuspensionPointClassifier, SuspensionPointInfo, SuspensionShape,
};
pub use compilation::{Compilation, CompilationInfo, DeclaredAttribute};
pub use engine::{ConfigureAwaitRule, Decision, RuleState, RunSummary};
pub use exclusion::{exclusion_reason, is_excluded, ExclusionReason};
pub use policy::{resolve_declared, ConfigurationPolicy, ConfigurationResolver};
pub use semantic::{SemanticContext, WellKnownSymbols};
pub use suspension::{InnerOperation, MethodSymbol, OperationKind, SuspensionPoint, TypeSymbol};

use super::types::{DiagnosticDescriptor, Severity};

/// Stable rule identifier.
pub const RULE_ID: &str = "ASYNC0015";

/// Descriptor for every diagnostic this rule emits.
pub static CONFIGURE_AWAIT_FALSE_MUST_BE_USED: DiagnosticDescriptor = DiagnosticDescriptor {
    id: RULE_ID,
    title: "ConfigureAwait(false) must be used.",
    message: "ConfigureAwait(false) must be used.",
    description: "The assembly is configured to use .ConfigureAwait(false)",
    category: "CodeSmell",
    default_severity: Severity::Warning,
    enabled_by_default: true,
};
