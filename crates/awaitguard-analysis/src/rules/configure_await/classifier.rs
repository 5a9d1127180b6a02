//! Suspension point classification.

use serde::Serialize;

use super::semantic::SemanticContext;
use super::suspension::{MethodSymbol, OperationKind, SuspensionPoint, TypeSymbol};

/// Shape of a suspension point, by what the await operand is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuspensionShape<'p> {
    /// `await call(...)`.
    Invocation(InvocationShape<'p>),
    /// Everything else: values, properties, fields, unbound operands.
    Other,
}

/// Facts extracted from an awaited invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvocationShape<'p> {
    pub target: Option<&'p MethodSymbol>,
    pub result_type: Option<&'p TypeSymbol>,
}

impl<'p> SuspensionShape<'p> {
    pub fn of(point: &'p SuspensionPoint) -> Self {
        match &point.inner {
            Some(inner) if inner.kind == OperationKind::Invocation => {
                Self::Invocation(InvocationShape {
                    target: inner.target.as_ref(),
                    result_type: point.result_type.as_ref(),
                })
            }
            _ => Self::Other,
        }
    }
}

/// Classification output consumed by the exclusion rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SuspensionPointInfo {
    pub has_inner_invocation: bool,
    pub inner_invocation_already_declines_context: bool,
    pub result_type_is_scheduler_yield: bool,
}

/// Describes suspension points using facts from a [`SemanticContext`].
pub struct SuspensionPointClassifier<'s> {
    semantic: &'s dyn SemanticContext,
}

impl<'s> SuspensionPointClassifier<'s> {
    pub fn new(semantic: &'s dyn SemanticContext) -> Self {
        Self { semantic }
    }

    /// Never fails. Inconclusive facts classify as `false`.
    pub fn classify(&self, point: &SuspensionPoint) -> SuspensionPointInfo {
        match SuspensionShape::of(point) {
            SuspensionShape::Invocation(invocation) => SuspensionPointInfo {
                has_inner_invocation: true,
                inner_invocation_already_declines_context: invocation
                    .target
                    .and_then(|m| self.semantic.is_context_declining(m))
                    .unwrap_or(false),
                result_type_is_scheduler_yield: invocation
                    .result_type
                    .and_then(|t| self.semantic.is_scheduler_yield(t))
                    .unwrap_or(false),
            },
            SuspensionShape::Other => SuspensionPointInfo::default(),
        }
    }
}
