//! Suspension points as supplied by the host's discovery pass.

use awaitguard_core::types::SourceSpan;
use serde::Serialize;

/// A type as named in metadata: namespace-qualified, generic arity as a
/// backtick suffix (``System.Threading.Tasks.Task`1``).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeSymbol {
    pub metadata_name: String,
}

impl TypeSymbol {
    pub fn new(metadata_name: impl Into<String>) -> Self {
        Self {
            metadata_name: metadata_name.into(),
        }
    }

    /// Name of the generic definition: anything from the first `<` or `[`
    /// (constructed type arguments) is dropped.
    pub fn definition_name(&self) -> &str {
        let end = self
            .metadata_name
            .find(['<', '['])
            .unwrap_or(self.metadata_name.len());
        self.metadata_name[..end].trim()
    }
}

/// Target of an invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MethodSymbol {
    pub name: String,
    /// `None` when the host could not bind the receiver type.
    pub containing_type: Option<TypeSymbol>,
}

impl MethodSymbol {
    pub fn new(name: impl Into<String>, containing_type: Option<TypeSymbol>) -> Self {
        Self {
            name: name.into(),
            containing_type,
        }
    }
}

/// Kind of the operation directly under the await.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Invocation,
    PropertyReference,
    FieldReference,
    LocalReference,
    ParameterReference,
    Other,
}

/// The awaited operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct InnerOperation {
    pub kind: OperationKind,
    /// Invoked method; only meaningful for [`OperationKind::Invocation`].
    pub target: Option<MethodSymbol>,
}

/// One await expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SuspensionPoint {
    pub span: SourceSpan,
    /// `None` when the host could not produce an operation for the operand.
    pub inner: Option<InnerOperation>,
    /// Declared result type of the inner operation.
    pub result_type: Option<TypeSymbol>,
}

impl SuspensionPoint {
    /// A point with no operation information at all.
    pub fn unbound(span: SourceSpan) -> Self {
        Self {
            span,
            inner: None,
            result_type: None,
        }
    }

    /// `await target(...)`.
    pub fn awaiting_call(
        span: SourceSpan,
        target: MethodSymbol,
        result_type: Option<TypeSymbol>,
    ) -> Self {
        Self {
            span,
            inner: Some(InnerOperation {
                kind: OperationKind::Invocation,
                target: Some(target),
            }),
            result_type,
        }
    }

    /// `await value` where the operand is a local, field, property, etc.
    pub fn awaiting_value(
        span: SourceSpan,
        kind: OperationKind,
        result_type: Option<TypeSymbol>,
    ) -> Self {
        Self {
            span,
            inner: Some(InnerOperation { kind, target: None }),
            result_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_name_drops_type_arguments() {
        assert_eq!(
            TypeSymbol::new("System.Threading.Tasks.Task`1<System.Int32>").definition_name(),
            "System.Threading.Tasks.Task`1"
        );
        assert_eq!(
            TypeSymbol::new("System.Threading.Tasks.ValueTask`1[[System.String]]")
                .definition_name(),
            "System.Threading.Tasks.ValueTask`1"
        );
        assert_eq!(
            TypeSymbol::new("System.Runtime.CompilerServices.YieldAwaitable").definition_name(),
            "System.Runtime.CompilerServices.YieldAwaitable"
        );
    }
}
