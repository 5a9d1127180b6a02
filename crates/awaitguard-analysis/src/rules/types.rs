//! Core types shared by rules: severities, descriptors, diagnostics, sinks.

use std::fmt;

use awaitguard_core::types::SourceSpan;
use serde::Serialize;

/// Severity levels for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
            Self::Hint => write!(f, "hint"),
        }
    }
}

/// Static description of a rule. Every diagnostic a rule emits is created
/// from its descriptor, so id, message and severity cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiagnosticDescriptor {
    /// Stable identifier used by downstream tooling for suppression and filtering.
    pub id: &'static str,
    pub title: &'static str,
    pub message: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub default_severity: Severity,
    pub enabled_by_default: bool,
}

impl DiagnosticDescriptor {
    /// Create a diagnostic for this rule anchored at `location`.
    pub fn create(&'static self, location: SourceSpan) -> Diagnostic {
        Diagnostic {
            rule_id: self.id,
            message: self.message,
            severity: self.default_severity,
            location,
        }
    }
}

/// A single diagnostic produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Diagnostic {
    pub rule_id: &'static str,
    pub message: &'static str,
    pub severity: Severity,
    pub location: SourceSpan,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {}: {}",
            self.location, self.severity, self.rule_id, self.message
        )
    }
}

/// Receiver for emitted diagnostics. The reporting pipeline lives behind this.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SAMPLE: DiagnosticDescriptor = DiagnosticDescriptor {
        id: "SAMPLE001",
        title: "Sample",
        message: "Sample message.",
        description: "Sample description",
        category: "CodeSmell",
        default_severity: Severity::Warning,
        enabled_by_default: true,
    };

    #[test]
    fn create_copies_descriptor_fields() {
        let span = SourceSpan::on_line("a.cs", 3, 5, 20);
        let diagnostic = SAMPLE.create(span.clone());
        assert_eq!(diagnostic.rule_id, "SAMPLE001");
        assert_eq!(diagnostic.message, "Sample message.");
        assert_eq!(diagnostic.severity, Severity::Warning);
        assert_eq!(diagnostic.location, span);
    }

    #[test]
    fn display_is_compiler_style() {
        let diagnostic = SAMPLE.create(SourceSpan::on_line("a.cs", 3, 5, 20));
        assert_eq!(
            diagnostic.to_string(),
            "a.cs:3:5: warning SAMPLE001: Sample message."
        );
    }

    #[test]
    fn vec_sink_collects_in_order() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        sink.report(SAMPLE.create(SourceSpan::on_line("a.cs", 1, 1, 2)));
        sink.report(SAMPLE.create(SourceSpan::on_line("a.cs", 2, 1, 2)));
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[1].location.start_line, 2);
    }
}
