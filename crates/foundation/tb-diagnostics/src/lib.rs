//! Diagnostics produced by the analysis and naming passes
//!
//! Every automatic resolution (pruned interfaces, synthesized diamonds, demoted
//! overloads) is reported here, as are recovered input anomalies and consistency-gate
//! violations.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Diagnostic severity
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// An automatic resolution that needs no action
    #[display("info")]
    Info,
    /// Input that could only be partially processed
    #[display("warning")]
    Warning,
    /// A consistency violation
    #[display("error")]
    Error,
}

/// Stable diagnostic codes
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DiagnosticCode {
    /// A redundant interface was dropped from a type's interface list
    #[display("INTERFACE_PRUNED")]
    InterfacePruned,
    /// An interface reference could not be resolved in the graph
    #[display("INTERFACE_UNRESOLVED")]
    InterfaceUnresolved,
    /// A `_Base` interface and an intersection alias were synthesized
    #[display("DIAMOND_SYNTHESIZED")]
    DiamondSynthesized,
    /// Members differing only by return type were split across surfaces
    #[display("RETURN_CONFLICT")]
    ReturnConflict,
    /// Modifier-only duplicate overloads were omitted
    #[display("OVERLOAD_OMITTED")]
    OverloadOmitted,
    /// An explicit-implementation view was planned
    #[display("VIEW_PLANNED")]
    ViewPlanned,
    /// A view-only member has no interface to be viewed through
    #[display("VIEW_ORPHAN")]
    ViewOrphan,
    /// A name collided with a reserved word and was sanitized
    #[display("RESERVED_WORD")]
    ReservedWord,
    /// A type could not be processed by a pass and was left unchanged
    #[display("TYPE_SKIPPED")]
    TypeSkipped,
    /// The final consistency gate found a violation
    #[display("PHASE_VIOLATION")]
    PhaseViolation,
}

/// A single diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level
    pub severity: Severity,
    /// Diagnostic code
    pub code: DiagnosticCode,
    /// Human-readable message
    pub message: String,
    /// Stable identity (string form) of the symbol concerned, if any
    pub location: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic without a location
    pub fn new(severity: Severity, code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            location: None,
        }
    }

    /// Attach a location
    #[must_use]
    pub fn at(mut self, location: impl ToString) -> Self {
        self.location = Some(location.to_string());
        self
    }
}

/// Ordered sink for diagnostics
///
/// Passes report in their (deterministic) traversal order; the sink never reorders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a diagnostic
    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Report an informational diagnostic about a symbol
    pub fn info(&mut self, code: DiagnosticCode, location: impl ToString, message: impl Into<String>) {
        self.report(Diagnostic::new(Severity::Info, code, message).at(location));
    }

    /// Report a warning about a symbol
    pub fn warning(&mut self, code: DiagnosticCode, location: impl ToString, message: impl Into<String>) {
        self.report(Diagnostic::new(Severity::Warning, code, message).at(location));
    }

    /// Report an error about a symbol
    pub fn error(&mut self, code: DiagnosticCode, location: impl ToString, message: impl Into<String>) {
        self.report(Diagnostic::new(Severity::Error, code, message).at(location));
    }

    /// Append all diagnostics from another sink
    pub fn extend(&mut self, other: Self) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// All diagnostics so far
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics with the given code
    pub fn with_code(&self, code: DiagnosticCode) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |diagnostic| diagnostic.code == code)
    }

    /// Whether any error-severity diagnostic was reported
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| diagnostic.severity == Severity::Error)
    }

    /// Number of diagnostics
    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Whether the sink is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Take all diagnostics
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_preserves_order() {
        let mut sink = Diagnostics::new();
        sink.info(DiagnosticCode::InterfacePruned, "core:A", "first");
        sink.warning(DiagnosticCode::TypeSkipped, "core:B", "second");

        let messages: Vec<_> = sink.diagnostics().iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, ["first", "second"]);
        assert!(!sink.has_errors());
    }

    #[test]
    fn test_has_errors() {
        let mut sink = Diagnostics::new();
        sink.error(DiagnosticCode::PhaseViolation, "core:A", "collision");
        assert!(sink.has_errors());
        assert_eq!(sink.with_code(DiagnosticCode::PhaseViolation).count(), 1);
    }

    #[test]
    fn test_code_display() {
        assert_eq!(DiagnosticCode::ReturnConflict.to_string(), "RETURN_CONFLICT");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
