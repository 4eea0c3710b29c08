//! The diagnostic accumulator shared by one parse invocation.

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::position::Position;

/// Accumulates errors and warnings during parsing.
///
/// The accumulator keeps a notion of the *current* position and document
/// path; every report is stamped with both. The structural parser updates
/// them as it moves through the document, and the embedded expression grammar
/// may narrow the position further within a text span via
/// [`set_position`](Diagnostics::set_position).
///
/// Both sequences are append-only until [`clear`](Diagnostics::clear). The
/// accumulator is owned by the caller and outlives a parse call, so later
/// pipeline stages (type checking, reporting) can inspect what was collected
/// regardless of whether the parse itself succeeded.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
    position: Position,
    path: String,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the position that subsequent reports will be stamped with.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// The currently active position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Set the document path that subsequent reports will be stamped with.
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    /// The currently active document path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Append an error at the current position and path.
    pub fn report_error(&mut self, message: impl Into<String>) {
        self.errors.push(self.stamp(DiagnosticKind::Error, message));
    }

    /// Append a warning at the current position and path.
    pub fn report_warning(&mut self, message: impl Into<String>) {
        self.warnings
            .push(self.stamp(DiagnosticKind::Warning, message));
    }

    fn stamp(&self, kind: DiagnosticKind, message: impl Into<String>) -> Diagnostic {
        Diagnostic {
            kind,
            position: self.position,
            path: self.path.clone(),
            message: message.into(),
        }
    }

    /// All errors reported so far, in report order.
    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    /// All warnings reported so far, in report order.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Empty both sequences. The current position and path are kept.
    pub fn clear(&mut self) {
        self.errors.clear();
        self.warnings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_are_stamped_with_current_state() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.set_path("/nta/template[1]");
        diagnostics.set_position(Position::new(2, 3, 2, 9));
        diagnostics.report_error("duplicate template name");

        diagnostics.set_path("/nta/template[2]");
        diagnostics.report_warning("empty template body");

        let errors = diagnostics.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "/nta/template[1]");
        assert_eq!(errors[0].position, Position::new(2, 3, 2, 9));

        let warnings = diagnostics.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].path, "/nta/template[2]");
    }

    #[test]
    fn test_order_is_preserved() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report_error("first");
        diagnostics.report_error("second");
        diagnostics.report_error("third");

        let messages: Vec<&str> = diagnostics
            .errors()
            .iter()
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_clear_empties_both_sequences() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report_error("e");
        diagnostics.report_warning("w");
        assert!(diagnostics.has_errors());
        assert!(diagnostics.has_warnings());

        diagnostics.clear();
        assert!(!diagnostics.has_errors());
        assert!(!diagnostics.has_warnings());
    }
}
