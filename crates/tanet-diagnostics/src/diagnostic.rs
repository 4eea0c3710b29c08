//! Diagnostic records.

use crate::position::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// A problem that makes the construct it was reported for unusable.
    Error,
    /// A problem that does not invalidate the construct.
    Warning,
}

/// A single reported problem.
///
/// Carries the source position and the rendered document path that were
/// current in the [`Diagnostics`](crate::Diagnostics) accumulator when the
/// report was made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity of the report.
    pub kind: DiagnosticKind,
    /// Source range the report applies to.
    pub position: Position,
    /// Rendered path of the document node the report applies to, e.g.
    /// `/nta/template[2]/location[1]`.
    pub path: String,
    /// Human-readable message.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.path.is_empty() {
            write!(f, "{}: ", self.path)?;
        }
        write!(
            f,
            "{}.{}-{}.{}: {}",
            self.position.first_line,
            self.position.first_column,
            self.position.last_line,
            self.position.last_column,
            self.message
        )
    }
}
