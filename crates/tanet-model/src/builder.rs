//! The seams between the structural parser and its collaborators.

use crate::syntax::{Dialect, SyntaxPart};
use tanet_diagnostics::Diagnostics;
use thiserror::Error;

/// A semantic rejection raised by a [`ModelBuilder`] notification.
///
/// Semantic rejections are local to one construct: the structural parser
/// reports them into the shared diagnostics and continues with the next
/// sibling, so one parse invocation can surface many of them.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct SemanticError {
    pub message: String,
}

impl SemanticError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Receives ordered notifications from the structural parser and owns the
/// resulting template/location/edge/process graph.
///
/// Notifications arrive in document order. For every `begin_template` that
/// succeeds, a matching `end_template` follows; a rejected `begin_template`
/// suppresses the rest of that template's body. The builder must tolerate a
/// partially built model when the parse aborts fatally; the caller decides
/// whether to keep or discard it.
pub trait ModelBuilder {
    /// A template is starting. `name` is `None` when the template is
    /// anonymous or its name failed identifier validation.
    fn begin_template(
        &mut self,
        name: Option<&str>,
        parameter_count: i32,
    ) -> Result<(), SemanticError>;

    /// The current template is complete.
    fn end_template(&mut self);

    /// A location was declared in the current template.
    fn add_location(&mut self, name: &str, has_invariant: bool) -> Result<(), SemanticError>;

    /// The named location is urgent.
    fn mark_urgent(&mut self, name: &str) -> Result<(), SemanticError>;

    /// The named location is committed.
    fn mark_committed(&mut self, name: &str) -> Result<(), SemanticError>;

    /// The named location is the initial location of the current template.
    fn set_initial(&mut self, name: &str) -> Result<(), SemanticError>;

    /// An edge between two locations of the current template.
    fn add_edge(&mut self, source: &str, target: &str) -> Result<(), SemanticError>;

    /// The whole document has been traversed.
    fn done(&mut self);
}

/// The embedded expression/declaration grammar, external to this core.
///
/// The structural parser extracts text spans from the document and hands
/// them here, tagged with the [`SyntaxPart`] entry point to parse them with
/// and the active [`Dialect`]. Before each call the parser stamps
/// `diagnostics` with the position and path of the enclosing element; the
/// implementation is responsible for any finer-grained offset bookkeeping
/// within the span, and appends its own diagnostics to the same accumulator.
pub trait ExpressionParser {
    /// Parse `text` with the selected entry point.
    ///
    /// Returns a non-negative, entry-point-specific count on success (the
    /// parameter count for [`SyntaxPart::Parameters`]) and a negative value
    /// on failure. Failures are reported through `diagnostics`, not through
    /// the return value alone.
    fn parse(
        &mut self,
        text: &str,
        part: SyntaxPart,
        dialect: Dialect,
        diagnostics: &mut Diagnostics,
    ) -> i32;

    /// Whether `ident` is a reserved keyword at a name position.
    fn is_keyword(&self, ident: &str) -> bool;
}
