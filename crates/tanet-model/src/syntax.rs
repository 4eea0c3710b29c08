//! Selectors threaded through every embedded-grammar call.

use serde::{Deserialize, Serialize};

/// Which entry point of the embedded expression grammar a text span should
/// be parsed with.
///
/// `Declaration` through `Assignment` select entry points of the
/// expression/declaration grammar family; `Instantiation` and
/// `SystemComposition` select the process-composition family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyntaxPart {
    /// Global or template-local declarations.
    Declaration,
    /// A template parameter list; parsing yields the parameter count.
    Parameters,
    /// A location invariant expression.
    Invariant,
    /// An edge guard expression.
    Guard,
    /// An edge synchronisation action.
    Synchronisation,
    /// An edge assignment list.
    Assignment,
    /// Process instantiations.
    Instantiation,
    /// The system composition line.
    SystemComposition,
}

/// Which dialect of the embedded textual syntax is in effect.
///
/// Threaded uniformly through every embedded-grammar call; the structural
/// grammar itself is dialect-independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dialect {
    /// The legacy syntax.
    Legacy,
    /// The current syntax.
    Current,
}
