//! Fatal parse errors.
//!
//! Only conditions that make it unsafe to keep traversing the document are
//! represented here; everything local to one construct is reported into the
//! shared [`Diagnostics`](tanet_diagnostics::Diagnostics) instead and does
//! not unwind.

use thiserror::Error;

/// Result type alias for tanet-xml operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// A condition that aborts the whole parse.
///
/// The traversal has no backtracking: once the single-event lookahead has
/// been spent there is no safe way to resynchronize to a later sibling, so
/// every structural ambiguity is fatal.
#[derive(Debug, Error)]
pub enum ParseError {
    /// An element whose name is not in the closed tag set.
    #[error("Unknown element <{name}> at {path}")]
    UnknownTag { name: String, path: String },

    /// The input ended while elements were still open.
    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },

    /// The tracked path and the closing events disagree.
    #[error("Corrupted path: closing </{found}> at {path}")]
    CorruptedPath { found: String, path: String },

    /// A mandatory element is absent.
    #[error("Missing mandatory element <{expected}> at {path}")]
    MissingElement {
        expected: &'static str,
        path: String,
    },

    /// A source/target/init reference names no known location.
    #[error("Unresolved location reference{} at {path}", .id.as_deref().map(|i| format!(" '{i}'")).unwrap_or_default())]
    UnresolvedReference { id: Option<String>, path: String },

    /// A syntax error reported by the underlying XML reader.
    #[error("XML syntax error: {message}{}", .position.map(|p| format!(" at byte {p}")).unwrap_or_default())]
    Syntax {
        message: String,
        /// Byte offset where the error occurred.
        position: Option<u64>,
    },

    /// The named source could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for ParseError {
    fn from(err: quick_xml::Error) -> Self {
        ParseError::Syntax {
            message: err.to_string(),
            position: None,
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for ParseError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        ParseError::Syntax {
            message: format!("Attribute error: {err}"),
            position: None,
        }
    }
}
