//! Diagnostic accumulation for the tanet document parsers.
//!
//! Parsing a timed-automata document can surface many problems in one pass.
//! Rather than failing on the first one, the structural parser and the
//! embedded expression grammar both append [`Diagnostic`] records to a shared
//! [`Diagnostics`] accumulator owned by the caller. Each record carries the
//! source [`Position`] and the document path that were current when it was
//! reported.
//!
//! # Example
//!
//! ```rust
//! use tanet_diagnostics::{Diagnostics, Position};
//!
//! let mut diagnostics = Diagnostics::new();
//! diagnostics.set_path("/nta/template[1]/name");
//! diagnostics.set_position(Position::new(4, 2, 4, 9));
//! diagnostics.report_error("Keywords are not allowed here");
//!
//! assert!(diagnostics.has_errors());
//! assert_eq!(diagnostics.errors()[0].path, "/nta/template[1]/name");
//! ```

pub mod context;
pub mod diagnostic;
pub mod position;

pub use context::Diagnostics;
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use position::{Position, offset_to_position};
