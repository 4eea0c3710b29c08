//! Structural parsing of timed-automata network documents.
//!
//! This crate reads the XML document format describing networks of timed
//! automata: a root `nta` element holding declarations, parameterised
//! templates with locations and transitions, and trailing instantiation and
//! system composition blocks. It handles the *structure* only; the text
//! spans embedded in the document (declarations, guards, invariants and the
//! like) are handed to an [`ExpressionParser`](tanet_model::ExpressionParser)
//! supplied by the caller, and each structurally significant point is pushed
//! to a caller-supplied [`ModelBuilder`](tanet_model::ModelBuilder).
//!
//! Parsing is a single forward pass over the quick-xml event stream with one
//! event of lookahead. Fatal structural faults surface as [`ParseError`];
//! problems local to one construct are accumulated in the shared
//! [`Diagnostics`](tanet_diagnostics::Diagnostics) and do not stop the
//! traversal.
//!
//! ```no_run
//! use tanet_diagnostics::Diagnostics;
//! use tanet_model::{Dialect, NetworkBuilder, SyntaxPart};
//! # use tanet_xml::parse_file;
//! # struct Expressions;
//! # impl tanet_model::ExpressionParser for Expressions {
//! #     fn parse(
//! #         &mut self,
//! #         _text: &str,
//! #         _part: SyntaxPart,
//! #         _dialect: Dialect,
//! #         _diagnostics: &mut Diagnostics,
//! #     ) -> i32 {
//! #         0
//! #     }
//! #     fn is_keyword(&self, _ident: &str) -> bool {
//! #         false
//! #     }
//! # }
//!
//! let mut builder = NetworkBuilder::new();
//! let mut expressions = Expressions;
//! let mut diagnostics = Diagnostics::new();
//! parse_file(
//!     "gate.xml",
//!     &mut builder,
//!     &mut expressions,
//!     &mut diagnostics,
//!     Dialect::Current,
//! )?;
//! for diagnostic in diagnostics.errors() {
//!     eprintln!("{diagnostic}");
//! }
//! # Ok::<(), tanet_xml::ParseError>(())
//! ```

mod error;
mod path;
mod reader;
mod resolver;
mod tags;

pub use error::{ParseError, Result};
pub use path::Path;
pub use reader::{parse_buffer, parse_file};
pub use resolver::LocationNames;
pub use tags::Tag;
