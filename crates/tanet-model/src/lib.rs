//! Model-construction interfaces for the tanet structural parser.
//!
//! The structural parser does not own the model it discovers. It pushes an
//! ordered stream of notifications into a [`ModelBuilder`], and routes every
//! extracted text fragment (declarations, guards, invariants, composition
//! expressions) into an [`ExpressionParser`]. Both are supplied by the
//! caller; this crate defines the seams plus a reference [`Network`]
//! aggregate assembled by [`NetworkBuilder`].
//!
//! A builder may reject a notification semantically (duplicate template name,
//! unknown location on an edge) by returning a [`SemanticError`]; the parser
//! reports it as a recoverable diagnostic and keeps going.

pub mod builder;
pub mod network;
pub mod syntax;

pub use builder::{ExpressionParser, ModelBuilder, SemanticError};
pub use network::{Edge, Location, Network, NetworkBuilder, Template};
pub use syntax::{Dialect, SyntaxPart};
