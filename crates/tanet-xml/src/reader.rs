//! Recursive-descent traversal of network documents.
//!
//! The reader walks the quick-xml event stream in a single forward pass with
//! one event of lookahead and no backtracking. Every start element pushes the
//! diagnostic [`Path`]; every end (or self-closing) element pops it and is
//! checked against the tag being closed. Text spans are routed to the
//! embedded expression grammar, and each structurally significant point is
//! pushed to the caller's [`ModelBuilder`].
//!
//! The grammar, with `?` optional and `*` repeated:
//!
//! ```text
//! document   := nta
//! nta        := declaration? template* instantiation? system?
//! template   := name parameter? declaration? location* init transition*
//! location   := name? label* urgent? committed?
//! transition := source target label* nail*
//! ```

use crate::error::{ParseError, Result};
use crate::path::Path;
use crate::resolver::LocationNames;
use crate::tags::Tag;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tanet_diagnostics::{Diagnostics, offset_to_position};
use tanet_model::{Dialect, ExpressionParser, ModelBuilder, SemanticError, SyntaxPart};

/// Parse a network document from a file.
///
/// Structural soundness is reported through the returned `Result`; everything
/// local to one construct lands in `diagnostics`, which is populated
/// regardless of the outcome.
pub fn parse_file(
    path: impl AsRef<std::path::Path>,
    builder: &mut dyn ModelBuilder,
    expressions: &mut dyn ExpressionParser,
    diagnostics: &mut Diagnostics,
    dialect: Dialect,
) -> Result<()> {
    let path = path.as_ref();
    tracing::debug!(file = %path.display(), "Parsing network document");
    let source = std::fs::read_to_string(path)?;
    parse_buffer(&source, builder, expressions, diagnostics, dialect)
}

/// Parse a network document from an in-memory buffer.
///
/// See [`parse_file`].
pub fn parse_buffer(
    source: &str,
    builder: &mut dyn ModelBuilder,
    expressions: &mut dyn ExpressionParser,
    diagnostics: &mut Diagnostics,
    dialect: Dialect,
) -> Result<()> {
    XmlReader::new(source, builder, expressions, diagnostics, dialect).document()
}

/// The current document event, reduced to what the grammar needs.
#[derive(Debug)]
enum Node {
    Start {
        tag: Tag,
        empty: bool,
        attributes: Vec<(String, String)>,
    },
    End {
        tag: Tag,
    },
    Text {
        content: String,
    },
    /// Comments, processing instructions and declarations; skipped.
    Other,
    /// End of input with no elements left open.
    Eof,
}

/// Streaming recursive-descent parser over one document.
///
/// Owns the [`Path`] and [`LocationNames`] for the duration of one parse;
/// the builder, expression grammar and diagnostics are externally owned and
/// outlive it.
struct XmlReader<'src, 'ctx> {
    source: &'src str,
    reader: Reader<&'src [u8]>,
    current: Node,
    /// Byte span of the current event.
    span: (usize, usize),
    path: Path,
    locations: LocationNames,
    builder: &'ctx mut dyn ModelBuilder,
    expressions: &'ctx mut dyn ExpressionParser,
    diagnostics: &'ctx mut Diagnostics,
    dialect: Dialect,
}

impl<'src, 'ctx> XmlReader<'src, 'ctx> {
    fn new(
        source: &'src str,
        builder: &'ctx mut dyn ModelBuilder,
        expressions: &'ctx mut dyn ExpressionParser,
        diagnostics: &'ctx mut Diagnostics,
        dialect: Dialect,
    ) -> Self {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;

        Self {
            source,
            reader,
            current: Node::Other,
            span: (0, 0),
            path: Path::new(),
            locations: LocationNames::new(),
            builder,
            expressions,
            diagnostics,
            dialect,
        }
    }

    /// Parse the whole document.
    fn document(&mut self) -> Result<()> {
        if !self.begin(Tag::Nta, true)? {
            return Err(ParseError::MissingElement {
                expected: Tag::Nta.name(),
                path: self.path.render(),
            });
        }
        self.advance()?;
        self.declaration()?;
        while self.template()? {}
        self.composition(Tag::Instantiation, SyntaxPart::Instantiation)?;
        self.composition(Tag::System, SyntaxPart::SystemComposition)?;
        self.builder.done();
        tracing::debug!("Network document traversal complete");
        Ok(())
    }

    // ==================== Event primitives ====================

    /// Move to the next document event, maintaining the path.
    ///
    /// Leaving an end element (or a self-closing start element, which is
    /// start immediately followed by end) pops the path; the popped tag must
    /// match the tag being closed. Arriving at a start element pushes its
    /// tag. End of input while elements are open is fatal.
    fn advance(&mut self) -> Result<()> {
        match &self.current {
            Node::Start {
                tag, empty: true, ..
            }
            | Node::End { tag } => {
                let tag = *tag;
                if self.path.pop() != Some(tag) {
                    return Err(ParseError::CorruptedPath {
                        found: tag.name().to_string(),
                        path: self.path.render(),
                    });
                }
            }
            _ => {}
        }

        let start = self.reader.buffer_position() as usize;
        let event = match self.reader.read_event() {
            Ok(event) => event,
            Err(err) => {
                return Err(ParseError::Syntax {
                    message: err.to_string(),
                    position: Some(self.reader.error_position()),
                });
            }
        };
        let end = self.reader.buffer_position() as usize;
        self.span = (start, end);

        self.current = match event {
            Event::Start(e) => self.element(&e, false)?,
            Event::Empty(e) => self.element(&e, true)?,
            Event::End(e) => {
                let name = local_name(e.name().as_ref());
                match Tag::from_name(&name) {
                    Some(tag) => Node::End { tag },
                    None => {
                        return Err(ParseError::UnknownTag {
                            name,
                            path: self.path.render(),
                        });
                    }
                }
            }
            Event::Text(e) => Node::Text {
                content: e.unescape()?.into_owned(),
            },
            Event::CData(e) => Node::Text {
                content: String::from_utf8_lossy(e.as_ref()).into_owned(),
            },
            Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => Node::Other,
            Event::Eof => {
                if self.path.depth() > 0 {
                    let expected = match self.path.innermost() {
                        Some(tag) => format!("closing tag </{}>", tag.name()),
                        None => "end of document".to_string(),
                    };
                    return Err(ParseError::UnexpectedEof { expected });
                }
                Node::Eof
            }
        };

        if let Node::Start { tag, .. } = self.current {
            self.path.push(tag);
        }
        Ok(())
    }

    /// Convert a start event into a [`Node::Start`], resolving the tag.
    fn element(&self, e: &BytesStart<'_>, empty: bool) -> Result<Node> {
        let name = local_name(e.name().as_ref());
        let tag = match Tag::from_name(&name) {
            Some(tag) => tag,
            None => {
                return Err(ParseError::UnknownTag {
                    name,
                    path: self.path.render(),
                });
            }
        };

        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = local_name(attr.key.as_ref());
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }

        Ok(Node::Start {
            tag,
            empty,
            attributes,
        })
    }

    /// Read until a start element. Returns whether that element has the
    /// given tag.
    ///
    /// If `skip_empty` is true, self-closing elements with the given tag are
    /// invisible: they are skipped and the scan continues. There is no
    /// backtracking: a `false` result leaves the reader positioned on the
    /// non-matching element, and the caller must be able to treat the
    /// element it asked for as absent.
    fn begin(&mut self, tag: Tag, skip_empty: bool) -> Result<bool> {
        loop {
            let (current, empty) = loop {
                match &self.current {
                    Node::Start { tag, empty, .. } => break (*tag, *empty),
                    Node::Eof => return Ok(false),
                    _ => self.advance()?,
                }
            };

            if current != tag {
                return Ok(false);
            }
            if !skip_empty || !empty {
                return Ok(true);
            }
            self.advance()?;
        }
    }

    /// Value of an attribute of the current start element.
    fn attribute(&self, name: &str) -> Option<&str> {
        match &self.current {
            Node::Start { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    /// Text content of the current event, if it is a text node.
    fn text(&self) -> Option<String> {
        match &self.current {
            Node::Text { content } => Some(content.clone()),
            _ => None,
        }
    }

    // ==================== Diagnostics plumbing ====================

    /// Stamp the diagnostics with the current event's position and path.
    fn stamp(&mut self) {
        self.diagnostics
            .set_position(offset_to_position(self.source, self.span.0, self.span.1));
        self.diagnostics.set_path(self.path.render());
    }

    fn report_error(&mut self, message: impl Into<String>) {
        self.stamp();
        self.diagnostics.report_error(message);
    }

    /// Route a text span into the embedded expression grammar.
    fn parse_text(&mut self, text: &str, part: SyntaxPart) -> i32 {
        self.stamp();
        self.expressions
            .parse(text, part, self.dialect, self.diagnostics)
    }

    // ==================== Productions ====================

    /// Optional declaration block.
    fn declaration(&mut self) -> Result<bool> {
        if self.begin(Tag::Declaration, true)? {
            self.advance()?;
            if let Some(text) = self.text() {
                self.parse_text(&text, SyntaxPart::Declaration);
            }
            return Ok(true);
        }
        Ok(false)
    }

    /// Optional label. Returns the value of its `kind` attribute, or `None`
    /// when no label element is present.
    ///
    /// Recognized kinds dispatch the label text to the matching entry point
    /// of the expression grammar; unrecognized kinds are consumed silently.
    fn label(&mut self) -> Result<Option<String>> {
        if !self.begin(Tag::Label, true)? {
            return Ok(None);
        }
        let kind = self.attribute("kind").unwrap_or_default().to_string();
        self.advance()?;

        if let Some(text) = self.text() {
            match kind.as_str() {
                "invariant" => {
                    self.parse_text(&text, SyntaxPart::Invariant);
                }
                "guard" => {
                    self.parse_text(&text, SyntaxPart::Guard);
                }
                "synchronisation" => {
                    self.parse_text(&text, SyntaxPart::Synchronisation);
                }
                "assignment" => {
                    self.parse_text(&text, SyntaxPart::Assignment);
                }
                _ => {}
            }
        }
        Ok(Some(kind))
    }

    /// Optional name element. Returns the validated identifier, or `None` if
    /// the element is absent or its content fails validation. Validation
    /// failures are recoverable, and the name is then treated as absent.
    fn name(&mut self) -> Result<Option<String>> {
        if self.begin(Tag::Name, true)? {
            self.advance()?;
            if let Some(text) = self.text() {
                match symbol(&text) {
                    Ok(id) => {
                        if !self.expressions.is_keyword(&id) {
                            return Ok(Some(id));
                        }
                        self.report_error("Keywords are not allowed here");
                    }
                    Err(message) => self.report_error(message),
                }
            }
        }
        Ok(None)
    }

    /// Optional urgent marker.
    fn urgent(&mut self) -> Result<bool> {
        if self.begin(Tag::Urgent, false)? {
            self.advance()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Optional committed marker.
    fn committed(&mut self) -> Result<bool> {
        if self.begin(Tag::Committed, false)? {
            self.advance()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Optional location.
    fn location(&mut self) -> Result<bool> {
        if !self.begin(Tag::Location, false)? {
            return Ok(false);
        }

        // Reports about the location as a whole point at its start element,
        // not at wherever the lookahead has scanned to by the time they are
        // made.
        let position = offset_to_position(self.source, self.span.0, self.span.1);
        let origin = self.path.render();

        let id = self.attribute("id").map(str::to_owned);
        self.advance()?;

        let name = self.name()?;
        let mut has_invariant = false;
        while let Some(kind) = self.label()? {
            if kind == "invariant" {
                has_invariant = true;
            }
        }
        let urgent = self.urgent()?;
        let committed = self.committed()?;

        // Anonymous locations get an internal name derived from their id.
        // The id → name mapping is recorded before the builder is notified,
        // so the location stays referenceable even if the builder rejects it.
        let resolved = match (&id, &name) {
            (Some(id), _) => self.locations.register(id, name.as_deref()),
            (None, Some(name)) => name.clone(),
            (None, None) => {
                self.diagnostics.set_position(position);
                self.diagnostics.set_path(origin);
                self.diagnostics
                    .report_error("Location has no name and no identifier");
                return Ok(true);
            }
        };

        if let Err(err) = self.notify_location(&resolved, has_invariant, urgent, committed) {
            self.diagnostics.set_position(position);
            self.diagnostics.set_path(origin);
            self.diagnostics.report_error(err.to_string());
        }
        Ok(true)
    }

    fn notify_location(
        &mut self,
        name: &str,
        has_invariant: bool,
        urgent: bool,
        committed: bool,
    ) -> std::result::Result<(), SemanticError> {
        self.builder.add_location(name, has_invariant)?;
        if committed {
            self.builder.mark_committed(name)?;
        }
        if urgent {
            self.builder.mark_urgent(name)?;
        }
        Ok(())
    }

    /// The init marker. The production consumes its slot even when the
    /// element is absent, in which case "Missing initial state" is reported.
    ///
    /// An absent `ref` attribute is likewise recoverable; a `ref` that names
    /// no known location is fatal.
    fn init(&mut self) -> Result<bool> {
        if self.begin(Tag::Init, false)? {
            match self.attribute("ref").map(str::to_owned) {
                Some(id) => {
                    let name = match self.locations.resolve(&id) {
                        Some(name) => name.to_owned(),
                        None => {
                            return Err(ParseError::UnresolvedReference {
                                id: Some(id),
                                path: self.path.render(),
                            });
                        }
                    };
                    if let Err(err) = self.builder.set_initial(&name) {
                        self.report_error(err.to_string());
                    }
                }
                None => self.report_error("Missing initial state"),
            }
            self.advance()?;
            Ok(true)
        } else {
            self.report_error("Missing initial state");
            Ok(false)
        }
    }

    /// An obligatory source or target marker; its `ref` must resolve.
    fn endpoint(&mut self, tag: Tag) -> Result<String> {
        if !self.begin(tag, false)? {
            return Err(ParseError::MissingElement {
                expected: tag.name(),
                path: self.path.render(),
            });
        }

        let id = self.attribute("ref").map(str::to_owned);
        let name = match id {
            Some(id) => match self.locations.resolve(&id) {
                Some(name) => name.to_owned(),
                None => {
                    return Err(ParseError::UnresolvedReference {
                        id: Some(id),
                        path: self.path.render(),
                    });
                }
            },
            None => {
                return Err(ParseError::UnresolvedReference {
                    id: None,
                    path: self.path.render(),
                });
            }
        };
        self.advance()?;
        Ok(name)
    }

    /// Optional transition.
    fn transition(&mut self) -> Result<bool> {
        if !self.begin(Tag::Transition, true)? {
            return Ok(false);
        }
        self.advance()?;

        let source = self.endpoint(Tag::Source)?;
        let target = self.endpoint(Tag::Target)?;
        while self.label()?.is_some() {}
        // Nails carry only layout coordinates; consumed and discarded.
        while self.begin(Tag::Nail, true)? {
            self.advance()?;
        }

        if let Err(err) = self.builder.add_edge(&source, &target) {
            self.report_error(err.to_string());
        }
        Ok(true)
    }

    /// Optional parameter list; returns the parameter count.
    fn parameter(&mut self) -> Result<i32> {
        let mut count = 0;
        if self.begin(Tag::Parameter, true)? {
            self.advance()?;
            if let Some(text) = self.text() {
                count = self.parse_text(&text, SyntaxPart::Parameters);
            }
        }
        Ok(count)
    }

    /// Optional template.
    fn template(&mut self) -> Result<bool> {
        if !self.begin(Tag::Template, true)? {
            return Ok(false);
        }
        self.advance()?;

        let name = self.name()?;
        let parameter_count = self.parameter()?;
        tracing::debug!(
            template = name.as_deref().unwrap_or("<anonymous>"),
            parameter_count,
            "Begin template"
        );

        match self.builder.begin_template(name.as_deref(), parameter_count) {
            Err(err) => {
                // The template was rejected; its body is not processed.
                self.report_error(err.to_string());
            }
            Ok(()) => {
                self.declaration()?;
                while self.location()? {}
                self.init()?;
                while self.transition()? {}
                self.builder.end_template();
                tracing::debug!("End template");
            }
        }
        Ok(true)
    }

    /// Optional instantiation or system block.
    ///
    /// Unlike the other optional text blocks, an empty element here is not
    /// skipped: the expression grammar is invoked on an empty span instead,
    /// so the corresponding composition stage always runs when the element
    /// occurs at all.
    fn composition(&mut self, tag: Tag, part: SyntaxPart) -> Result<bool> {
        if !self.begin(tag, false)? {
            return Ok(false);
        }
        self.advance()?;
        let text = self.text().unwrap_or_default();
        self.parse_text(&text, part);
        Ok(true)
    }
}

/// Strip any namespace prefix from a raw element or attribute name.
fn local_name(raw: &[u8]) -> String {
    let full = String::from_utf8_lossy(raw);
    match full.rfind(':') {
        Some(pos) => full[pos + 1..].to_string(),
        None => full.into_owned(),
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || c == '#'
}

/// Extract an identifier from the text content of a name element.
///
/// Surrounding whitespace is trimmed; the identifier must start with an
/// alphabetic character or underscore and anything after it other than
/// whitespace is rejected.
fn symbol(text: &str) -> std::result::Result<String, &'static str> {
    let text = text.trim_start();
    if text.is_empty() {
        return Err("Identifier expected");
    }
    let first = text.chars().next().unwrap_or(' ');
    if !(first.is_alphabetic() || first == '_') {
        return Err("Invalid identifier");
    }
    let end = text
        .char_indices()
        .find(|&(_, c)| !is_ident_char(c))
        .map_or(text.len(), |(i, _)| i);
    let (ident, rest) = text.split_at(end);
    if !rest.trim_start().is_empty() {
        return Err("Invalid identifier");
    }
    Ok(ident.to_string())
}
