//! The closed set of element names the structural grammar recognizes.

/// An element tag.
///
/// The tag set is closed: an element whose name is not listed here is fatal
/// wherever it appears in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// The document root.
    Nta,
    Imports,
    Declaration,
    Template,
    Instantiation,
    System,
    Name,
    Parameter,
    Location,
    Init,
    Transition,
    Urgent,
    Committed,
    Source,
    Target,
    Label,
    Nail,
}

impl Tag {
    /// Exact-match lookup from an element name.
    pub fn from_name(name: &str) -> Option<Tag> {
        match name {
            "nta" => Some(Tag::Nta),
            "imports" => Some(Tag::Imports),
            "declaration" => Some(Tag::Declaration),
            "template" => Some(Tag::Template),
            "instantiation" => Some(Tag::Instantiation),
            "system" => Some(Tag::System),
            "name" => Some(Tag::Name),
            "parameter" => Some(Tag::Parameter),
            "location" => Some(Tag::Location),
            "init" => Some(Tag::Init),
            "transition" => Some(Tag::Transition),
            "urgent" => Some(Tag::Urgent),
            "committed" => Some(Tag::Committed),
            "source" => Some(Tag::Source),
            "target" => Some(Tag::Target),
            "label" => Some(Tag::Label),
            "nail" => Some(Tag::Nail),
            _ => None,
        }
    }

    /// The element name this tag was looked up from.
    pub fn name(self) -> &'static str {
        match self {
            Tag::Nta => "nta",
            Tag::Imports => "imports",
            Tag::Declaration => "declaration",
            Tag::Template => "template",
            Tag::Instantiation => "instantiation",
            Tag::System => "system",
            Tag::Name => "name",
            Tag::Parameter => "parameter",
            Tag::Location => "location",
            Tag::Init => "init",
            Tag::Transition => "transition",
            Tag::Urgent => "urgent",
            Tag::Committed => "committed",
            Tag::Source => "source",
            Tag::Target => "target",
            Tag::Label => "label",
            Tag::Nail => "nail",
        }
    }

    /// Whether this tag can repeat among its siblings and therefore renders
    /// with an `[k]` ordinal in diagnostic paths.
    pub fn is_indexed(self) -> bool {
        matches!(
            self,
            Tag::Template | Tag::Location | Tag::Transition | Tag::Label | Tag::Nail
        )
    }
}
