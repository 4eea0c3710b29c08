//! Resolution of document-local location identifiers.

use std::collections::HashMap;

/// Map from document-local location identifiers to symbolic names.
///
/// Identifiers are registered as locations are parsed and resolved when edge
/// endpoints and the init marker reference them, so references to locations
/// declared earlier in the document resolve before the whole document has
/// been seen. The map lives for one whole parse: identifiers are expected to
/// be unique across the document, not merely within a template.
#[derive(Debug, Default)]
pub struct LocationNames {
    names: HashMap<String, String>,
}

impl LocationNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id`, returning the symbolic name it resolves to.
    ///
    /// Anonymous locations (blank or absent declared name) get a synthesized
    /// name of `_` followed by the identifier.
    pub fn register(&mut self, id: &str, name: Option<&str>) -> String {
        let resolved = match name {
            Some(name) if !name.trim().is_empty() => name.to_owned(),
            _ => format!("_{id}"),
        };
        self.names.insert(id.to_owned(), resolved.clone());
        resolved
    }

    /// Resolve `id` to the symbolic name it was registered with.
    pub fn resolve(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }
}
