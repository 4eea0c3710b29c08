//! A reference in-memory network aggregate.
//!
//! [`NetworkBuilder`] is a straightforward [`ModelBuilder`] implementation
//! that assembles the notifications into a [`Network`]. It performs the
//! semantic checks a real consumer would: duplicate template names and
//! references to unknown locations are rejected.

use crate::builder::{ModelBuilder, SemanticError};
use serde::{Deserialize, Serialize};

/// A location of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub has_invariant: bool,
    pub urgent: bool,
    pub committed: bool,
}

/// An edge between two locations of the same template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

/// A parameterised automaton template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Template name; `None` for anonymous templates.
    pub name: Option<String>,
    pub parameter_count: i32,
    pub locations: Vec<Location>,
    pub edges: Vec<Edge>,
    /// Name of the initial location, once the init marker has been seen.
    pub initial: Option<String>,
}

/// The assembled network of timed automata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub templates: Vec<Template>,
    /// Set once the parser has signalled the end of the document.
    pub complete: bool,
}

/// Assembles a [`Network`] from structural notifications.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    network: Network,
    in_template: bool,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the builder and return the assembled network.
    ///
    /// The network may be partial if the parse aborted fatally.
    pub fn into_network(self) -> Network {
        self.network
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    fn current(&mut self) -> Result<&mut Template, SemanticError> {
        if !self.in_template {
            return Err(SemanticError::new("No template is open"));
        }
        self.network
            .templates
            .last_mut()
            .ok_or_else(|| SemanticError::new("No template is open"))
    }

    fn location(&mut self, name: &str) -> Result<&mut Location, SemanticError> {
        let template = self.current()?;
        template
            .locations
            .iter_mut()
            .find(|l| l.name == name)
            .ok_or_else(|| SemanticError::new(format!("Unknown location: {name}")))
    }
}

impl ModelBuilder for NetworkBuilder {
    fn begin_template(
        &mut self,
        name: Option<&str>,
        parameter_count: i32,
    ) -> Result<(), SemanticError> {
        if let Some(name) = name {
            if self
                .network
                .templates
                .iter()
                .any(|t| t.name.as_deref() == Some(name))
            {
                return Err(SemanticError::new(format!(
                    "Duplicate template name: {name}"
                )));
            }
        }
        self.network.templates.push(Template {
            name: name.map(str::to_owned),
            parameter_count,
            locations: Vec::new(),
            edges: Vec::new(),
            initial: None,
        });
        self.in_template = true;
        Ok(())
    }

    fn end_template(&mut self) {
        self.in_template = false;
    }

    fn add_location(&mut self, name: &str, has_invariant: bool) -> Result<(), SemanticError> {
        let template = self.current()?;
        if template.locations.iter().any(|l| l.name == name) {
            return Err(SemanticError::new(format!("Duplicate location: {name}")));
        }
        template.locations.push(Location {
            name: name.to_owned(),
            has_invariant,
            urgent: false,
            committed: false,
        });
        Ok(())
    }

    fn mark_urgent(&mut self, name: &str) -> Result<(), SemanticError> {
        self.location(name)?.urgent = true;
        Ok(())
    }

    fn mark_committed(&mut self, name: &str) -> Result<(), SemanticError> {
        self.location(name)?.committed = true;
        Ok(())
    }

    fn set_initial(&mut self, name: &str) -> Result<(), SemanticError> {
        self.location(name)?;
        self.current()?.initial = Some(name.to_owned());
        Ok(())
    }

    fn add_edge(&mut self, source: &str, target: &str) -> Result<(), SemanticError> {
        self.location(source)?;
        self.location(target)?;
        self.current()?.edges.push(Edge {
            source: source.to_owned(),
            target: target.to_owned(),
        });
        Ok(())
    }

    fn done(&mut self) {
        self.network.complete = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_a_template() {
        let mut builder = NetworkBuilder::new();
        builder.begin_template(Some("Train"), 1).unwrap();
        builder.add_location("Safe", false).unwrap();
        builder.add_location("Crossing", true).unwrap();
        builder.mark_committed("Crossing").unwrap();
        builder.set_initial("Safe").unwrap();
        builder.add_edge("Safe", "Crossing").unwrap();
        builder.end_template();
        builder.done();

        let network = builder.into_network();
        assert!(network.complete);
        assert_eq!(network.templates.len(), 1);

        let template = &network.templates[0];
        assert_eq!(template.name.as_deref(), Some("Train"));
        assert_eq!(template.parameter_count, 1);
        assert_eq!(template.initial.as_deref(), Some("Safe"));
        assert_eq!(template.edges.len(), 1);
        assert!(template.locations[1].committed);
        assert!(!template.locations[1].urgent);
    }

    #[test]
    fn test_duplicate_template_name_is_rejected() {
        let mut builder = NetworkBuilder::new();
        builder.begin_template(Some("P"), 0).unwrap();
        builder.end_template();
        assert!(builder.begin_template(Some("P"), 0).is_err());
    }

    #[test]
    fn test_anonymous_templates_do_not_collide() {
        let mut builder = NetworkBuilder::new();
        builder.begin_template(None, 0).unwrap();
        builder.end_template();
        builder.begin_template(None, 0).unwrap();
        builder.end_template();
        assert_eq!(builder.network().templates.len(), 2);
    }

    #[test]
    fn test_edge_to_unknown_location_is_rejected() {
        let mut builder = NetworkBuilder::new();
        builder.begin_template(Some("P"), 0).unwrap();
        builder.add_location("a", false).unwrap();
        assert!(builder.add_edge("a", "nowhere").is_err());
        assert!(builder.network().templates[0].edges.is_empty());
    }

    #[test]
    fn test_initial_must_be_a_known_location() {
        let mut builder = NetworkBuilder::new();
        builder.begin_template(Some("P"), 0).unwrap();
        assert!(builder.set_initial("ghost").is_err());
        assert_eq!(builder.network().templates[0].initial, None);
    }

    #[test]
    fn test_notifications_outside_a_template_are_rejected() {
        let mut builder = NetworkBuilder::new();
        assert!(builder.add_location("a", false).is_err());
        builder.begin_template(Some("P"), 0).unwrap();
        builder.end_template();
        assert!(builder.add_location("b", false).is_err());
    }
}
