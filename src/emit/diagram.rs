use std::collections::BTreeSet;
use std::convert::Infallible;

use serde::Serialize;

use crate::ontology::entities::{OntologyModel, PropertyDomain};

/// Label used on every child-to-parent hierarchy edge.
const SUBCLASS_EDGE_LABEL: &str = "subClassOf";

/// Write-only sink receiving the review-diagram projection of a model.
pub trait DiagramSink {
    /// Infrastructure specific failure surfaced unmodified to the caller.
    type Error;

    /// Adds one labeled node.
    fn add_node(&mut self, id: &str, label: &str) -> Result<(), Self::Error>;

    /// Adds one labeled, directed edge.
    fn add_edge(&mut self, from: &str, to: &str, label: &str) -> Result<(), Self::Error>;
}

/// Translates the class hierarchy (and optionally the data-property
/// attachments) into nodes and edges for human review.
pub struct DiagramEmitter<'a> {
    model: &'a OntologyModel,
    include_value_type_edges: bool,
}

impl<'a> DiagramEmitter<'a> {
    /// Creates an emitter over a validated model.
    ///
    /// When `include_value_type_edges` is set, each data property attached to
    /// a class contributes an edge towards a synthetic literal-type node.
    #[must_use]
    pub fn new(model: &'a OntologyModel, include_value_type_edges: bool) -> Self {
        Self {
            model,
            include_value_type_edges,
        }
    }

    /// Writes the full projection into the sink.
    pub fn emit<S>(&self, sink: &mut S) -> Result<(), S::Error>
    where
        S: DiagramSink + ?Sized,
    {
        for class in self.model.classes().values() {
            sink.add_node(&class.qualified().to_string(), class.name())?;
        }

        for class in self.model.classes().values() {
            if let Some(parent) = class.parent() {
                sink.add_edge(
                    &class.qualified().to_string(),
                    &parent.qualified().to_string(),
                    SUBCLASS_EDGE_LABEL,
                )?;
            }
        }

        for property in self.model.object_properties().values() {
            sink.add_edge(
                &property.domain().qualified().to_string(),
                &property.range().qualified().to_string(),
                property.name(),
            )?;
        }

        if self.include_value_type_edges {
            self.emit_value_type_edges(sink)?;
        }

        tracing::debug!(ontology = self.model.descriptor().name(), "diagram emitted");
        Ok(())
    }

    /// Literal-type nodes are shared: properties with the same range label
    /// all point at one node.
    fn emit_value_type_edges<S>(&self, sink: &mut S) -> Result<(), S::Error>
    where
        S: DiagramSink + ?Sized,
    {
        let mut seen_types: BTreeSet<String> = BTreeSet::new();
        for property in self.model.data_properties().values() {
            let PropertyDomain::Class(class) = property.domain() else {
                continue;
            };
            let Some(range) = property.range() else {
                continue;
            };
            let type_node = format!("literal:{range}");
            if seen_types.insert(range.to_owned()) {
                sink.add_node(&type_node, range)?;
            }
            sink.add_edge(&class.qualified().to_string(), &type_node, property.name())?;
        }
        Ok(())
    }
}

/// One vertex of the review diagram.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagramNode {
    /// Stable node identifier.
    pub id: String,
    /// Display label.
    pub label: String,
}

/// One directed, labeled edge of the review diagram.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagramEdge {
    /// Source node identifier.
    pub from: String,
    /// Target node identifier.
    pub to: String,
    /// Display label.
    pub label: String,
}

/// In-memory [`DiagramSink`] collecting nodes and edges in emission order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DiagramGraph {
    nodes: Vec<DiagramNode>,
    edges: Vec<DiagramEdge>,
}

impl DiagramGraph {
    /// Creates an empty diagram.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected nodes.
    #[must_use]
    pub fn nodes(&self) -> &[DiagramNode] {
        &self.nodes
    }

    /// Returns the collected edges.
    #[must_use]
    pub fn edges(&self) -> &[DiagramEdge] {
        &self.edges
    }
}

impl DiagramSink for DiagramGraph {
    type Error = Infallible;

    fn add_node(&mut self, id: &str, label: &str) -> Result<(), Self::Error> {
        self.nodes.push(DiagramNode {
            id: id.to_owned(),
            label: label.to_owned(),
        });
        Ok(())
    }

    fn add_edge(&mut self, from: &str, to: &str, label: &str) -> Result<(), Self::Error> {
        self.edges.push(DiagramEdge {
            from: from.to_owned(),
            to: to.to_owned(),
            label: label.to_owned(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{DiagramEdge, DiagramEmitter, DiagramGraph, DiagramNode};
    use crate::ontology::builder::ModelBuilder;
    use crate::ontology::entities::OntologyModel;
    use crate::sheet::{columns, MemorySheets, Record};

    fn model() -> OntologyModel {
        let source = MemorySheets::new()
            .with_ontology_info([
                ("Ontology Name", "TestOntology"),
                ("Ontology URI", "http://example.com/ontology#"),
                ("Ontology Version", "1.0"),
                ("Ontology Author(s)", "John Doe"),
                ("Ontology Description", "A test ontology"),
            ])
            .with_namespaces([Record::new()
                .with(columns::PREFIX_NAME, "PMDCo")
                .with(columns::ONTOLOGY_URL, "https://w3id.org/pmd/co/")])
            .with_classes([
                Record::new()
                    .with(columns::VARIABLE_NAME, "Specimen")
                    .with(columns::BELONGS_TO_ONTOLOGY, "PMDCo"),
                Record::new()
                    .with(columns::VARIABLE_NAME, "Sample")
                    .with(columns::BELONGS_TO_ONTOLOGY, "PMDCo")
                    .with(columns::PARENT_VARIABLE, "Specimen"),
            ])
            .with_data_properties([
                Record::new()
                    .with(columns::VALUETYPE_NAME, "identifier")
                    .with(columns::BELONGS_TO_ONTOLOGY, "PMDCo")
                    .with(columns::DOMAIN, "Specimen")
                    .with(columns::RANGE, "string"),
                Record::new()
                    .with(columns::VALUETYPE_NAME, "label")
                    .with(columns::BELONGS_TO_ONTOLOGY, "PMDCo")
                    .with(columns::DOMAIN, "Sample")
                    .with(columns::RANGE, "string"),
            ])
            .with_object_properties([Record::new()
                .with(columns::RELATIONSHIP_NAME, "derivedFrom")
                .with(columns::BELONGS_TO_ONTOLOGY, "PMDCo")
                .with(columns::DOMAIN, "Sample")
                .with(columns::RANGE, "Specimen")]);
        ModelBuilder::new(&source).build().expect("model")
    }

    fn node(id: &str, label: &str) -> DiagramNode {
        DiagramNode {
            id: id.to_owned(),
            label: label.to_owned(),
        }
    }

    fn edge(from: &str, to: &str, label: &str) -> DiagramEdge {
        DiagramEdge {
            from: from.to_owned(),
            to: to.to_owned(),
            label: label.to_owned(),
        }
    }

    #[test]
    fn hierarchy_and_relationships_become_nodes_and_edges() {
        let model = model();
        let mut diagram = DiagramGraph::new();
        DiagramEmitter::new(&model, false)
            .emit(&mut diagram)
            .expect("emitted");

        assert_eq!(
            diagram.nodes(),
            [
                node("PMDCo:Sample", "Sample"),
                node("PMDCo:Specimen", "Specimen"),
            ]
        );
        assert_eq!(
            diagram.edges(),
            [
                edge("PMDCo:Sample", "PMDCo:Specimen", "subClassOf"),
                edge("PMDCo:Sample", "PMDCo:Specimen", "derivedFrom"),
            ]
        );
    }

    #[test]
    fn value_type_edges_share_one_node_per_range_label() {
        let model = model();
        let mut diagram = DiagramGraph::new();
        DiagramEmitter::new(&model, true)
            .emit(&mut diagram)
            .expect("emitted");

        let literal_nodes: Vec<_> = diagram
            .nodes()
            .iter()
            .filter(|node| node.id.starts_with("literal:"))
            .collect();
        assert_eq!(literal_nodes, [&node("literal:string", "string")]);

        assert!(diagram
            .edges()
            .contains(&edge("PMDCo:Specimen", "literal:string", "identifier")));
        assert!(diagram
            .edges()
            .contains(&edge("PMDCo:Sample", "literal:string", "label")));
    }

    #[test]
    fn diagram_serializes_for_host_consumption() {
        let mut diagram = DiagramGraph::new();
        DiagramEmitter::new(&model(), false)
            .emit(&mut diagram)
            .expect("emitted");

        let json = serde_json::to_value(&diagram).expect("serializable");
        assert_eq!(json["nodes"][0]["id"], "PMDCo:Sample");
        assert_eq!(json["edges"][0]["label"], "subClassOf");
    }
}
