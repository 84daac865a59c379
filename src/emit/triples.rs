use std::convert::Infallible;
use std::fmt::{self, Display, Formatter};

use oxrdf::{Graph, Literal, NamedNode, Triple};

use crate::ontology::entities::{OntologyModel, PropertyDomain};
use crate::ontology::value_objects::{Iri, QualifiedName};

use super::vocab;

/// Object position of a triple: either an identifier or a plain literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Term {
    /// A named resource.
    Iri(Iri),
    /// A simple string literal.
    Literal(String),
}

impl Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(iri) => f.write_str(iri.as_str()),
            Self::Literal(text) => f.write_str(text),
        }
    }
}

/// Write-only sink receiving the triple projection of a model.
///
/// Implementations wrap whatever triple store the host uses; the emitter only
/// ever calls [`add`](TripleSink::add) and never reads back.
pub trait TripleSink {
    /// Infrastructure specific failure surfaced unmodified to the caller.
    type Error;

    /// Appends one triple to the sink.
    fn add(&mut self, subject: &Iri, predicate: &Iri, object: &Term) -> Result<(), Self::Error>;
}

/// Deterministic translation of an [`OntologyModel`] into ontology triples.
///
/// Entities are walked in qualified-name order and the triples of each entity
/// follow a fixed layout, so two runs over the same model produce identical
/// triple multisets.
pub struct TripleEmitter<'a> {
    model: &'a OntologyModel,
}

impl<'a> TripleEmitter<'a> {
    /// Creates an emitter over a validated model.
    #[must_use]
    pub fn new(model: &'a OntologyModel) -> Self {
        Self { model }
    }

    /// Writes the full projection into the sink.
    pub fn emit<S>(&self, sink: &mut S) -> Result<(), S::Error>
    where
        S: TripleSink + ?Sized,
    {
        self.emit_header(sink)?;
        self.emit_classes(sink)?;
        self.emit_data_properties(sink)?;
        self.emit_object_properties(sink)?;
        tracing::debug!(ontology = self.model.descriptor().name(), "triples emitted");
        Ok(())
    }

    fn emit_header<S>(&self, sink: &mut S) -> Result<(), S::Error>
    where
        S: TripleSink + ?Sized,
    {
        let descriptor = self.model.descriptor();
        let subject = descriptor.base_uri();
        sink.add(subject, &vocab::rdf_type(), &Term::Iri(vocab::owl_ontology()))?;
        sink.add(
            subject,
            &vocab::rdfs_label(),
            &Term::Literal(descriptor.name().to_owned()),
        )?;
        sink.add(
            subject,
            &vocab::owl_version_info(),
            &Term::Literal(descriptor.version().to_owned()),
        )?;
        for author in descriptor.authors() {
            sink.add(
                subject,
                &vocab::dcterms_creator(),
                &Term::Literal(author.clone()),
            )?;
        }
        sink.add(
            subject,
            &vocab::dcterms_description(),
            &Term::Literal(descriptor.description().to_owned()),
        )?;
        Ok(())
    }

    fn emit_classes<S>(&self, sink: &mut S) -> Result<(), S::Error>
    where
        S: TripleSink + ?Sized,
    {
        for class in self.model.classes().values() {
            let subject = class.subject();
            sink.add(subject, &vocab::rdf_type(), &Term::Iri(vocab::owl_class()))?;
            if let Some(parent) = class.parent() {
                sink.add(
                    subject,
                    &vocab::rdfs_sub_class_of(),
                    &Term::Iri(parent.iri().clone()),
                )?;
            }
            sink.add(
                subject,
                &vocab::rdfs_label(),
                &Term::Literal(class.name().to_owned()),
            )?;
            if let Some(definition) = class.definition() {
                sink.add(
                    subject,
                    &vocab::skos_definition(),
                    &Term::Literal(definition.to_owned()),
                )?;
            }
            if let Some(unit) = class.unit() {
                sink.add(
                    subject,
                    &self.unit_predicate(),
                    &Term::Literal(unit.to_owned()),
                )?;
            }
            for alt_name in class.alt_names() {
                sink.add(
                    subject,
                    &vocab::skos_alt_label(),
                    &Term::Literal(alt_name.clone()),
                )?;
            }
            if let Some(axioms) = class.axioms() {
                sink.add(
                    subject,
                    &vocab::rdfs_comment(),
                    &Term::Literal(axioms.to_owned()),
                )?;
            }
        }
        Ok(())
    }

    fn emit_data_properties<S>(&self, sink: &mut S) -> Result<(), S::Error>
    where
        S: TripleSink + ?Sized,
    {
        for property in self.model.data_properties().values() {
            let subject = property.subject();
            sink.add(
                subject,
                &vocab::rdf_type(),
                &Term::Iri(vocab::owl_datatype_property()),
            )?;
            match property.domain() {
                PropertyDomain::Class(class) => {
                    sink.add(
                        subject,
                        &vocab::rdfs_domain(),
                        &Term::Iri(class.iri().clone()),
                    )?;
                }
                PropertyDomain::LiteralType(label) => {
                    if let Some(xsd) = vocab::xsd_type(label) {
                        sink.add(subject, &vocab::rdfs_domain(), &Term::Iri(xsd))?;
                    }
                }
                PropertyDomain::Unspecified => {}
            }
            if let Some(range) = property.range() {
                sink.add(subject, &vocab::rdfs_range(), &self.range_term(range))?;
            }
            sink.add(
                subject,
                &vocab::rdfs_label(),
                &Term::Literal(property.name().to_owned()),
            )?;
            if let Some(definition) = property.definition() {
                sink.add(
                    subject,
                    &vocab::skos_definition(),
                    &Term::Literal(definition.to_owned()),
                )?;
            }
            for alt_name in property.alt_names() {
                sink.add(
                    subject,
                    &vocab::skos_alt_label(),
                    &Term::Literal(alt_name.clone()),
                )?;
            }
            if let Some(axioms) = property.axioms() {
                sink.add(
                    subject,
                    &vocab::rdfs_comment(),
                    &Term::Literal(axioms.to_owned()),
                )?;
            }
        }
        Ok(())
    }

    fn emit_object_properties<S>(&self, sink: &mut S) -> Result<(), S::Error>
    where
        S: TripleSink + ?Sized,
    {
        for property in self.model.object_properties().values() {
            let subject = property.subject();
            sink.add(
                subject,
                &vocab::rdf_type(),
                &Term::Iri(vocab::owl_object_property()),
            )?;
            sink.add(
                subject,
                &vocab::rdfs_domain(),
                &Term::Iri(property.domain().iri().clone()),
            )?;
            sink.add(
                subject,
                &vocab::rdfs_range(),
                &Term::Iri(property.range().iri().clone()),
            )?;
            sink.add(
                subject,
                &vocab::rdfs_label(),
                &Term::Literal(property.name().to_owned()),
            )?;
            if let Some(definition) = property.definition() {
                sink.add(
                    subject,
                    &vocab::skos_definition(),
                    &Term::Literal(definition.to_owned()),
                )?;
            }
            for alt_name in property.alt_names() {
                sink.add(
                    subject,
                    &vocab::skos_alt_label(),
                    &Term::Literal(alt_name.clone()),
                )?;
            }
            if let Some(axioms) = property.axioms() {
                sink.add(
                    subject,
                    &vocab::rdfs_comment(),
                    &Term::Literal(axioms.to_owned()),
                )?;
            }
        }
        Ok(())
    }

    /// The sheet schema has no standard term for units, so the annotation
    /// predicate lives in the ontology's own namespace.
    fn unit_predicate(&self) -> Iri {
        Iri::new_unchecked(format!("{}unit", self.model.descriptor().base_uri()))
    }

    fn range_term(&self, label: &str) -> Term {
        if let Some(xsd) = vocab::xsd_type(label) {
            return Term::Iri(xsd);
        }
        if let Ok(qualified) = label.parse::<QualifiedName>() {
            if let Ok(iri) = self.model.namespaces().expand(&qualified) {
                return Term::Iri(iri);
            }
        }
        Term::Literal(label.to_owned())
    }
}

/// [`TripleSink`] adapter over an [`oxrdf::Graph`].
#[derive(Debug, Default)]
pub struct RdfGraphSink {
    graph: Graph,
}

impl RdfGraphSink {
    /// Creates a sink around an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the accumulated graph.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Consumes the sink, yielding the accumulated graph.
    #[must_use]
    pub fn into_graph(self) -> Graph {
        self.graph
    }
}

impl TripleSink for RdfGraphSink {
    type Error = Infallible;

    fn add(&mut self, subject: &Iri, predicate: &Iri, object: &Term) -> Result<(), Self::Error> {
        let subject = NamedNode::new_unchecked(subject.as_str());
        let predicate = NamedNode::new_unchecked(predicate.as_str());
        let object: oxrdf::Term = match object {
            Term::Iri(iri) => NamedNode::new_unchecked(iri.as_str()).into(),
            Term::Literal(text) => Literal::new_simple_literal(text.as_str()).into(),
        };
        self.graph.insert(&Triple::new(subject, predicate, object));
        Ok(())
    }
}
