//! Core ontology domain primitives and contracts.
//!
//! The module defines the value objects, entities and aggregate describing a
//! compiled sheet set independently from ingestion and emission concerns.
//! Everything here is immutable once the builder finishes: the model is built
//! in a single validated pass and then only read.

pub mod builder;
pub mod entities;
pub mod namespaces;
pub mod value_objects;

pub use builder::{BuildError, ModelBuilder};
pub use entities::{
    Class, ClassRef, DataProperty, ModelError, ModelSummary, ObjectProperty, OntologyDescriptor,
    OntologyModel, PropertyDomain,
};
pub use namespaces::{NamespaceError, NamespaceRegistry};
pub use value_objects::{Iri, IriError, QualifiedName, QualifiedNameError};
