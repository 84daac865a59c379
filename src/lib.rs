//! Compiles FAIR ontology spreadsheets into RDF triple graphs and review
//! diagrams.
//!
//! A [`SheetSource`] supplies the five tables of the sheet format (ontology
//! metadata, namespace prefixes, classes, data properties, object
//! properties). [`ModelBuilder`](ontology::ModelBuilder) resolves every
//! cross-reference into an immutable [`OntologyModel`](ontology::OntologyModel),
//! which the emitters then project into an injected triple sink and diagram
//! sink.
//!
//! ```
//! use fair_sheet::emit::{DiagramGraph, RdfGraphSink};
//! use fair_sheet::sheet::{columns, MemorySheets, Record};
//! use fair_sheet::SheetCompiler;
//!
//! let source = MemorySheets::new()
//!     .with_ontology_info([
//!         ("Ontology Name", "TestOntology"),
//!         ("Ontology URI", "http://example.com/ontology#"),
//!         ("Ontology Version", "1.0"),
//!         ("Ontology Author(s)", "John Doe"),
//!         ("Ontology Description", "A test ontology"),
//!     ])
//!     .with_namespaces([Record::new()
//!         .with(columns::PREFIX_NAME, "PMDCo")
//!         .with(columns::ONTOLOGY_URL, "https://w3id.org/pmd/co/")])
//!     .with_classes([Record::new()
//!         .with(columns::VARIABLE_NAME, "Specimen")
//!         .with(columns::BELONGS_TO_ONTOLOGY, "PMDCo")]);
//!
//! let compiled = SheetCompiler::new(source, true, RdfGraphSink::new(), DiagramGraph::new())
//!     .run()
//!     .expect("sheets compile");
//! assert_eq!(compiled.model.classes().len(), 1);
//! ```

pub mod compiler;
pub mod emit;
pub mod ontology;
pub mod sheet;

pub use compiler::{CompileError, CompiledSheets, SheetCompiler};
pub use ontology::{BuildError, ModelBuilder, OntologyModel};
pub use sheet::{MemorySheets, Record, SheetSource};
