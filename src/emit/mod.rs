//! Projections of a compiled model into external sinks.
//!
//! Each projection writes through a narrow, write-only trait so any concrete
//! graph or diagram library can receive it; the bundled implementations cover
//! `oxrdf` graphs and an in-memory diagram.

pub mod diagram;
pub mod triples;
pub mod vocab;

pub use diagram::{DiagramEdge, DiagramEmitter, DiagramGraph, DiagramNode, DiagramSink};
pub use triples::{RdfGraphSink, Term, TripleEmitter, TripleSink};
