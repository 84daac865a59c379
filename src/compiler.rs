use std::error::Error as StdError;

use thiserror::Error;

use crate::emit::{DiagramEmitter, DiagramSink, TripleEmitter, TripleSink};
use crate::ontology::builder::{BuildError, ModelBuilder};
use crate::ontology::entities::OntologyModel;
use crate::sheet::SheetSource;

/// Facade running one full compilation: build the model, project it into the
/// injected triple and diagram sinks.
///
/// Each sink has exactly one writer and the two projections read the same
/// immutable model, so a failed build never reaches either sink.
pub struct SheetCompiler<S, T, D>
where
    S: SheetSource,
    T: TripleSink,
    D: DiagramSink,
{
    source: S,
    include_value_type_edges: bool,
    triples: T,
    diagram: D,
}

impl<S, T, D> SheetCompiler<S, T, D>
where
    S: SheetSource,
    T: TripleSink,
    D: DiagramSink,
    T::Error: StdError,
    D::Error: StdError,
{
    /// Creates a compiler around a sheet source and the two sink handles.
    #[must_use]
    pub fn new(source: S, include_value_type_edges: bool, triples: T, diagram: D) -> Self {
        Self {
            source,
            include_value_type_edges,
            triples,
            diagram,
        }
    }

    /// Runs the compilation and returns the model together with the filled
    /// sinks.
    pub fn run(mut self) -> Result<CompiledSheets<T, D>, CompileError<T::Error, D::Error>> {
        let model = ModelBuilder::new(&self.source).build()?;
        TripleEmitter::new(&model)
            .emit(&mut self.triples)
            .map_err(CompileError::Triples)?;
        DiagramEmitter::new(&model, self.include_value_type_edges)
            .emit(&mut self.diagram)
            .map_err(CompileError::Diagram)?;

        tracing::info!(
            ontology = model.descriptor().name(),
            classes = model.classes().len(),
            "sheets compiled"
        );
        Ok(CompiledSheets {
            model,
            triples: self.triples,
            diagram: self.diagram,
        })
    }
}

/// Result of a successful compilation run.
pub struct CompiledSheets<T, D> {
    /// The validated model the projections were derived from.
    pub model: OntologyModel,
    /// The triple sink, now holding the triple projection.
    pub triples: T,
    /// The diagram sink, now holding the diagram projection.
    pub diagram: D,
}

/// Errors aborting a compilation run.
///
/// Sink failures pass through transparently so callers see the
/// infrastructure error exactly as the sink raised it.
#[derive(Debug, Error)]
pub enum CompileError<TE, DE>
where
    TE: StdError,
    DE: StdError,
{
    /// The sheet rows violated a model invariant.
    #[error(transparent)]
    Build(#[from] BuildError),
    /// The triple sink rejected a write.
    #[error(transparent)]
    Triples(TE),
    /// The diagram sink rejected a write.
    #[error(transparent)]
    Diagram(DE),
}
