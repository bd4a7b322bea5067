/*!
## Truss Decomposition

A library for computing the trussness of every edge in an undirected graph.

A k-truss is a subgraph in which every edge occurs in at least k - 2 triangles
formed by edges of that subgraph. The trussness of an edge is the highest k
for which the edge belongs to a k-truss. Subsetting the graph to all edges
with trussness >= k yields the k-truss, since each k-truss is a subgraph of a
(k - 1)-truss.

The implementation is based on the peeling algorithm described in [this
paper](https://dl.acm.org/doi/10.14778/2311906.2311909), published in the
Proceedings of the VLDB Endowment 5.9 (2012).

### License

MIT
*/
pub mod graph;
pub mod triangle;
pub mod truss;

use std::fmt;
use std::io;

use graph::Graph;

#[derive(Debug)]
pub enum Error {
    ParseGraph { source: io::Error },
    ParseGdlGraph { source: gdl::graph::GraphHandlerError },
    MissingEdge { source: usize, target: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ParseGraph { .. } => write!(f, "error while parsing graph file"),
            Error::ParseGdlGraph { .. } => write!(f, "error while parsing GDL graph"),
            Error::MissingEdge { source, target } => {
                write!(f, "no edge between nodes {} and {}", source, target)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ParseGraph { source } => Some(source),
            Error::ParseGdlGraph { source } => Some(source),
            Error::MissingEdge { .. } => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(source: io::Error) -> Self {
        Error::ParseGraph { source }
    }
}

impl From<gdl::graph::GraphHandlerError> for Error {
    fn from(source: gdl::graph::GraphHandlerError) -> Self {
        Error::ParseGdlGraph { source }
    }
}

/// Computes the trussness of every edge in the graph.
///
/// The result is indexed by edge id. Trussness values are >= 2; an
/// edge that occurs in no triangle has trussness exactly 2.
pub fn trussness(graph: &Graph) -> Result<Vec<usize>, Error> {
    let triangles = triangle::list_triangles(graph);
    let support = truss::compute_support(graph, &triangles)?;
    truss::peel(graph, support)
}
