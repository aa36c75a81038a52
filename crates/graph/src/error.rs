//! Error types for graph queries.

use thiserror::Error;

/// Errors raised by queries that compare a graph with one of its subgraphs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Every node of the graph is in the subgraph, but not the other way round.
    #[error(
        "The 'graph' argument is a proper subgraph of the 'subgraph' argument. \
         This is likely because the arguments to boundary were passed in the wrong order."
    )]
    ArgumentsReversed,

    /// The subgraph has nodes the graph does not.
    #[error("The subgraph contains nodes not in the graph.")]
    ForeignNodes,
}
