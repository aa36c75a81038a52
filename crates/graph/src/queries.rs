//! Queries that cut a graph down for display.

use crate::traversal::uniform_cost_traversal_with_cost;
use crate::{AttrGraph, GraphError};
use indexmap::IndexSet;
use petgraph::algo::Measure;
use std::hash::Hash;

/// The subgraph of nodes within `radius` unit steps of any of `nodes`.
///
/// Edge direction is ignored. `None` means no limit, i.e. the union of the
/// connected components containing `nodes`. Unknown start nodes are skipped.
pub fn neighborhood<'a, N, K>(
    graph: &AttrGraph<N, K>,
    nodes: impl IntoIterator<Item = &'a N>,
    radius: Option<usize>,
) -> AttrGraph<N, K>
where
    N: Clone + Hash + Eq + 'a,
    K: Clone + PartialEq,
{
    neighborhood_with_cost(graph, nodes, radius, |_, _| 1usize)
}

/// Like [`neighborhood`], paying `cost(u, v)` to step between neighbors.
pub fn neighborhood_with_cost<'a, N, K, C, F>(
    graph: &AttrGraph<N, K>,
    nodes: impl IntoIterator<Item = &'a N>,
    radius: Option<C>,
    cost: F,
) -> AttrGraph<N, K>
where
    N: Clone + Hash + Eq + 'a,
    K: Clone + PartialEq,
    C: Measure,
    F: FnMut(&N, &N) -> C,
{
    let sources: Vec<N> = nodes
        .into_iter()
        .filter(|n| graph.has_node(n))
        .cloned()
        .collect();
    let reached: Vec<N> = uniform_cost_traversal_with_cost(
        sources,
        |u: &N| graph.all_neighbors(u).cloned().collect::<Vec<_>>(),
        cost,
    )
    .take_while(|(c, _)| radius.as_ref().map_or(true, |r| c <= r))
    .map(|(_, u)| u)
    .collect();
    graph.subgraph(reached.iter())
}

/// Nodes of `subgraph` that have at least one edge leaving it in `graph`.
///
/// A node is on the boundary when its degree in `subgraph` is lower than its
/// degree in `graph`. The result follows `subgraph`'s node order.
pub fn boundary<N, K>(graph: &AttrGraph<N, K>, subgraph: &AttrGraph<N, K>) -> Result<IndexSet<N>, GraphError>
where
    N: Clone + Hash + Eq,
    K: Clone + PartialEq,
{
    let contained = subgraph.nodes().all(|(n, _)| graph.has_node(n));
    if !contained {
        let reversed = graph.nodes().all(|(n, _)| subgraph.has_node(n));
        return Err(if reversed {
            GraphError::ArgumentsReversed
        } else {
            GraphError::ForeignNodes
        });
    }

    Ok(subgraph
        .nodes()
        .filter(|(n, _)| subgraph.degree(n).unwrap_or(0) < graph.degree(n).unwrap_or(0))
        .map(|(n, _)| n.clone())
        .collect())
}

impl<N, K> AttrGraph<N, K>
where
    N: Clone + Hash + Eq,
    K: Clone + PartialEq,
{
    /// See [`neighborhood`].
    pub fn neighborhood<'a>(&self, nodes: impl IntoIterator<Item = &'a N>, radius: Option<usize>) -> Self
    where
        N: 'a,
    {
        neighborhood(self, nodes, radius)
    }
}
