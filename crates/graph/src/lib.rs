//! # gvstyle-graph
//!
//! Attributed graph storage and traversal utilities for gvstyle.
//!
//! [`AttrGraph`] stores nodes, edges, and graph-level attributes on top of a
//! petgraph [`DiGraph`], and implements [`GraphSource`] so it can be styled and
//! serialized directly. The utility functions cover the usual visualization
//! chores: trimming a large graph down to the neighborhood of a few nodes,
//! finding where a subgraph touches the rest of the graph, and fixing the
//! iteration order so that the emitted DOT is stable.
//!
//! ## Example
//!
//! ```ignore
//! use gvstyle_graph::{boundary, AttrGraph};
//!
//! let mut graph = AttrGraph::<u32>::undirected();
//! graph.add_path([0, 1, 2, 3, 4, 5]);
//!
//! let near = graph.neighborhood([&2], Some(1));
//! let edge = boundary(&graph, &near)?;
//! ```

mod error;
mod key;
mod ordering;
mod queries;
mod source;
pub mod traversal;

pub use error::GraphError;
pub use key::EdgeKey;
pub use gvstyle_core::color::{contrasting_color, contrasting_color_among};
pub use ordering::{to_ordered_graph, to_ordered_graph_by};
pub use queries::{boundary, neighborhood, neighborhood_with_cost};
pub use traversal::{uniform_cost_traversal, uniform_cost_traversal_with_cost, UniformCostTraversal};

use gvstyle_core::{Attrs, EdgeItem};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

#[derive(Debug, Clone)]
pub(crate) struct NodeData<N> {
    pub(crate) id: N,
    pub(crate) attrs: Attrs,
}

#[derive(Debug, Clone)]
pub(crate) struct EdgeData<K> {
    pub(crate) key: Option<K>,
    pub(crate) attrs: Attrs,
}

/// A graph whose nodes, edges, and whole carry attribute maps.
///
/// Nodes are identified by `N`. Parallel edges of a multigraph are told apart
/// by a key `K`. Undirected graphs store each edge once, in the
/// direction it was first added, and treat it as symmetric for lookups.
/// Iteration over nodes and edges follows insertion order.
#[derive(Debug, Clone)]
pub struct AttrGraph<N, K = ()> {
    /// The underlying storage. Undirected graphs ignore edge direction.
    graph: DiGraph<NodeData<N>, EdgeData<K>>,

    /// Index of nodes by identity
    index: HashMap<N, NodeIndex>,

    /// Graph-level attributes
    attrs: Attrs,

    directed: bool,
    multigraph: bool,
    ordered: bool,
}

impl<N, K> AttrGraph<N, K>
where
    N: Clone + Hash + Eq,
    K: Clone + PartialEq,
{
    /// Create an empty graph of the given kind.
    pub fn with_kind(directed: bool, multigraph: bool) -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
            attrs: Attrs::new(),
            directed,
            multigraph,
            ordered: false,
        }
    }

    pub fn undirected() -> Self {
        Self::with_kind(false, false)
    }

    pub fn directed() -> Self {
        Self::with_kind(true, false)
    }

    pub fn multi_undirected() -> Self {
        Self::with_kind(false, true)
    }

    pub fn multi_directed() -> Self {
        Self::with_kind(true, true)
    }

    /// An empty graph of the same kind, carrying the same graph attributes.
    pub(crate) fn empty_like(&self) -> Self {
        let mut graph = Self::with_kind(self.directed, self.multigraph);
        graph.attrs = self.attrs.clone();
        graph.ordered = self.ordered;
        graph
    }

    pub(crate) fn mark_ordered(&mut self) {
        self.ordered = true;
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_multigraph(&self) -> bool {
        self.multigraph
    }

    /// Whether node and edge order was fixed by [`to_ordered_graph`].
    pub fn is_ordered(&self) -> bool {
        self.ordered
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn attrs_mut(&mut self) -> &mut Attrs {
        &mut self.attrs
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn has_node(&self, id: &N) -> bool {
        self.index.contains_key(id)
    }

    /// Add a node, returning its attributes for in-place updates.
    ///
    /// Adding a node that already exists leaves it where it is.
    pub fn add_node(&mut self, id: N) -> &mut Attrs {
        let idx = self.ensure_node(id);
        &mut self.graph[idx].attrs
    }

    /// Add a node and merge `attrs` into its attributes.
    pub fn add_node_with(&mut self, id: N, attrs: Attrs) {
        self.add_node(id).extend(attrs);
    }

    pub fn node_attrs(&self, id: &N) -> Option<&Attrs> {
        self.index.get(id).map(|&idx| &self.graph[idx].attrs)
    }

    pub fn node_attrs_mut(&mut self, id: &N) -> Option<&mut Attrs> {
        let idx = *self.index.get(id)?;
        Some(&mut self.graph[idx].attrs)
    }

    /// Add an edge, creating missing endpoints.
    ///
    /// In a simple graph an existing edge between the endpoints has `attrs`
    /// merged into it. In a multigraph a new parallel edge is added under a
    /// fresh key (see [`EdgeKey`]).
    pub fn add_edge(&mut self, source: N, target: N, attrs: Attrs)
    where
        K: EdgeKey,
    {
        let a = self.ensure_node(source);
        let b = self.ensure_node(target);
        if !self.multigraph {
            if let Some(edge) = self.find_edge(a, b) {
                self.graph[edge].attrs.extend(attrs);
                return;
            }
            self.graph.add_edge(a, b, EdgeData { key: None, attrs });
            return;
        }
        let key = K::fresh(&self.keys_between(a, b));
        self.graph.add_edge(a, b, EdgeData { key: Some(key), attrs });
    }

    /// Add an edge with a parallel-edge key.
    ///
    /// In a multigraph, an existing edge between the endpoints with the same
    /// key has `attrs` merged into it. In a simple graph the key is recorded
    /// but does not distinguish edges.
    pub fn add_keyed_edge(&mut self, source: N, target: N, key: K, attrs: Attrs) {
        let a = self.ensure_node(source);
        let b = self.ensure_node(target);
        let existing = if self.multigraph {
            self.find_keyed_edge(a, b, &key)
        } else {
            self.find_edge(a, b)
        };
        match existing {
            Some(edge) => {
                let data = &mut self.graph[edge];
                data.key = Some(key);
                data.attrs.extend(attrs);
            }
            None => {
                self.graph.add_edge(a, b, EdgeData { key: Some(key), attrs });
            }
        }
    }

    /// Add edges between consecutive nodes of `nodes`.
    pub fn add_path(&mut self, nodes: impl IntoIterator<Item = N>)
    where
        K: EdgeKey,
    {
        let mut nodes = nodes.into_iter();
        let Some(mut prev) = nodes.next() else {
            return;
        };
        self.add_node(prev.clone());
        for next in nodes {
            self.add_edge(prev, next.clone(), Attrs::new());
            prev = next;
        }
    }

    /// Nodes with their attributes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (&N, &Attrs)> + '_ {
        self.graph.node_weights().map(|data| (&data.id, &data.attrs))
    }

    /// Edges with their attributes, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeItem<'_, N, K>> + '_ {
        self.graph.edge_references().map(move |edge| EdgeItem {
            source: &self.graph[edge.source()].id,
            target: &self.graph[edge.target()].id,
            key: edge.weight().key.as_ref(),
            attrs: &edge.weight().attrs,
        })
    }

    /// Number of edge endpoints at `id`. A self-loop counts twice.
    pub fn degree(&self, id: &N) -> Option<usize> {
        let idx = *self.index.get(id)?;
        let out = self.graph.edges_directed(idx, Direction::Outgoing).count();
        let incoming = self.graph.edges_directed(idx, Direction::Incoming).count();
        Some(out + incoming)
    }

    /// Predecessors and successors of `id`, ignoring edge direction.
    pub fn all_neighbors(&self, id: &N) -> impl Iterator<Item = &N> + '_ {
        self.index
            .get(id)
            .copied()
            .into_iter()
            .flat_map(move |idx| self.graph.neighbors_undirected(idx))
            .map(move |idx| &self.graph[idx].id)
    }

    /// The subgraph induced by `nodes`. Unknown nodes are ignored.
    ///
    /// Node and edge order follow this graph, not `nodes`.
    pub fn subgraph<'a>(&self, nodes: impl IntoIterator<Item = &'a N>) -> Self
    where
        N: 'a,
    {
        let keep: HashSet<NodeIndex> = nodes
            .into_iter()
            .filter_map(|id| self.index.get(id).copied())
            .collect();

        let mut sub = self.empty_like();
        let mut remap = HashMap::with_capacity(keep.len());
        for idx in self.graph.node_indices().filter(|idx| keep.contains(idx)) {
            let data = self.graph[idx].clone();
            let new = sub.graph.add_node(data.clone());
            sub.index.insert(data.id, new);
            remap.insert(idx, new);
        }
        for edge in self.graph.edge_references() {
            if let (Some(&a), Some(&b)) = (remap.get(&edge.source()), remap.get(&edge.target())) {
                sub.graph.add_edge(a, b, edge.weight().clone());
            }
        }
        sub
    }

    /// Position of `id` in node insertion order.
    pub(crate) fn rank(&self, id: &N) -> Option<usize> {
        self.index.get(id).map(|idx| idx.index())
    }

    fn ensure_node(&mut self, id: N) -> NodeIndex {
        if let Some(&idx) = self.index.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(NodeData {
            id: id.clone(),
            attrs: Attrs::new(),
        });
        self.index.insert(id, idx);
        idx
    }

    /// Append an edge as is, without merging or key assignment.
    pub(crate) fn push_edge(&mut self, source: N, target: N, key: Option<K>, attrs: Attrs) {
        let a = self.ensure_node(source);
        let b = self.ensure_node(target);
        self.graph.add_edge(a, b, EdgeData { key, attrs });
    }

    fn keys_between(&self, a: NodeIndex, b: NodeIndex) -> Vec<&K> {
        let mut keys: Vec<&K> = self
            .graph
            .edges_connecting(a, b)
            .filter_map(|edge| edge.weight().key.as_ref())
            .collect();
        if !self.directed && a != b {
            keys.extend(
                self.graph
                    .edges_connecting(b, a)
                    .filter_map(|edge| edge.weight().key.as_ref()),
            );
        }
        keys
    }

    fn find_edge(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        if self.directed {
            self.graph.find_edge(a, b)
        } else {
            self.graph.find_edge_undirected(a, b).map(|(edge, _)| edge)
        }
    }

    fn find_keyed_edge(&self, a: NodeIndex, b: NodeIndex, key: &K) -> Option<EdgeIndex> {
        let matching = |from: NodeIndex, to: NodeIndex| {
            self.graph
                .edges_connecting(from, to)
                .find(|edge| edge.weight().key.as_ref() == Some(key))
                .map(|edge| edge.id())
        };
        match matching(a, b) {
            Some(edge) => Some(edge),
            None if !self.directed => matching(b, a),
            None => None,
        }
    }
}

impl<N, K> Default for AttrGraph<N, K>
where
    N: Clone + Hash + Eq,
    K: Clone + PartialEq,
{
    fn default() -> Self {
        Self::undirected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gvstyle_core::{attrs, Value};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_edge_merges_in_simple_graph() {
        let mut graph = AttrGraph::<&str>::undirected();
        graph.add_edge("a", "b", attrs! { "weight" => 1 });
        graph.add_edge("b", "a", attrs! { "color" => "red" });

        assert_eq!(graph.edge_count(), 1);
        let edge = graph.edges().next().unwrap();
        assert_eq!((*edge.source, *edge.target), ("a", "b"));
        assert_eq!(edge.attrs, &attrs! { "weight" => 1, "color" => "red" });
    }

    #[test]
    fn test_directed_graph_keeps_reverse_edges() {
        let mut graph = AttrGraph::<&str>::directed();
        graph.add_edge("a", "b", Attrs::new());
        graph.add_edge("b", "a", Attrs::new());
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_multigraph_parallel_edges() {
        let mut graph = AttrGraph::<&str, String>::multi_directed();
        graph.add_keyed_edge("a", "b", "x".to_string(), attrs! { "n" => 1 });
        graph.add_keyed_edge("a", "b", "y".to_string(), Attrs::new());
        graph.add_keyed_edge("a", "b", "x".to_string(), attrs! { "m" => 2 });
        graph.add_edge("a", "b", Attrs::new());

        assert_eq!(graph.edge_count(), 3);
        let keys: Vec<Option<&str>> = graph.edges().map(|e| e.key.map(String::as_str)).collect();
        assert_eq!(keys, vec![Some("x"), Some("y"), Some("2")]);
        let first = graph.edges().next().unwrap();
        assert_eq!(first.attrs, &attrs! { "n" => 1, "m" => 2 });
    }

    #[test]
    fn test_multigraph_unkeyed_edges_get_distinct_keys() {
        let mut graph = AttrGraph::<u32, u32>::multi_directed();
        graph.add_edge(0, 1, Attrs::new());
        graph.add_edge(0, 1, Attrs::new());
        graph.add_keyed_edge(0, 1, 3, Attrs::new());
        graph.add_edge(0, 1, Attrs::new());
        graph.add_edge(1, 0, Attrs::new());

        let keys: Vec<(u32, u32, Option<u32>)> = graph
            .edges()
            .map(|e| (*e.source, *e.target, e.key.copied()))
            .collect();
        assert_eq!(
            keys,
            vec![(0, 1, Some(0)), (0, 1, Some(1)), (0, 1, Some(3)), (0, 1, Some(4)), (1, 0, Some(0))]
        );
    }

    #[test]
    fn test_undirected_multigraph_keys_span_both_orientations() {
        let mut graph = AttrGraph::<u32, u32>::multi_undirected();
        graph.add_edge(0, 1, Attrs::new());
        graph.add_edge(1, 0, Attrs::new());

        let keys: Vec<Option<u32>> = graph.edges().map(|e| e.key.copied()).collect();
        assert_eq!(keys, vec![Some(0), Some(1)]);
    }

    #[test]
    fn test_simple_graph_edges_are_unkeyed() {
        let mut graph = AttrGraph::<u32>::directed();
        graph.add_edge(0, 1, Attrs::new());
        assert_eq!(graph.edges().next().unwrap().key, None);
    }

    #[test]
    fn test_add_node_merges_attributes() {
        let mut graph = AttrGraph::<u32>::directed();
        graph.add_node_with(1, attrs! { "a" => 1 });
        graph.add_node_with(1, attrs! { "b" => "x" });
        graph.add_node(1).insert("a".into(), Value::Int(3));

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.node_attrs(&1), Some(&attrs! { "a" => 3, "b" => "x" }));
        assert_eq!(graph.node_attrs(&2), None);
    }

    #[test]
    fn test_add_path_and_degree() {
        let mut graph = AttrGraph::<u32>::undirected();
        graph.add_path([0, 1, 2]);
        graph.add_edge(2, 2, Attrs::new());

        assert_eq!(graph.degree(&0), Some(1));
        assert_eq!(graph.degree(&1), Some(2));
        assert_eq!(graph.degree(&2), Some(3));
        assert_eq!(graph.degree(&9), None);
    }

    #[test]
    fn test_all_neighbors_ignores_direction() {
        let mut graph = AttrGraph::<u32>::directed();
        graph.add_edge(0, 1, Attrs::new());
        graph.add_edge(2, 0, Attrs::new());

        let mut neighbors: Vec<u32> = graph.all_neighbors(&0).copied().collect();
        neighbors.sort();
        assert_eq!(neighbors, vec![1, 2]);
        assert_eq!(graph.all_neighbors(&7).count(), 0);
    }

    #[test]
    fn test_subgraph_is_induced() {
        let mut graph = AttrGraph::<u32>::undirected();
        graph.add_path([0, 1, 2, 3]);
        graph.attrs_mut().insert("name".into(), "g".into());

        let sub = graph.subgraph([&2, &1, &9]);
        let nodes: Vec<u32> = sub.nodes().map(|(n, _)| *n).collect();
        let edges: Vec<(u32, u32)> = sub.edges().map(|e| (*e.source, *e.target)).collect();

        assert_eq!(nodes, vec![1, 2]);
        assert_eq!(edges, vec![(1, 2)]);
        assert_eq!(sub.attrs(), graph.attrs());
    }
}
