//! Styles map graph elements to Graphviz attributes.

use crate::functional::{chain, EdgeSig, GraphSig, MaybeFn, NodeSig, SubgraphSig};
use crate::source::GraphSource;
use crate::value::Attrs;
use std::fmt;

/// A constant attribute map, or a function computing one per element.
pub type Resolver<S> = MaybeFn<S, Attrs>;

/// How to style a graph.
///
/// Each field is a [`Resolver`] over the matching element kind. See the Graphviz
/// attribute reference for the attributes each element accepts:
/// <https://graphviz.org/doc/info/attrs.html>.
pub struct Style<G: GraphSource> {
    /// `f(graph, graph_attrs)`.
    pub graph: Resolver<GraphSig<G>>,
    /// `f(node, node_attrs)`.
    pub node: Resolver<NodeSig<G::Node>>,
    /// `f(source, target, key, edge_attrs)`; `key` is `Some` only for multigraphs.
    pub edge: Resolver<EdgeSig<G::Node, G::Key>>,
    /// `f(subgraph_key)`. Only used when rendering with a subgraph selector.
    pub subgraph: Resolver<SubgraphSig>,
}

impl<G: GraphSource> Style<G> {
    /// A style that adds no attributes.
    pub fn new() -> Self {
        Self {
            graph: Resolver::default(),
            node: Resolver::default(),
            edge: Resolver::default(),
            subgraph: Resolver::default(),
        }
    }

    pub fn with_graph(mut self, graph: impl Into<Resolver<GraphSig<G>>>) -> Self {
        self.graph = graph.into();
        self
    }

    pub fn with_node(mut self, node: impl Into<Resolver<NodeSig<G::Node>>>) -> Self {
        self.node = node.into();
        self
    }

    pub fn with_edge(mut self, edge: impl Into<Resolver<EdgeSig<G::Node, G::Key>>>) -> Self {
        self.edge = edge.into();
        self
    }

    pub fn with_subgraph(mut self, subgraph: impl Into<Resolver<SubgraphSig>>) -> Self {
        self.subgraph = subgraph.into();
        self
    }

    /// Style the graph with `f(graph, graph_attrs)`.
    pub fn graph_fn<F>(self, f: F) -> Self
    where
        F: Fn(&G, &Attrs) -> Attrs + Send + Sync + 'static,
    {
        self.with_graph(MaybeFn::graph(f))
    }

    /// Style nodes with `f(node, node_attrs)`.
    pub fn node_fn<F>(self, f: F) -> Self
    where
        F: Fn(&G::Node, &Attrs) -> Attrs + Send + Sync + 'static,
    {
        self.with_node(MaybeFn::node(f))
    }

    /// Style edges with `f(source, target, key, edge_attrs)`.
    pub fn edge_fn<F>(self, f: F) -> Self
    where
        F: Fn(&G::Node, &G::Node, Option<&G::Key>, &Attrs) -> Attrs + Send + Sync + 'static,
    {
        self.with_edge(MaybeFn::edge(f))
    }

    /// Style subgraphs with `f(subgraph_key)`.
    pub fn subgraph_fn<F>(self, f: F) -> Self
    where
        F: Fn(&String) -> Attrs + Send + Sync + 'static,
    {
        self.with_subgraph(MaybeFn::unary(f))
    }
}

impl<G: GraphSource> Default for Style<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: GraphSource> Clone for Style<G> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
            node: self.node.clone(),
            edge: self.edge.clone(),
            subgraph: self.subgraph.clone(),
        }
    }
}

impl<G: GraphSource> fmt::Debug for Style<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Style")
            .field("graph", &self.graph)
            .field("node", &self.node)
            .field("edge", &self.edge)
            .field("subgraph", &self.subgraph)
            .finish()
    }
}

/// Layer several styles into one.
///
/// For each element kind, the composed resolver applies every style in order and
/// right-merges the results, so later styles override earlier ones key by key.
/// `None` entries are skipped.
pub fn compose<'a, G: GraphSource>(styles: impl IntoIterator<Item = Option<&'a Style<G>>>) -> Style<G> {
    let styles: Vec<&Style<G>> = styles.into_iter().flatten().collect();
    Style {
        graph: chain(styles.iter().map(|s| s.graph.clone())),
        node: chain(styles.iter().map(|s| s.node.clone())),
        edge: chain(styles.iter().map(|s| s.edge.clone())),
        subgraph: chain(styles.iter().map(|s| s.subgraph.clone())),
    }
}
