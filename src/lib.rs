//! # gvstyle
//!
//! Style attributed graphs with composable rules and render them with Graphviz.
//!
//! ## Features
//!
//! | Feature | Crate | Description |
//! |---------|-------|-------------|
//! | (always) | [`gvstyle-core`] | Styles, combinators, markup labels, DOT serializer |
//! | `graph`  | [`gvstyle-graph`]  | Attributed graph, traversal, neighborhood, boundary, ordering |
//! | `render` | [`gvstyle-render`] | Graphviz discovery and subprocess rendering |
//!
//! `default = ["graph", "render"]` enables all of the above.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! gvstyle = "0.1"
//! ```
//!
//! ```rust,ignore
//! use gvstyle::graph::AttrGraph;
//! use gvstyle::render::{RenderRequest, Renderer};
//! use gvstyle::{attrs, Style};
//!
//! let mut graph = AttrGraph::<&str>::directed();
//! graph.add_edge("a", "b", attrs! { "weight" => 2 });
//!
//! let style = Style::<AttrGraph<&str>>::new()
//!     .with_node(attrs! { "shape" => "box" })
//!     .edge_fn(|_, _, _, d| attrs! { "penwidth" => d.get("weight").cloned() });
//!
//! let svg = Renderer::new().render(&graph, &RenderRequest::new().style(&style).format("svg"))?;
//! ```
//!
//! [`gvstyle-core`]: gvstyle_core
//! [`gvstyle-graph`]: https://docs.rs/gvstyle-graph
//! [`gvstyle-render`]: https://docs.rs/gvstyle-render

pub use gvstyle_core::{
    attrs, chain, color, compose, contrasting_color, contrasting_color_among, dot, format_attrs, functional, markup,
    styles, switch, to_dot, to_output_string, Attrs, EdgeItem, Error, GraphSource, KeyLabel, Markup, MaybeFn, Resolver, Result, Style,
    SubgraphSelector, Value,
};

#[cfg(feature = "graph")]
pub use gvstyle_graph as graph;
#[cfg(feature = "graph")]
pub use gvstyle_graph::AttrGraph;

#[cfg(feature = "render")]
pub use gvstyle_render as render;
#[cfg(feature = "render")]
pub use gvstyle_render::{RenderError, RenderRequest, Rendered, Renderer};
