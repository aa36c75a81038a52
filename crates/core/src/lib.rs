//! # gvstyle-core
//!
//! Composable styling and DOT serialization for attributed graphs.
//!
//! A [`Style`] maps graph, node, edge, and subgraph elements to Graphviz
//! attributes. Each mapping is either a constant attribute map or a function of
//! the element, and styles can be layered with [`compose`]. [`to_dot`] walks any
//! [`GraphSource`] and emits Graphviz text, rendering [`markup`] labels and color
//! channels along the way.
//!
//! ## Example
//!
//! ```ignore
//! use gvstyle_core::{attrs, to_dot, Style};
//!
//! let style = Style::new()
//!     .with_graph(attrs! { "rankdir" => "LR" })
//!     .node_fn(|u, d| attrs! { "label" => u.to_string(), "shape" => "box" });
//!
//! let text = to_dot(&graph, &style, None)?;
//! ```

pub mod color;
pub mod dot;
pub mod error;
pub mod functional;
pub mod markup;
mod source;
pub mod style;
pub mod styles;
mod value;

pub use color::{color, contrasting_color, contrasting_color_among};
pub use dot::{to_dot, to_output_string, SubgraphSelector};
pub use error::{Error, Result};
pub use functional::{chain, switch, MaybeFn};
pub use markup::Markup;
pub use source::{EdgeItem, GraphSource, KeyLabel};
pub use style::{compose, Resolver, Style};
pub use value::{format_attrs, Attrs, Value};
