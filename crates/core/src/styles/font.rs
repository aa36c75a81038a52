use crate::functional::MaybeFn;
use crate::source::GraphSource;
use crate::style::Style;
use crate::value::{Attrs, Value};

/// A style that sets the same font on the graph, its nodes, and its edges.
///
/// Only the settings that are given are emitted.
pub fn font<G: GraphSource>(fontname: Option<&str>, fontsize: Option<f64>) -> Style<G> {
    let mut attrs = Attrs::new();
    if let Some(name) = fontname {
        attrs.insert("fontname".to_string(), Value::from(name));
    }
    if let Some(size) = fontsize {
        attrs.insert("fontsize".to_string(), Value::Float(size));
    }
    Style::<G>::new()
        .with_graph(MaybeFn::value(attrs.clone()))
        .with_node(MaybeFn::value(attrs.clone()))
        .with_edge(MaybeFn::value(attrs))
}
