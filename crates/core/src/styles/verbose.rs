use crate::attrs;
use crate::source::{GraphSource, KeyLabel};
use crate::style::Style;
use crate::value::format_attrs;
use std::fmt::Display;

/// A style that shows all of the data in a graph.
///
/// Graph attributes become a title, and every node and edge is labelled with its
/// identity and attribute map. Useful for debugging small graphs.
pub fn verbose<G>() -> Style<G>
where
    G: GraphSource,
    G::Node: Display,
    G::Key: KeyLabel,
{
    Style::<G>::new()
        .graph_fn(|_, d| {
            attrs! {
                "label" => format!("Graph Attributes: {}", format_attrs(d)),
                "labelloc" => "t",
            }
        })
        .node_fn(|u, d| {
            attrs! {
                "label" => format!("{}\n{}", u, format_attrs(d)),
                "shape" => "box",
            }
        })
        .edge_fn(|_, _, k, d| {
            let label = match k {
                Some(k) => format!("{}\n{}", k.key_label(), format_attrs(d)),
                None => format_attrs(d),
            };
            attrs! { "label" => label }
        })
}
