//! DOT serializer - convert an attributed graph and a [`Style`] to Graphviz text.
//!
//! The output has the shape
//!
//! ```text
//! digraph "G" {
//!     graph [...];
//!     node0000 [...];
//!     subgraph "key" {
//!         graph [...];
//!         node0001 [...];
//!     }
//!     node0000 -> node0001 [...];
//! }
//! ```
//!
//! # Formatting
//!
//! - 4-space indentation per nesting level
//! - Nodes get synthetic ids (`node0000`, `node0001`, ...) in iteration order
//! - Names and attribute values are always double-quoted, except markup labels
//!   which use Graphviz's `<...>` form
//! - Attributes are emitted in the resolved map's insertion order
//!
//! Pass an ordered graph for byte-stable output.

use crate::color::color;
use crate::error::{Error, Result};
use crate::functional::{MaybeFn, NodeSig};
use crate::source::GraphSource;
use crate::style::Style;
use crate::value::{Attrs, Value};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Attributes whose non-string values are RGB/RGBA channels.
pub const COLOR_ATTRIBUTES: [&str; 6] = [
    "bgcolor",
    "color",
    "fillcolor",
    "fontcolor",
    "labelfontcolor",
    "pencolor",
];

/// Attributes that accept markup labels.
pub const LABEL_ATTRIBUTES: [&str; 3] = ["label", "headlabel", "taillabel"];

/// Assigns a node to a named subgraph, or to none.
pub type SubgraphSelector<N> = MaybeFn<NodeSig<N>, Option<String>>;

/// Serialize `graph` as Graphviz text, styled by `style`.
///
/// Nodes for which `subgraph` returns a key are emitted inside a `subgraph`
/// block named by that key, in first-seen key order.
pub fn to_dot<G: GraphSource>(
    graph: &G,
    style: &Style<G>,
    subgraph: Option<&SubgraphSelector<G::Node>>,
) -> Result<String> {
    let graph_attrs = style.graph.apply((graph, graph.graph_attrs()))?;
    let graph_type = match graph_attrs.get("type") {
        None if graph.is_directed() => "digraph",
        None => "graph",
        Some(Value::Str(t)) if t == "graph" || t == "digraph" => t.as_str(),
        Some(other) => {
            return Err(Error::InvalidGraphType {
                found: other.to_string(),
            })
        }
    };
    let connector = if graph_type == "digraph" { "->" } else { "--" };

    let mut ids: HashMap<&G::Node, String> = HashMap::new();
    let mut loose = Vec::new();
    let mut clusters: IndexMap<String, Vec<(&G::Node, &Attrs)>> = IndexMap::new();
    for (i, (node, attrs)) in graph.nodes().enumerate() {
        ids.insert(node, format!("node{:04}", i));
        let key = match subgraph {
            Some(selector) => selector.apply((node, attrs))?,
            None => None,
        };
        match key {
            Some(key) => clusters.entry(key).or_default().push((node, attrs)),
            None => loose.push((node, attrs)),
        }
    }

    let mut w = Writer::new();
    let name = graph_attrs
        .get("name")
        .cloned()
        .unwrap_or_else(|| Value::from("G"));
    w.open(&format!("{} {}", graph_type, to_output_string(&name, None)?));
    w.write_graph_attrs(&graph_attrs)?;

    for (node, attrs) in loose {
        w.write_node(&ids[node], &style.node.apply((node, attrs))?)?;
    }

    for (key, members) in &clusters {
        let attrs = style.subgraph.apply((key,))?;
        let name = attrs.get("name").cloned().unwrap_or_else(|| Value::from(key));
        w.open(&format!("subgraph {}", to_output_string(&name, None)?));
        w.write_graph_attrs(&attrs)?;
        for &(node, node_attrs) in members {
            w.write_node(&ids[node], &style.node.apply((node, node_attrs))?)?;
        }
        w.close();
    }

    let multigraph = graph.is_multigraph();
    let mut edge_count = 0usize;
    for edge in graph.edges() {
        let key = if multigraph { edge.key } else { None };
        let attrs = style
            .edge
            .apply((edge.source, edge.target, key, edge.attrs))?;
        let (Some(u), Some(v)) = (ids.get(edge.source), ids.get(edge.target)) else {
            return Err(Error::Validation(
                "edge endpoint is not a node of the graph".to_string(),
            ));
        };
        w.writeln(&format!("{} {} {} {};", u, connector, v, attributes(&attrs)?));
        edge_count += 1;
    }
    w.close();

    let output = w.finish();
    tracing::trace!(
        nodes = ids.len(),
        edges = edge_count,
        subgraphs = clusters.len(),
        bytes = output.len(),
        "serialized graph"
    );
    Ok(output)
}

/// Encode one attribute value as Graphviz text.
///
/// Color attributes turn channel values into `#RRGGBB[AA]`, label attributes
/// render markup as `<...>`, and everything else is stringified and quoted with
/// `"` and `\` escaped. NUL and SUB are dropped; they break Graphviz.
pub fn to_output_string(value: &Value, attribute: Option<&str>) -> Result<String> {
    if value.is_none() {
        return Ok(quote(""));
    }
    if let Some(attribute) = attribute {
        if COLOR_ATTRIBUTES.contains(&attribute) {
            match value {
                Value::Str(_) => {}
                Value::Color(channels) => {
                    let hex = color(channels).map_err(|e| Error::InvalidColor {
                        attribute: attribute.to_string(),
                        reason: e.to_string(),
                    })?;
                    return Ok(quote(&hex));
                }
                other => {
                    return Err(Error::InvalidColor {
                        attribute: attribute.to_string(),
                        reason: format!("expected a color string or channels, found {:?}", other),
                    })
                }
            }
        }
        if LABEL_ATTRIBUTES.contains(&attribute) {
            if let Value::Markup(markup) = value {
                return Ok(format!("<{}>", markup));
            }
        }
    }
    Ok(quote(&value.to_string()))
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\u{0}' | '\u{1a}' => {}
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Render an attribute list, `[k="v", ...]`. Empty maps render as `[]`.
pub fn attributes(attrs: &Attrs) -> Result<String> {
    let pairs = attrs
        .iter()
        .map(|(k, v)| Ok(format!("{}={}", k, to_output_string(v, Some(k))?)))
        .collect::<Result<Vec<_>>>()?;
    Ok(format!("[{}]", pairs.join(", ")))
}

/// Internal writer for building output.
struct Writer {
    output: String,
    indent: usize,
}

impl Writer {
    fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    /// The text without the final newline.
    fn finish(mut self) -> String {
        if self.output.ends_with('\n') {
            self.output.pop();
        }
        self.output
    }

    /// Write a line with current indentation (4 spaces per level).
    fn writeln(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn open(&mut self, header: &str) {
        self.writeln(&format!("{} {{", header));
        self.indent += 1;
    }

    fn close(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.writeln("}");
    }

    fn write_graph_attrs(&mut self, attrs: &Attrs) -> Result<()> {
        self.writeln(&format!("graph {};", attributes(attrs)?));
        Ok(())
    }

    fn write_node(&mut self, id: &str, attrs: &Attrs) -> Result<()> {
        self.writeln(&format!("{} {};", id, attributes(attrs)?));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;
    use crate::functional::switch;
    use crate::style::Resolver;
    use crate::markup::{bold, italic, join, table, table_cell, table_row};
    use crate::source::EdgeItem;
    use pretty_assertions::assert_eq;

    /// Insertion-ordered test graph.
    #[derive(Default)]
    struct TestGraph {
        directed: bool,
        multi: bool,
        attrs: Attrs,
        nodes: Vec<(&'static str, Attrs)>,
        edges: Vec<(&'static str, &'static str, Option<&'static str>, Attrs)>,
    }

    impl GraphSource for TestGraph {
        type Node = &'static str;
        type Key = &'static str;

        fn is_directed(&self) -> bool {
            self.directed
        }

        fn is_multigraph(&self) -> bool {
            self.multi
        }

        fn graph_attrs(&self) -> &Attrs {
            &self.attrs
        }

        fn nodes(&self) -> Box<dyn Iterator<Item = (&Self::Node, &Attrs)> + '_> {
            Box::new(self.nodes.iter().map(|(n, a)| (n, a)))
        }

        fn edges(&self) -> Box<dyn Iterator<Item = EdgeItem<'_, Self::Node, Self::Key>> + '_> {
            Box::new(self.edges.iter().map(|(u, v, k, a)| EdgeItem {
                source: u,
                target: v,
                key: k.as_ref(),
                attrs: a,
            }))
        }
    }

    fn passthrough() -> Style<TestGraph> {
        Style::<TestGraph>::new().node_fn(|_, d| d.clone())
    }

    #[test]
    fn test_multiline_labels() {
        let graph = TestGraph {
            directed: true,
            nodes: vec![
                ("0", attrs! { "label" => "A\nB" }),
                ("1", attrs! { "label" => "C\nD" }),
            ],
            edges: vec![("0", "1", None, attrs!())],
            ..Default::default()
        };
        let expected = "digraph \"G\" {
    graph [];
    node0000 [label=\"A
B\"];
    node0001 [label=\"C
D\"];
    node0000 -> node0001 [];
}";
        assert_eq!(to_dot(&graph, &passthrough(), None).unwrap(), expected);
    }

    #[test]
    fn test_markup_labels() {
        let graph = TestGraph {
            directed: true,
            nodes: vec![
                (
                    "0",
                    attrs! {
                        "label" => table(
                            [
                                table_row([table_cell("A", attrs! { "COLSPAN" => 2 })]).into(),
                                table_row([table_cell("C", attrs!()), table_cell("D", attrs!())]).into(),
                            ],
                            attrs!(),
                        )
                    },
                ),
                ("1", attrs! { "label" => bold(r#"3 < 7 "hello" & "world" 5 > 2"#) }),
                ("2", attrs! { "label" => join(["hello".into(), italic("world").into()]) }),
            ],
            edges: vec![("0", "1", None, attrs!())],
            ..Default::default()
        };
        let expected = r#"digraph "G" {
    graph [];
    node0000 [label=<<TABLE><TR><TD COLSPAN="2">A</TD></TR><TR><TD>C</TD><TD>D</TD></TR></TABLE>>];
    node0001 [label=<<B>3 &lt; 7 &quot;hello&quot; &amp; &quot;world&quot; 5 &gt; 2</B>>];
    node0002 [label=<hello<I>world</I>>];
    node0000 -> node0001 [];
}"#;
        assert_eq!(to_dot(&graph, &passthrough(), None).unwrap(), expected);
    }

    #[test]
    fn test_subgraph_indentation() {
        let graph = TestGraph {
            directed: true,
            nodes: vec![("A", attrs!()), ("B", attrs!())],
            edges: vec![("A", "B", None, attrs!())],
            ..Default::default()
        };
        let style = Style::<TestGraph>::new().node_fn(|u, _| attrs! { "label" => *u });
        let selector = MaybeFn::node(|u: &&'static str, _: &Attrs| Some(u.to_string()));
        let expected = r#"digraph "G" {
    graph [];
    subgraph "A" {
        graph [];
        node0000 [label="A"];
    }
    subgraph "B" {
        graph [];
        node0001 [label="B"];
    }
    node0000 -> node0001 [];
}"#;
        assert_eq!(to_dot(&graph, &style, Some(&selector)).unwrap(), expected);
    }

    #[test]
    fn test_subgraph_partition_keeps_first_seen_order() {
        let graph = TestGraph {
            nodes: vec![
                ("a", attrs! { "team" => "red" }),
                ("b", attrs!()),
                ("c", attrs! { "team" => "blue" }),
                ("d", attrs! { "team" => "red" }),
            ],
            ..Default::default()
        };
        let style = Style::<TestGraph>::new()
            .subgraph_fn(|key| attrs! { "name" => format!("cluster_{}", key), "color" => key.as_str() });
        let selector = MaybeFn::node(|_: &&'static str, d: &Attrs| {
            d.get("team").map(|v| v.to_string())
        });
        let expected = r#"graph "G" {
    graph [];
    node0001 [];
    subgraph "cluster_red" {
        graph [name="cluster_red", color="red"];
        node0000 [];
        node0003 [];
    }
    subgraph "cluster_blue" {
        graph [name="cluster_blue", color="blue"];
        node0002 [];
    }
}"#;
        assert_eq!(to_dot(&graph, &style, Some(&selector)).unwrap(), expected);
    }

    #[test]
    fn test_graph_type_and_name_override() {
        let graph = TestGraph {
            directed: false,
            nodes: vec![("a", attrs!()), ("b", attrs!())],
            edges: vec![("a", "b", None, attrs!())],
            ..Default::default()
        };
        let style = Style::<TestGraph>::new().with_graph(attrs! { "type" => "digraph", "name" => "deps" });
        let out = to_dot(&graph, &style, None).unwrap();
        assert!(out.starts_with("digraph \"deps\" {\n    graph [type=\"digraph\", name=\"deps\"];"));
        assert!(out.contains("node0000 -> node0001 [];"));
    }

    #[test]
    fn test_undirected_connector() {
        let graph = TestGraph {
            nodes: vec![("a", attrs!()), ("b", attrs!())],
            edges: vec![("a", "b", None, attrs!())],
            ..Default::default()
        };
        let out = to_dot(&graph, &Style::<TestGraph>::new(), None).unwrap();
        assert!(out.contains("node0000 -- node0001 [];"));
    }

    #[test]
    fn test_invalid_graph_type() {
        let graph = TestGraph::default();
        let style = Style::<TestGraph>::new().with_graph(attrs! { "type" => "subgraph" });
        let err = to_dot(&graph, &style, None).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidGraphType {
                found: "subgraph".to_string()
            }
        );
    }

    #[test]
    fn test_edge_keys_only_for_multigraphs() {
        let mut graph = TestGraph {
            directed: true,
            multi: true,
            nodes: vec![("0", attrs!()), ("1", attrs!())],
            edges: vec![
                ("0", "1", Some("LessThan"), attrs!()),
                ("0", "1", Some("Successor"), attrs!()),
            ],
            ..Default::default()
        };
        let style = Style::<TestGraph>::new().edge_fn(|u, v, k, _| {
            attrs! { "label" => format!("{}:{}:{}", u, v, k.copied().unwrap_or("-")) }
        });

        let out = to_dot(&graph, &style, None).unwrap();
        assert!(out.contains(r#"node0000 -> node0001 [label="0:1:LessThan"];"#));
        assert!(out.contains(r#"node0000 -> node0001 [label="0:1:Successor"];"#));

        graph.multi = false;
        let out = to_dot(&graph, &style, None).unwrap();
        assert!(out.contains(r#"node0000 -> node0001 [label="0:1:-"];"#));
    }

    #[test]
    fn test_resolver_errors_propagate() {
        let graph = TestGraph {
            nodes: vec![("a", attrs!())],
            ..Default::default()
        };
        let by_length: Resolver<NodeSig<&'static str>> = switch(
            MaybeFn::node(|u: &&'static str, _: &Attrs| u.len()),
            Vec::new(),
            None,
        );
        let style = Style::<TestGraph>::new().with_node(by_length);
        assert!(to_dot(&graph, &style, None).unwrap_err().is_lookup());
    }

    #[test]
    fn test_to_output_string() {
        let cases: Vec<(Value, Option<&str>, &str)> = vec![
            (Value::None, None, r#""""#),
            (Value::from(""), None, r#""""#),
            (Value::from("plain"), None, r#""plain""#),
            (Value::from(r#"say "hi""#), None, r#""say \"hi\"""#),
            (Value::from(r"a\b"), None, r#""a\\b""#),
            (Value::from("x\u{0}y\u{1a}z"), None, r#""xyz""#),
            (Value::from(3), Some("penwidth"), r#""3""#),
            (Value::from((1.0, 0.0, 0.0)), Some("fillcolor"), r##""#FF0000""##),
            (Value::from("red"), Some("color"), r#""red""#),
            (Value::from(bold("x")), Some("taillabel"), "<<B>x</B>>"),
            (Value::from(bold("x")), Some("tooltip"), r#""<B>x</B>""#),
        ];
        for (value, attribute, expected) in cases {
            assert_eq!(to_output_string(&value, attribute).unwrap(), expected);
        }
    }

    #[test]
    fn test_non_string_color_is_rejected() {
        let err = to_output_string(&Value::from(7), Some("fontcolor")).unwrap_err();
        assert!(matches!(err, Error::InvalidColor { .. }));

        let err = to_output_string(&Value::color([0.0, 1.0]), Some("color")).unwrap_err();
        assert!(matches!(err, Error::InvalidColor { .. }));
    }

    #[test]
    fn test_attribute_list() {
        assert_eq!(attributes(&attrs!()).unwrap(), "[]");
        assert_eq!(
            attributes(&attrs! { "shape" => "box", "color" => (0.0, 0.0, 1.0) }).unwrap(),
            r##"[shape="box", color="#0000FF"]"##
        );
    }
}
