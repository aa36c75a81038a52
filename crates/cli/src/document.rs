//! JSON graph documents and style files.

use anyhow::{anyhow, bail, Context, Result};
use gvstyle_core::functional::{EdgeSig, NodeSig, Signature};
use gvstyle_core::{chain, switch, Attrs, MaybeFn, Resolver, Style, SubgraphSelector, Value};
use gvstyle_graph::AttrGraph;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::fs;
use std::path::Path;

/// Graphs loaded from documents use their JSON ids (and edge keys) as text.
pub type DocGraph = AttrGraph<String, String>;

type JsonAttrs = IndexMap<String, JsonValue>;

/// `{ "directed": .., "multigraph": .., "attrs": {..}, "nodes": [..], "edges": [..] }`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphDocument {
    #[serde(default)]
    pub directed: bool,
    #[serde(default)]
    pub multigraph: bool,
    #[serde(default)]
    pub attrs: JsonAttrs,
    #[serde(default)]
    pub nodes: Vec<NodeEntry>,
    #[serde(default)]
    pub edges: Vec<EdgeEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeEntry {
    pub id: JsonValue,
    #[serde(default)]
    pub attrs: JsonAttrs,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeEntry {
    pub source: JsonValue,
    pub target: JsonValue,
    #[serde(default)]
    pub key: Option<JsonValue>,
    #[serde(default)]
    pub attrs: JsonAttrs,
}

impl GraphDocument {
    pub fn load(path: &Path) -> Result<Self> {
        load_json(path)
    }

    pub fn into_graph(self) -> Result<DocGraph> {
        let mut graph = DocGraph::with_kind(self.directed, self.multigraph);
        *graph.attrs_mut() = to_attrs(&self.attrs).context("invalid graph attributes")?;

        for node in &self.nodes {
            let id = id_text(&node.id);
            let attrs = to_attrs(&node.attrs).with_context(|| format!("invalid attributes on node {id}"))?;
            graph.add_node_with(id, attrs);
        }

        for edge in &self.edges {
            let (source, target) = (id_text(&edge.source), id_text(&edge.target));
            let attrs = to_attrs(&edge.attrs)
                .with_context(|| format!("invalid attributes on edge {source} -> {target}"))?;
            match &edge.key {
                Some(key) => graph.add_keyed_edge(source, target, id_text(key), attrs),
                None => graph.add_edge(source, target, attrs),
            }
        }
        Ok(graph)
    }
}

/// A style file. Constant maps for each element kind, plus optional switches
/// that pick node or edge attributes by the value of one of their attributes.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleFile {
    #[serde(default)]
    pub graph: JsonAttrs,
    #[serde(default)]
    pub node: JsonAttrs,
    #[serde(default)]
    pub edge: JsonAttrs,
    #[serde(default)]
    pub subgraph: JsonAttrs,
    #[serde(default)]
    pub node_switch: Option<SwitchSpec>,
    #[serde(default)]
    pub edge_switch: Option<SwitchSpec>,
}

/// `{ "attribute": "kind", "cases": { "a": {..} }, "default": {..} }`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SwitchSpec {
    pub attribute: String,
    #[serde(default)]
    pub cases: IndexMap<String, JsonAttrs>,
    #[serde(default)]
    pub default: Option<JsonAttrs>,
}

impl SwitchSpec {
    fn cases<S: Signature>(&self) -> Result<Vec<(String, MaybeFn<S, Attrs>)>> {
        self.cases
            .iter()
            .map(|(key, attrs)| {
                let attrs = to_attrs(attrs).with_context(|| format!("invalid attributes in case {key:?}"))?;
                Ok((key.clone(), MaybeFn::value(attrs)))
            })
            .collect()
    }

    fn default<S: Signature>(&self) -> Result<Option<MaybeFn<S, Attrs>>> {
        self.default
            .as_ref()
            .map(|attrs| to_attrs(attrs).map(MaybeFn::value).context("invalid default attributes"))
            .transpose()
    }
}

impl StyleFile {
    pub fn load(path: &Path) -> Result<Self> {
        load_json(path)
    }

    pub fn to_style(&self) -> Result<Style<DocGraph>> {
        let mut node: Resolver<NodeSig<String>> = MaybeFn::value(to_attrs(&self.node)?);
        if let Some(spec) = &self.node_switch {
            let attribute = spec.attribute.clone();
            let key = MaybeFn::node(move |_: &String, d: &Attrs| attribute_text(d, &attribute));
            node = chain([node, switch(key, spec.cases()?, spec.default()?)]);
        }

        let mut edge: Resolver<EdgeSig<String, String>> = MaybeFn::value(to_attrs(&self.edge)?);
        if let Some(spec) = &self.edge_switch {
            let attribute = spec.attribute.clone();
            let key = MaybeFn::edge(move |_: &String, _: &String, _: Option<&String>, d: &Attrs| {
                attribute_text(d, &attribute)
            });
            edge = chain([edge, switch(key, spec.cases()?, spec.default()?)]);
        }

        Ok(Style::<DocGraph>::new()
            .with_graph(to_attrs(&self.graph)?)
            .with_node(node)
            .with_edge(edge)
            .with_subgraph(to_attrs(&self.subgraph)?))
    }
}

/// Put each node in the subgraph named by its `attribute`, if it has one.
pub fn subgraph_selector(attribute: String) -> SubgraphSelector<String> {
    MaybeFn::node(move |_: &String, d: &Attrs| {
        d.get(&attribute)
            .filter(|value| !value.is_none())
            .map(|value| value.to_string())
    })
}

fn attribute_text(attrs: &Attrs, attribute: &str) -> String {
    attrs.get(attribute).map(|value| value.to_string()).unwrap_or_default()
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn id_text(id: &JsonValue) -> String {
    match id {
        JsonValue::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn to_attrs(json: &JsonAttrs) -> Result<Attrs> {
    json.iter()
        .map(|(key, value)| {
            let value = to_value(value).with_context(|| format!("attribute {key:?}"))?;
            Ok((key.clone(), value))
        })
        .collect()
}

/// Strings, numbers, booleans, and null map directly; arrays of numbers are
/// color channels.
pub fn to_value(json: &JsonValue) -> Result<Value> {
    Ok(match json {
        JsonValue::Null => Value::None,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().ok_or_else(|| anyhow!("unsupported number {n}"))?),
        },
        JsonValue::String(text) => Value::Str(text.clone()),
        JsonValue::Array(items) => {
            let channels = items
                .iter()
                .map(JsonValue::as_f64)
                .collect::<Option<Vec<f64>>>()
                .ok_or_else(|| anyhow!("arrays must hold color channel numbers, found {json}"))?;
            Value::Color(channels)
        }
        JsonValue::Object(_) => bail!("objects are not attribute values, found {json}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gvstyle_core::{attrs, to_dot};
    use pretty_assertions::assert_eq;

    fn parse<T: DeserializeOwned>(text: &str) -> T {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_json_values() {
        assert_eq!(to_value(&serde_json::json!(null)).unwrap(), Value::None);
        assert_eq!(to_value(&serde_json::json!(3)).unwrap(), Value::Int(3));
        assert_eq!(to_value(&serde_json::json!(0.5)).unwrap(), Value::Float(0.5));
        assert_eq!(to_value(&serde_json::json!("box")).unwrap(), Value::from("box"));
        assert_eq!(
            to_value(&serde_json::json!([1, 0.5, 0])).unwrap(),
            Value::Color(vec![1.0, 0.5, 0.0])
        );
        assert!(to_value(&serde_json::json!(["red"])).is_err());
        assert!(to_value(&serde_json::json!({"a": 1})).is_err());
    }

    #[test]
    fn test_graph_document() {
        let document: GraphDocument = parse(
            r#"{
                "directed": true,
                "attrs": {"rankdir": "LR"},
                "nodes": [{"id": "a", "attrs": {"kind": "start"}}, {"id": 2}],
                "edges": [{"source": "a", "target": 2}, {"source": 2, "target": "c"}]
            }"#,
        );
        let graph = document.into_graph().unwrap();

        let nodes: Vec<&str> = graph.nodes().map(|(n, _)| n.as_str()).collect();
        assert_eq!(nodes, vec!["a", "2", "c"]);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.attrs(), &attrs! { "rankdir" => "LR" });
        assert!(graph.is_directed());
    }

    #[test]
    fn test_multigraph_document_keeps_keys() {
        let document: GraphDocument = parse(
            r#"{
                "multigraph": true,
                "edges": [
                    {"source": "a", "target": "b", "key": "x"},
                    {"source": "a", "target": "b", "key": "y"}
                ]
            }"#,
        );
        let graph = document.into_graph().unwrap();
        let keys: Vec<Option<&str>> = graph.edges().map(|e| e.key.map(String::as_str)).collect();
        assert_eq!(keys, vec![Some("x"), Some("y")]);
    }

    #[test]
    fn test_multigraph_document_assigns_missing_keys() {
        let document: GraphDocument = parse(
            r#"{
                "multigraph": true,
                "edges": [
                    {"source": "a", "target": "b"},
                    {"source": "a", "target": "b"},
                    {"source": "a", "target": "b", "key": "x"}
                ]
            }"#,
        );
        let graph = document.into_graph().unwrap();
        let keys: Vec<Option<&str>> = graph.edges().map(|e| e.key.map(String::as_str)).collect();
        assert_eq!(keys, vec![Some("0"), Some("1"), Some("x")]);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<GraphDocument>(r#"{"node": []}"#).is_err());
    }

    #[test]
    fn test_style_file_with_switch() {
        let document: GraphDocument = parse(
            r#"{
                "directed": true,
                "nodes": [
                    {"id": "a", "attrs": {"kind": "start"}},
                    {"id": "b", "attrs": {"kind": "other"}}
                ],
                "edges": [{"source": "a", "target": "b", "attrs": {"w": 2}}]
            }"#,
        );
        let style: StyleFile = parse(
            r#"{
                "graph": {"rankdir": "LR"},
                "node": {"shape": "box"},
                "node_switch": {
                    "attribute": "kind",
                    "cases": {"start": {"shape": "circle", "color": [0, 0, 1]}},
                    "default": {"style": "dashed"}
                },
                "edge_switch": {"attribute": "w", "cases": {"2": {"penwidth": 2}}}
            }"#,
        );

        let graph = document.into_graph().unwrap();
        let dot = to_dot(&graph, &style.to_style().unwrap(), None).unwrap();
        let expected = r##"digraph "G" {
    graph [rankdir="LR"];
    node0000 [shape="circle", color="#0000FF"];
    node0001 [shape="box", style="dashed"];
    node0000 -> node0001 [penwidth="2"];
}"##;
        assert_eq!(dot, expected);
    }

    #[test]
    fn test_switch_without_default_fails_on_unknown_key() {
        let document: GraphDocument = parse(r#"{"nodes": [{"id": "a"}]}"#);
        let style: StyleFile = parse(r#"{"node_switch": {"attribute": "kind", "cases": {"x": {}}}}"#);

        let graph = document.into_graph().unwrap();
        assert!(to_dot(&graph, &style.to_style().unwrap(), None).is_err());
    }

    #[test]
    fn test_subgraph_selector() {
        let document: GraphDocument = parse(
            r#"{"nodes": [{"id": "a", "attrs": {"team": "red"}}, {"id": "b"}, {"id": "c", "attrs": {"team": null}}]}"#,
        );
        let graph = document.into_graph().unwrap();
        let selector = subgraph_selector("team".to_string());

        let groups: Vec<Option<String>> = graph
            .nodes()
            .map(|(n, d)| selector.apply((n, d)).unwrap())
            .collect();
        assert_eq!(groups, vec![Some("red".to_string()), None, None]);
    }
}
