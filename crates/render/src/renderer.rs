//! The caller-facing render operation.

use crate::error::RenderError;
use crate::graphviz::Graphviz;
use gvstyle_core::{attrs, compose, to_dot, GraphSource, Style, SubgraphSelector};
use lazy_static::lazy_static;
use std::fmt::{self, Display};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Format that returns the serialized text instead of running an engine.
pub const RAW_FORMAT: &str = "raw";

/// Prefix routing the result to the [`DisplaySink`] instead of returning it.
pub const DISPLAY_PREFIX: &str = "display/";

const DEFAULT_ALGORITHM: &str = "dot";
const DEFAULT_DISPLAY_FORMAT: &str = "display/svg";

lazy_static! {
    static ref SHARED_GRAPHVIZ: Arc<Graphviz> = Arc::new(Graphviz::new());
}

/// Somewhere to show rendered output, such as a notebook or a viewer window.
pub trait DisplaySink: Send + Sync {
    /// Show engine output produced in `format` (`svg`, `png`, ...).
    fn display(&self, data: &[u8], format: &str) -> Result<(), RenderError>;

    /// Show serialized graph text.
    fn display_text(&self, text: &str) -> Result<(), RenderError>;
}

/// The result of a render that was not sent to a display sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// The serialized graph, for the `raw` format.
    Text(String),
    /// Layout engine output.
    Bytes(Vec<u8>),
}

impl Rendered {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Rendered::Text(text) => text.as_bytes(),
            Rendered::Bytes(bytes) => bytes,
        }
    }
}

/// Options for a single render.
pub struct RenderRequest<'a, G: GraphSource> {
    style: Option<&'a Style<G>>,
    algorithm: String,
    format: Option<String>,
    graphviz_bin: Option<PathBuf>,
    subgraph: Option<&'a SubgraphSelector<G::Node>>,
}

impl<G: GraphSource> Default for RenderRequest<'_, G> {
    fn default() -> Self {
        Self {
            style: None,
            algorithm: DEFAULT_ALGORITHM.to_string(),
            format: None,
            graphviz_bin: None,
            subgraph: None,
        }
    }
}

impl<'a, G: GraphSource> RenderRequest<'a, G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Style layered over the default labels.
    pub fn style(mut self, style: &'a Style<G>) -> Self {
        self.style = Some(style);
        self
    }

    /// Layout algorithm, e.g. `dot`, `neato`, `circo`. Defaults to `dot`.
    pub fn algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    /// Output format, e.g. `svg`, `png`, `raw`, `display/svg`.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// The installation's `bin` directory.
    pub fn graphviz_bin(mut self, dir: impl Into<PathBuf>) -> Self {
        self.graphviz_bin = Some(dir.into());
        self
    }

    /// Group nodes into subgraphs by the key this selector returns.
    pub fn subgraph(mut self, selector: &'a SubgraphSelector<G::Node>) -> Self {
        self.subgraph = Some(selector);
        self
    }
}

/// Serializes styled graphs and hands them to Graphviz.
#[derive(Clone)]
pub struct Renderer {
    graphviz: Arc<Graphviz>,
    sink: Option<Arc<dyn DisplaySink>>,
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("graphviz", &self.graphviz)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// A renderer sharing the process-wide Graphviz lookup cache.
    pub fn new() -> Self {
        Self {
            graphviz: Arc::clone(&SHARED_GRAPHVIZ),
            sink: None,
        }
    }

    pub fn with_graphviz(mut self, graphviz: Graphviz) -> Self {
        self.graphviz = Arc::new(graphviz);
        self
    }

    /// Enable `display/*` formats. Without a format, output goes here as SVG.
    pub fn with_sink(mut self, sink: Arc<dyn DisplaySink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Render `graph` as described by `request`.
    ///
    /// Returns `None` when the output was sent to the display sink. Every node
    /// is labelled with its `Display` text unless the request's style says
    /// otherwise.
    pub fn render<G>(&self, graph: &G, request: &RenderRequest<'_, G>) -> Result<Option<Rendered>, RenderError>
    where
        G: GraphSource,
        G::Node: Display,
    {
        if request.algorithm.is_empty() {
            return Err(RenderError::Validation(
                "The algorithm must be the name of a valid GraphViz algorithm.".to_string(),
            ));
        }

        let format = match (&request.format, &self.sink) {
            (Some(format), _) => format.as_str(),
            (None, Some(_)) => DEFAULT_DISPLAY_FORMAT,
            (None, None) => {
                return Err(RenderError::Validation(
                    "You must specify a format when no display sink is available.".to_string(),
                ))
            }
        };

        let (sink, engine_format) = match format.strip_prefix(DISPLAY_PREFIX) {
            Some(rest) => {
                let sink = self.sink.as_deref().ok_or_else(|| {
                    RenderError::Validation(format!("A display sink is required to use a {DISPLAY_PREFIX}* format."))
                })?;
                (Some(sink), rest)
            }
            None => (None, format),
        };

        let root = root_style::<G>();
        let style = compose([Some(&root), request.style]);
        let text = to_dot(graph, &style, request.subgraph)?;

        if engine_format == RAW_FORMAT {
            return match sink {
                Some(sink) => sink.display_text(&text).map(|()| None),
                None => Ok(Some(Rendered::Text(text))),
            };
        }

        let output = self.graphviz.run(
            &text,
            &request.algorithm,
            engine_format,
            request.graphviz_bin.as_deref(),
        )?;
        debug!(format, bytes = output.len(), "rendered graph");

        match sink {
            Some(sink) => sink.display(&output, engine_format).map(|()| None),
            None => Ok(Some(Rendered::Bytes(output))),
        }
    }
}

/// Render with a default [`Renderer`] into `format`, using the installation
/// in `graphviz_bin` if given.
pub fn render<G>(graph: &G, style: Option<&Style<G>>, format: &str, graphviz_bin: Option<&Path>) -> Result<Rendered, RenderError>
where
    G: GraphSource,
    G::Node: Display,
{
    let mut request = RenderRequest::new().format(format);
    if let Some(style) = style {
        request = request.style(style);
    }
    if let Some(dir) = graphviz_bin {
        request = request.graphviz_bin(dir);
    }
    Renderer::new()
        .render(graph, &request)?
        .ok_or_else(|| RenderError::Validation(format!("{format} does not produce a value")))
}

fn root_style<G>() -> Style<G>
where
    G: GraphSource,
    G::Node: Display,
{
    Style::<G>::new().node_fn(|u, _| attrs! { "label" => u.to_string() })
}
