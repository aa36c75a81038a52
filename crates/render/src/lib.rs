//! # gvstyle-render
//!
//! Turn styled graphs into images by running Graphviz layout engines.
//!
//! [`Renderer`] serializes a graph with [`gvstyle_core::to_dot`], then pipes the
//! text through a layout engine located by [`Graphviz`]. Two pseudo-formats
//! skip the engine: `raw` returns the serialized text, and any format prefixed
//! with `display/` goes to the renderer's [`DisplaySink`] instead of being
//! returned.
//!
//! ## Example
//!
//! ```ignore
//! use gvstyle_render::{RenderRequest, Renderer};
//!
//! let svg = Renderer::new()
//!     .render(&graph, &RenderRequest::new().style(&style).format("svg"))?;
//! ```

mod error;
pub mod graphviz;
mod renderer;

pub use error::RenderError;
pub use graphviz::{annotate_error, Graphviz, GRAPHVIZ_BIN_ENV};
pub use renderer::{render, DisplaySink, RenderRequest, Rendered, Renderer, DISPLAY_PREFIX, RAW_FORMAT};
