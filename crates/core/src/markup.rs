//! Builders for Graphviz HTML-like labels.
//!
//! A [`Markup`] is a small tree of elements. It renders to the escaped text that
//! Graphviz accepts between `<` and `>` in `label`, `headlabel`, and `taillabel`.
//! See <https://www.graphviz.org/doc/info/shapes.html#html>.
//!
//! ```
//! use gvstyle_core::markup::{bold, italic, join, line_break};
//!
//! let label = join([bold("hello").into(), line_break(Default::default()).into(), italic("world").into()]);
//! assert_eq!(label.to_string(), "<B>hello</B><BR/><I>world</I>");
//! ```

use crate::error::{Error, Result};
use crate::value::Attrs;
use std::fmt;

/// A child of a markup element: either text or a nested element.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    Markup(Markup),
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Content::Text(s.to_string())
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Content::Text(s)
    }
}

impl From<i32> for Content {
    fn from(n: i32) -> Self {
        Content::Text(n.to_string())
    }
}

impl From<i64> for Content {
    fn from(n: i64) -> Self {
        Content::Text(n.to_string())
    }
}

impl From<f64> for Content {
    fn from(x: f64) -> Self {
        Content::Text(x.to_string())
    }
}

impl From<Markup> for Content {
    fn from(m: Markup) -> Self {
        Content::Markup(m)
    }
}

/// A markup element.
///
/// `children == None` renders as a self-closing tag, `Some(vec![])` as an empty
/// element pair. An element without a name is a bare sequence of children and
/// never carries attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Markup {
    name: Option<String>,
    children: Option<Vec<Content>>,
    attributes: Attrs,
}

impl Markup {
    /// Build an element. `Value::None` attributes are dropped.
    ///
    /// Fails if `name` is `None` while attributes remain.
    pub fn new(
        name: Option<&str>,
        children: Option<Vec<Content>>,
        attributes: Attrs,
    ) -> Result<Self> {
        let attributes: Attrs = attributes
            .into_iter()
            .filter(|(_, v)| !v.is_none())
            .collect();
        if name.is_none() && !attributes.is_empty() {
            return Err(Error::InvalidMarkup(format!(
                "an element without a tag cannot carry attributes: {:?}",
                attributes.keys().collect::<Vec<_>>()
            )));
        }
        Ok(Self {
            name: name.map(str::to_string),
            children,
            attributes,
        })
    }

    fn element(name: &str, children: Option<Vec<Content>>, attributes: Attrs) -> Self {
        Self {
            name: Some(name.to_string()),
            children,
            attributes: attributes
                .into_iter()
                .filter(|(_, v)| !v.is_none())
                .collect(),
        }
    }

    /// The tag name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The children, or `None` for a self-closing element.
    pub fn children(&self) -> Option<&[Content]> {
        self.children.as_deref()
    }

    /// The retained attributes, in insertion order.
    pub fn attributes(&self) -> &Attrs {
        &self.attributes
    }

    /// Render to escaped markup text.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(name) = &self.name else {
            for child in self.children.iter().flatten() {
                write_content(f, child)?;
            }
            return Ok(());
        };

        write!(f, "<{}", name)?;
        for (key, value) in &self.attributes {
            write!(f, " {}=\"{}\"", key, escape(&value.to_string()))?;
        }
        match &self.children {
            None => f.write_str("/>"),
            Some(children) => {
                f.write_str(">")?;
                for child in children {
                    write_content(f, child)?;
                }
                write!(f, "</{}>", name)
            }
        }
    }
}

fn write_content(f: &mut fmt::Formatter<'_>, content: &Content) -> fmt::Result {
    match content {
        Content::Text(text) => f.write_str(&escape(text)),
        // Nested elements escape their own leaves.
        Content::Markup(m) => write!(f, "{}", m),
    }
}

/// Escape text for use inside markup.
///
/// `&` must be replaced first since the other entities introduce ampersands.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Concatenate children without a surrounding tag.
pub fn join(children: impl IntoIterator<Item = Content>) -> Markup {
    Markup {
        name: None,
        children: Some(children.into_iter().collect()),
        attributes: Attrs::new(),
    }
}

/// `<BR/>`
pub fn line_break(attributes: Attrs) -> Markup {
    Markup::element("BR", None, attributes)
}

/// `<FONT ...>content</FONT>`
pub fn font(content: impl Into<Content>, attributes: Attrs) -> Markup {
    Markup::element("FONT", Some(vec![content.into()]), attributes)
}

pub fn italic(content: impl Into<Content>) -> Markup {
    Markup::element("I", Some(vec![content.into()]), Attrs::new())
}

pub fn bold(content: impl Into<Content>) -> Markup {
    Markup::element("B", Some(vec![content.into()]), Attrs::new())
}

pub fn underline(content: impl Into<Content>) -> Markup {
    Markup::element("U", Some(vec![content.into()]), Attrs::new())
}

pub fn overline(content: impl Into<Content>) -> Markup {
    Markup::element("O", Some(vec![content.into()]), Attrs::new())
}

pub fn subscript(content: impl Into<Content>) -> Markup {
    Markup::element("SUB", Some(vec![content.into()]), Attrs::new())
}

pub fn superscript(content: impl Into<Content>) -> Markup {
    Markup::element("SUP", Some(vec![content.into()]), Attrs::new())
}

pub fn strikethrough(content: impl Into<Content>) -> Markup {
    Markup::element("S", Some(vec![content.into()]), Attrs::new())
}

/// `<TABLE>` with the given rows, usually built with [`table_row`].
pub fn table(rows: impl IntoIterator<Item = Content>, attributes: Attrs) -> Markup {
    Markup::element("TABLE", Some(rows.into_iter().collect()), attributes)
}

/// `<TR>` with the given cells, usually built with [`table_cell`].
pub fn table_row(cells: impl IntoIterator<Item = Markup>) -> Markup {
    Markup::element(
        "TR",
        Some(cells.into_iter().map(Content::Markup).collect()),
        Attrs::new(),
    )
}

pub fn table_cell(content: impl Into<Content>, attributes: Attrs) -> Markup {
    Markup::element("TD", Some(vec![content.into()]), attributes)
}

/// `<HR/>`, only valid between table rows.
pub fn horizontal_rule() -> Markup {
    Markup::element("HR", None, Attrs::new())
}

/// `<VR/>`, only valid between table cells.
pub fn vertical_rule() -> Markup {
    Markup::element("VR", None, Attrs::new())
}

pub fn image(attributes: Attrs) -> Markup {
    Markup::element("IMG", None, attributes)
}
