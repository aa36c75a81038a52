//! Attribute values and attribute maps.

use crate::markup::Markup;
use indexmap::IndexMap;
use std::fmt;

/// An ordered attribute mapping. Emission order follows insertion order.
pub type Attrs = IndexMap<String, Value>;

/// A single attribute value.
///
/// Graph and element attributes are heterogeneous, so values are kept as a small
/// dynamic type. `Color` holds RGB or RGBA channels in `[0, 1]` and is only
/// special-cased for color attributes; `Markup` is only special-cased for label
/// attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Color(Vec<f64>),
    Markup(Markup),
}

impl Value {
    /// Build a color value from channel values.
    pub fn color(channels: impl IntoIterator<Item = f64>) -> Self {
        Value::Color(channels.into_iter().collect())
    }

    /// Check if this is the absent value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Borrow the string contents, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => f.write_str(s),
            Value::Color(channels) => {
                f.write_str("(")?;
                for (i, c) in channels.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", c)?;
                }
                f.write_str(")")
            }
            Value::Markup(m) => write!(f, "{}", m),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<Markup> for Value {
    fn from(m: Markup) -> Self {
        Value::Markup(m)
    }
}

impl From<(f64, f64, f64)> for Value {
    fn from((r, g, b): (f64, f64, f64)) -> Self {
        Value::Color(vec![r, g, b])
    }
}

impl From<(f64, f64, f64, f64)> for Value {
    fn from((r, g, b, a): (f64, f64, f64, f64)) -> Self {
        Value::Color(vec![r, g, b, a])
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::None, Into::into)
    }
}

/// Format an attribute map for humans, e.g. `{color: red, weight: 2}`.
pub fn format_attrs(attrs: &Attrs) -> String {
    let body = attrs
        .iter()
        .map(|(k, v)| format!("{}: {}", k, v))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{}}}", body)
}

/// Build an [`Attrs`] map from `key => value` pairs.
///
/// ```
/// use gvstyle_core::{attrs, Value};
///
/// let a = attrs! { "shape" => "box", "penwidth" => 2 };
/// assert_eq!(a["shape"], Value::from("box"));
/// assert!(attrs!().is_empty());
/// ```
#[macro_export]
macro_rules! attrs {
    () => {
        $crate::Attrs::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::Attrs::new();
        $(
            map.insert(::std::string::String::from($key), $crate::Value::from($value));
        )+
        map
    }};
}
