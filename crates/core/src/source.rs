//! The graph capability consumed by the serializer.

use crate::value::Attrs;
use std::hash::Hash;

/// An edge as seen by the serializer.
#[derive(Debug)]
pub struct EdgeItem<'a, N, K> {
    pub source: &'a N,
    pub target: &'a N,
    /// Parallel-edge key; only meaningful for multigraphs.
    pub key: Option<&'a K>,
    pub attrs: &'a Attrs,
}

/// Read-only access to an attributed graph.
///
/// Implement this at the boundary to style and render any graph storage. The
/// serializer never mutates the graph.
pub trait GraphSource: 'static {
    /// Node identity. Used to assign synthetic identifiers to edge endpoints.
    type Node: Hash + Eq + 'static;
    /// Parallel-edge key type for multigraphs. Use `()` otherwise.
    type Key: 'static;

    /// Whether edges have a direction.
    fn is_directed(&self) -> bool;

    /// Whether parallel edges are distinguished by key.
    fn is_multigraph(&self) -> bool;

    /// Whether iteration order is deliberate rather than incidental.
    fn is_ordered(&self) -> bool {
        false
    }

    fn graph_attrs(&self) -> &Attrs;

    fn nodes(&self) -> Box<dyn Iterator<Item = (&Self::Node, &Attrs)> + '_>;

    fn edges(&self) -> Box<dyn Iterator<Item = EdgeItem<'_, Self::Node, Self::Key>> + '_>;
}

/// Text for a parallel-edge key in labels.
///
/// Simple graphs key their edges with `()`, which has no text.
pub trait KeyLabel {
    fn key_label(&self) -> String;
}

impl KeyLabel for () {
    fn key_label(&self) -> String {
        String::new()
    }
}

impl<T: KeyLabel + ?Sized> KeyLabel for &T {
    fn key_label(&self) -> String {
        (**self).key_label()
    }
}

macro_rules! display_key_label {
    ($($t:ty),* $(,)?) => {
        $(
            impl KeyLabel for $t {
                fn key_label(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_key_label!(str, String, char, bool, u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
