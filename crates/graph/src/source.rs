//! [`GraphSource`] for [`AttrGraph`].

use crate::AttrGraph;
use gvstyle_core::{Attrs, EdgeItem, GraphSource};
use std::hash::Hash;

impl<N, K> GraphSource for AttrGraph<N, K>
where
    N: Clone + Hash + Eq + 'static,
    K: Clone + PartialEq + 'static,
{
    type Node = N;
    type Key = K;

    fn is_directed(&self) -> bool {
        AttrGraph::is_directed(self)
    }

    fn is_multigraph(&self) -> bool {
        AttrGraph::is_multigraph(self)
    }

    fn is_ordered(&self) -> bool {
        AttrGraph::is_ordered(self)
    }

    fn graph_attrs(&self) -> &Attrs {
        self.attrs()
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = (&N, &Attrs)> + '_> {
        Box::new(AttrGraph::nodes(self))
    }

    fn edges(&self) -> Box<dyn Iterator<Item = EdgeItem<'_, N, K>> + '_> {
        Box::new(AttrGraph::edges(self))
    }
}
