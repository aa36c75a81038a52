//! Lazy uniform-cost (Dijkstra-order) traversal.
//!
//! Nodes are yielded in order of increasing path cost from the nearest source,
//! each exactly once. Ties are broken by discovery order, so a traversal over a
//! graph with unit costs is a breadth-first search. Successors of a node are
//! only requested once the consumer asks for the node after it, which makes it
//! cheap to stop early with [`Iterator::take_while`].

use petgraph::algo::Measure;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::hash::Hash;

/// Iterator over `(cost, node)` pairs in non-decreasing cost order.
pub struct UniformCostTraversal<N, C, S, F> {
    frontier: BinaryHeap<Entry<N, C>>,
    visited: HashSet<N>,
    /// The last yielded node, whose successors have not been pushed yet.
    pending: Option<(C, N)>,
    seq: usize,
    successors: S,
    cost: F,
}

struct Entry<N, C> {
    cost: C,
    seq: usize,
    node: N,
}

impl<N, C: PartialOrd> Ord for Entry<N, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap pops the greatest entry; the cheapest, earliest must win.
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<N, C: PartialOrd> PartialOrd for Entry<N, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N, C: PartialOrd> PartialEq for Entry<N, C> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N, C: PartialOrd> Eq for Entry<N, C> {}

impl<N, C, S, F> UniformCostTraversal<N, C, S, F>
where
    C: Measure,
{
    fn push(&mut self, cost: C, node: N) {
        self.frontier.push(Entry {
            cost,
            seq: self.seq,
            node,
        });
        self.seq += 1;
    }
}

impl<N, C, S, I, F> Iterator for UniformCostTraversal<N, C, S, F>
where
    N: Clone + Hash + Eq,
    C: Measure,
    S: FnMut(&N) -> I,
    I: IntoIterator<Item = N>,
    F: FnMut(&N, &N) -> C,
{
    type Item = (C, N);

    fn next(&mut self) -> Option<(C, N)> {
        if let Some((cost, node)) = self.pending.take() {
            for next in (self.successors)(&node) {
                if self.visited.contains(&next) {
                    continue;
                }
                let step = (self.cost)(&node, &next);
                self.push(cost.clone() + step, next);
            }
        }

        while let Some(Entry { cost, node, .. }) = self.frontier.pop() {
            if !self.visited.insert(node.clone()) {
                continue;
            }
            self.pending = Some((cost.clone(), node.clone()));
            return Some((cost, node));
        }
        None
    }
}

fn unit_cost<N>(_: &N, _: &N) -> usize {
    1
}

/// Traverse from `sources` where every step costs 1.
///
/// ```
/// use gvstyle_graph::uniform_cost_traversal;
///
/// let order: Vec<(usize, u32)> =
///     uniform_cost_traversal([0], |&n: &u32| if n < 3 { vec![n + 1] } else { vec![] }).collect();
/// assert_eq!(order, vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
/// ```
pub fn uniform_cost_traversal<N, S, I>(
    sources: impl IntoIterator<Item = N>,
    successors: S,
) -> UniformCostTraversal<N, usize, S, fn(&N, &N) -> usize>
where
    N: Clone + Hash + Eq,
    S: FnMut(&N) -> I,
    I: IntoIterator<Item = N>,
{
    uniform_cost_traversal_with_cost(sources, successors, unit_cost::<N> as fn(&N, &N) -> usize)
}

/// Traverse from `sources`, paying `cost(u, v)` to step from `u` to `v`.
///
/// Sources start at `C::default()`. Costs must be non-negative.
pub fn uniform_cost_traversal_with_cost<N, C, S, I, F>(
    sources: impl IntoIterator<Item = N>,
    successors: S,
    cost: F,
) -> UniformCostTraversal<N, C, S, F>
where
    N: Clone + Hash + Eq,
    C: Measure,
    S: FnMut(&N) -> I,
    I: IntoIterator<Item = N>,
    F: FnMut(&N, &N) -> C,
{
    let mut traversal = UniformCostTraversal {
        frontier: BinaryHeap::new(),
        visited: HashSet::new(),
        pending: None,
        seq: 0,
        successors,
        cost,
    };
    for source in sources {
        traversal.push(C::default(), source);
    }
    traversal
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::collections::HashMap;

    fn adjacency(edges: &[(&'static str, &'static str)]) -> HashMap<&'static str, Vec<&'static str>> {
        let mut map: HashMap<&str, Vec<&str>> = HashMap::new();
        for &(u, v) in edges {
            map.entry(u).or_default().push(v);
            map.entry(v).or_default().push(u);
        }
        map
    }

    #[test]
    fn test_breadth_first_order_with_unit_cost() {
        let adj = adjacency(&[("z", "y"), ("a", "b")]);
        let order: Vec<(usize, &str)> =
            uniform_cost_traversal(["z", "a"], |n| adj[n].clone()).collect();
        assert_eq!(order, vec![(0, "z"), (0, "a"), (1, "y"), (1, "b")]);
    }

    #[test]
    fn test_weighted_costs_reorder_nodes() {
        let successors = |&n: &u32| -> Vec<u32> {
            match n {
                0 => vec![2, 1],
                1 => vec![0, 2],
                _ => vec![0, 1],
            }
        };
        let cost = |&u: &u32, &v: &u32| match (u.min(v), u.max(v)) {
            (0, 1) => 1.0,
            (1, 2) => 1.5,
            _ => 5.0,
        };

        let order: Vec<(f64, u32)> = uniform_cost_traversal_with_cost([0], successors, cost).collect();
        assert_eq!(order, vec![(0.0, 0), (1.0, 1), (2.5, 2)]);
    }

    #[test]
    fn test_successors_are_requested_lazily() {
        let calls = RefCell::new(Vec::new());
        let mut traversal = uniform_cost_traversal([0u32], |&n: &u32| {
            calls.borrow_mut().push(n);
            vec![n + 1]
        });

        assert_eq!(traversal.next(), Some((0, 0)));
        assert!(calls.borrow().is_empty());
        assert_eq!(traversal.next(), Some((1, 1)));
        assert_eq!(*calls.borrow(), vec![0]);
    }

    #[test]
    fn test_nodes_are_yielded_once() {
        let adj = adjacency(&[("a", "b"), ("b", "c"), ("a", "c")]);
        let order: Vec<&str> = uniform_cost_traversal(["a", "a"], |n| adj[n].clone())
            .map(|(_, n)| n)
            .collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }
}
