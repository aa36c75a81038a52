//! Values that are either constant or computed per element, and combinators over them.
//!
//! Every style field is a [`MaybeFn`]: a fixed value, or a function of the
//! element being styled. [`chain`] layers several attribute-producing values into
//! one, and [`switch`] dispatches to one of several values by a computed key.
//!
//! Inputs are described by a [`Signature`]. Each signature names the tuple of
//! borrowed arguments its functions receive, so a combinator built for node
//! styling can only ever be applied to node arguments.

use crate::error::{Error, Result};
use crate::value::Attrs;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;

/// The argument shape of a family of functions.
pub trait Signature: 'static {
    /// Borrowed arguments passed on each application.
    type Args<'a>: Copy;
}

/// Graph-level functions: `(graph, graph_attrs)`.
pub struct GraphSig<G>(PhantomData<fn() -> G>);

/// Node-level functions: `(node, node_attrs)`.
pub struct NodeSig<N>(PhantomData<fn() -> N>);

/// Edge-level functions: `(source, target, key, edge_attrs)`.
///
/// The key is `Some` only when styling a multigraph.
pub struct EdgeSig<N, K>(PhantomData<fn() -> (N, K)>);

/// Single-argument functions: `(value,)`.
pub struct Unary<T>(PhantomData<fn() -> T>);

/// Subgraph-level functions receive the subgraph key.
pub type SubgraphSig = Unary<String>;

impl<G: 'static> Signature for GraphSig<G> {
    type Args<'a> = (&'a G, &'a Attrs);
}

impl<N: 'static> Signature for NodeSig<N> {
    type Args<'a> = (&'a N, &'a Attrs);
}

impl<N: 'static, K: 'static> Signature for EdgeSig<N, K> {
    type Args<'a> = (&'a N, &'a N, Option<&'a K>, &'a Attrs);
}

impl<T: 'static> Signature for Unary<T> {
    type Args<'a> = (&'a T,);
}

/// A function over the arguments of signature `S`.
pub trait Function<S: Signature, O>: Send + Sync {
    fn call(&self, args: S::Args<'_>) -> Result<O>;
}

/// Either a constant value or a function computing it.
pub enum MaybeFn<S: Signature, O> {
    Value(O),
    Func(Arc<dyn Function<S, O>>),
}

impl<S: Signature, O> MaybeFn<S, O> {
    /// Wrap a constant.
    pub fn value(value: O) -> Self {
        MaybeFn::Value(value)
    }

    /// Wrap any [`Function`] implementation.
    pub fn function(f: impl Function<S, O> + 'static) -> Self {
        MaybeFn::Func(Arc::new(f))
    }

    /// Check if this is a constant.
    pub fn is_value(&self) -> bool {
        matches!(self, MaybeFn::Value(_))
    }

    /// Call the function with `args`, or return a copy of the constant.
    pub fn apply(&self, args: S::Args<'_>) -> Result<O>
    where
        O: Clone,
    {
        match self {
            MaybeFn::Value(value) => Ok(value.clone()),
            MaybeFn::Func(f) => f.call(args),
        }
    }
}

impl<S: Signature, O: Clone> Clone for MaybeFn<S, O> {
    fn clone(&self) -> Self {
        match self {
            MaybeFn::Value(value) => MaybeFn::Value(value.clone()),
            MaybeFn::Func(f) => MaybeFn::Func(Arc::clone(f)),
        }
    }
}

impl<S: Signature, O: fmt::Debug> fmt::Debug for MaybeFn<S, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaybeFn::Value(value) => f.debug_tuple("Value").field(value).finish(),
            MaybeFn::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl<S: Signature> Default for MaybeFn<S, Attrs> {
    fn default() -> Self {
        MaybeFn::Value(Attrs::new())
    }
}

impl<S: Signature> From<Attrs> for MaybeFn<S, Attrs> {
    fn from(attrs: Attrs) -> Self {
        MaybeFn::Value(attrs)
    }
}

/// Adapts a plain closure to [`Function`] for one signature.
struct FromFn<F>(F);

impl<G: 'static, O, F> Function<GraphSig<G>, O> for FromFn<F>
where
    F: Fn(&G, &Attrs) -> O + Send + Sync,
{
    fn call(&self, args: <GraphSig<G> as Signature>::Args<'_>) -> Result<O> {
        let (graph, attrs) = args;
        Ok((self.0)(graph, attrs))
    }
}

impl<N: 'static, O, F> Function<NodeSig<N>, O> for FromFn<F>
where
    F: Fn(&N, &Attrs) -> O + Send + Sync,
{
    fn call(&self, args: <NodeSig<N> as Signature>::Args<'_>) -> Result<O> {
        let (node, attrs) = args;
        Ok((self.0)(node, attrs))
    }
}

impl<N: 'static, K: 'static, O, F> Function<EdgeSig<N, K>, O> for FromFn<F>
where
    F: Fn(&N, &N, Option<&K>, &Attrs) -> O + Send + Sync,
{
    fn call(&self, args: <EdgeSig<N, K> as Signature>::Args<'_>) -> Result<O> {
        let (source, target, key, attrs) = args;
        Ok((self.0)(source, target, key, attrs))
    }
}

impl<T: 'static, O, F> Function<Unary<T>, O> for FromFn<F>
where
    F: Fn(&T) -> O + Send + Sync,
{
    fn call(&self, args: <Unary<T> as Signature>::Args<'_>) -> Result<O> {
        let (value,) = args;
        Ok((self.0)(value))
    }
}

impl<G: 'static, O: 'static> MaybeFn<GraphSig<G>, O> {
    /// A graph-level function `f(graph, graph_attrs)`.
    pub fn graph<F>(f: F) -> Self
    where
        F: Fn(&G, &Attrs) -> O + Send + Sync + 'static,
    {
        MaybeFn::Func(Arc::new(FromFn(f)))
    }
}

impl<N: 'static, O: 'static> MaybeFn<NodeSig<N>, O> {
    /// A node-level function `f(node, node_attrs)`.
    pub fn node<F>(f: F) -> Self
    where
        F: Fn(&N, &Attrs) -> O + Send + Sync + 'static,
    {
        MaybeFn::Func(Arc::new(FromFn(f)))
    }
}

impl<N: 'static, K: 'static, O: 'static> MaybeFn<EdgeSig<N, K>, O> {
    /// An edge-level function `f(source, target, key, edge_attrs)`.
    pub fn edge<F>(f: F) -> Self
    where
        F: Fn(&N, &N, Option<&K>, &Attrs) -> O + Send + Sync + 'static,
    {
        MaybeFn::Func(Arc::new(FromFn(f)))
    }
}

impl<T: 'static, O: 'static> MaybeFn<Unary<T>, O> {
    /// A single-argument function `f(value)`.
    pub fn unary<F>(f: F) -> Self
    where
        F: Fn(&T) -> O + Send + Sync + 'static,
    {
        MaybeFn::Func(Arc::new(FromFn(f)))
    }
}

struct Chain<S: Signature> {
    layers: Vec<MaybeFn<S, Attrs>>,
}

impl<S: Signature> Function<S, Attrs> for Chain<S> {
    fn call(&self, args: S::Args<'_>) -> Result<Attrs> {
        let mut merged = Attrs::new();
        for layer in &self.layers {
            merged.extend(layer.apply(args)?);
        }
        Ok(merged)
    }
}

/// Merge the attribute maps produced by `layers`, later layers winning.
///
/// The result applies every layer to the same arguments and right-merges their
/// outputs. A key that is overridden keeps the position of its first insertion.
pub fn chain<S: Signature>(layers: impl IntoIterator<Item = MaybeFn<S, Attrs>>) -> MaybeFn<S, Attrs> {
    MaybeFn::function(Chain {
        layers: layers.into_iter().collect(),
    })
}

struct Switch<S: Signature, K, O> {
    key: MaybeFn<S, K>,
    cases: HashMap<K, MaybeFn<S, O>>,
    default: Option<MaybeFn<S, O>>,
}

impl<S, K, O> Function<S, O> for Switch<S, K, O>
where
    S: Signature,
    K: Hash + Eq + Clone + fmt::Debug + Send + Sync,
    O: Clone + Send + Sync,
{
    fn call(&self, args: S::Args<'_>) -> Result<O> {
        let key = self.key.apply(args)?;
        match (self.cases.get(&key), &self.default) {
            (Some(case), _) => case.apply(args),
            (None, Some(default)) => default.apply(args),
            (None, None) => Err(Error::Lookup {
                key: format!("{:?}", key),
            }),
        }
    }
}

/// Dispatch on a computed key.
///
/// The result computes `key(args)`, then applies the matching case. Keys with no
/// case fall back to `default`, or fail with [`Error::Lookup`] when there is none.
pub fn switch<S, K, O>(
    key: MaybeFn<S, K>,
    cases: impl IntoIterator<Item = (K, MaybeFn<S, O>)>,
    default: Option<MaybeFn<S, O>>,
) -> MaybeFn<S, O>
where
    S: Signature,
    K: Hash + Eq + Clone + fmt::Debug + Send + Sync + 'static,
    O: Clone + Send + Sync + 'static,
{
    MaybeFn::function(Switch {
        key,
        cases: cases.into_iter().collect(),
        default,
    })
}
